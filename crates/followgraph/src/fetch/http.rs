//! HTTP page source for the legacy `friends/list` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{COOKIE, HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;

use super::{Cursor, Page, PageSource, Session};
use crate::error::{Error, Result};
use crate::types::{AccountId, Profile};

/// Base URL of the web client's private API.
pub const DEFAULT_BASE_URL: &str = "https://x.com/i/api";

/// Accounts requested per page. The endpoint caps this at 200.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

const FRIENDS_LIST_PATH: &str = "/1.1/friends/list.json";

/// Public profile page of a handle.
const PROFILE_URL_PREFIX: &str = "https://x.com/";

/// Page body as sent by the endpoint.
#[derive(Debug, Deserialize)]
struct RawPage {
    next_cursor_str: String,
    users: Vec<RawUser>,
}

/// One user record as sent by the endpoint. Unused fields are ignored.
#[derive(Debug, Deserialize)]
struct RawUser {
    id_str: String,
    screen_name: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    followers_count: Option<i64>,
    #[serde(default)]
    url: Option<String>,
}

impl RawUser {
    fn into_profile(self) -> Result<Profile> {
        let id: i64 = self.id_str.parse().map_err(|e| {
            Error::Protocol(format!(
                "user @{} has unusable id_str {:?}: {e}",
                self.screen_name, self.id_str
            ))
        })?;
        let id = AccountId(id);
        if !id.is_valid() {
            return Err(Error::InvalidAccountId(id.as_i64()));
        }

        Ok(Profile {
            id,
            profile_url: Some(format!("{PROFILE_URL_PREFIX}{}", self.screen_name)),
            handle: self.screen_name,
            display_name: self.name,
            description: self.description,
            follower_count: self.followers_count,
            pinned_url: self.url,
        })
    }
}

/// Decode one page body into typed profiles.
///
/// # Errors
///
/// - [`Error::Decode`] if the body is not JSON of the expected shape
/// - [`Error::Protocol`] if the cursor is empty or a user id is not numeric
pub fn parse_page(body: &[u8]) -> Result<Page> {
    let raw: RawPage = serde_json::from_slice(body)?;

    let next_cursor = raw.next_cursor_str.parse()?;
    let profiles = raw
        .users
        .into_iter()
        .map(RawUser::into_profile)
        .collect::<Result<Vec<_>>>()?;

    Ok(Page {
        profiles,
        next_cursor,
    })
}

/// Client for the follow listing, authenticated with a replayed [`Session`].
#[derive(Debug, Clone)]
pub struct FriendsListClient {
    client: reqwest::Client,
    endpoint: String,
    page_size: u32,
}

impl FriendsListClient {
    /// Build a client that sends the session's headers and cookies on every
    /// request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a session header name or value is not
    /// valid HTTP, and [`Error::Http`] if the client cannot be built.
    pub fn new(
        base_url: &str,
        page_size: u32,
        timeout: Duration,
        session: &Session,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(session_headers(session)?)
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}{FRIENDS_LIST_PATH}", base_url.trim_end_matches('/')),
            page_size,
        })
    }

    /// Full URL of the listing endpoint, without query string.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn session_headers(session: &Session) -> Result<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(session.headers.len() + 1);

    for (name, value) in &session.headers {
        let header = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::Config(format!("invalid session header name {name:?}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::Config(format!("invalid value for session header {name}: {e}")))?;
        headers.insert(header, value);
    }

    if let Some(cookies) = session.cookie_header() {
        let mut value = HeaderValue::from_str(&cookies)
            .map_err(|e| Error::Config(format!("invalid session cookie: {e}")))?;
        value.set_sensitive(true);
        headers.insert(COOKIE, value);
    }

    Ok(headers)
}

#[async_trait]
impl PageSource for FriendsListClient {
    async fn fetch_page(&self, source: AccountId, cursor: &Cursor) -> Result<Page> {
        let user_id = source.to_string();
        let count = self.page_size.to_string();

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("include_followed_by", "1"),
                ("user_id", user_id.as_str()),
                ("count", count.as_str()),
                ("cursor", cursor.as_param()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                status,
                url: self.endpoint.clone(),
            });
        }

        let body = response.bytes().await?;
        parse_page(&body)
    }
}
