//! Paginated retrieval of an account's outgoing follow edges.
//!
//! The remote service exposes the follow list of an account as a cursor-paged
//! listing. [`fetch_following`] walks that listing from the start sentinel to
//! the end sentinel and returns every profile it saw, in server order.
//!
//! The transport sits behind the [`PageSource`] trait so the walk itself
//! (cursor protocol, cool-down, failure handling) can be driven by anything
//! that produces pages. [`FriendsListClient`] is the HTTP implementation.
//!
//! A fetch is all-or-nothing: any failing page fails the whole call and the
//! profiles gathered so far are dropped. Nothing here touches the store.

mod cursor;
mod http;
mod session;

pub use cursor::Cursor;
pub use http::{DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE, FriendsListClient, parse_page};
pub use session::Session;

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::types::{AccountId, Profile};

/// Fixed pause between two consecutive page requests.
///
/// Applied before every page after the first, never after the last one.
pub const PAGE_COOLDOWN: Duration = Duration::from_secs(2);

/// One page of a follow listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Profiles on this page, in server order
    pub profiles: Vec<Profile>,
    /// Where the next page starts, or [`Cursor::End`]
    pub next_cursor: Cursor,
}

/// Anything that can serve the pages of an account's follow listing.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the page of `source`'s following list starting at `cursor`.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be retrieved or decoded.
    async fn fetch_page(&self, source: AccountId, cursor: &Cursor) -> Result<Page>;
}

/// Collect every account `source` follows.
///
/// Pages are requested strictly one after another with [`PAGE_COOLDOWN`]
/// between them. Profiles are not deduplicated.
///
/// # Errors
///
/// - [`Error::InvalidAccountId`] if `source` is not a positive id
/// - [`Error::Protocol`] if a page sends the walk back to the start or
///   returns a cursor the walk has already visited
/// - whatever the page source reports for a failing page
pub async fn fetch_following<S>(api: &S, source: AccountId) -> Result<Vec<Profile>>
where
    S: PageSource + ?Sized,
{
    if !source.is_valid() {
        return Err(Error::InvalidAccountId(source.as_i64()));
    }

    let mut profiles = Vec::new();
    let mut cursor = Cursor::Start;
    let mut visited: HashSet<String> = HashSet::new();
    let mut pages = 0usize;

    loop {
        if pages > 0 {
            tokio::time::sleep(PAGE_COOLDOWN).await;
        }

        let page = api.fetch_page(source, &cursor).await?;
        pages += 1;
        trace!(
            source_id = %source,
            page = pages,
            profiles = page.profiles.len(),
            next_cursor = %page.next_cursor,
            "Fetched page"
        );
        profiles.extend(page.profiles);

        match page.next_cursor {
            Cursor::End => break,
            Cursor::Start => {
                return Err(Error::Protocol(format!(
                    "page {pages} of account {source} restarted the listing"
                )));
            }
            Cursor::Token(token) => {
                if !visited.insert(token.clone()) {
                    return Err(Error::Protocol(format!(
                        "page {pages} of account {source} returned cursor {token} a second time"
                    )));
                }
                cursor = Cursor::Token(token);
            }
        }
    }

    debug!(
        source_id = %source,
        pages,
        profiles = profiles.len(),
        "Fetched following list"
    );

    Ok(profiles)
}
