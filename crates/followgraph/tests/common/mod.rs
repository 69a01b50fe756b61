//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use followgraph::{AccountId, Cursor, Error, GraphStore, Page, PageSource, Profile, Result};
use tempfile::TempDir;

/// Open a fresh store in a temporary directory.
pub fn temp_store() -> (TempDir, GraphStore) {
    let dir = tempfile::tempdir().expect("should create temp directory");
    let store = GraphStore::open(&dir.path().join("graph.db")).expect("should open store");
    (dir, store)
}

/// Profile with a handle derived from the id.
pub fn account(id: i64) -> Profile {
    Profile::new(id, format!("user{id}"))
}

/// Profile with a handle derived from the id and a follower count.
pub fn ranked(id: i64, followers: i64) -> Profile {
    account(id).with_follower_count(followers)
}

/// Ids of `profiles`, in order.
pub fn ids(profiles: &[Profile]) -> Vec<i64> {
    profiles.iter().map(|p| p.id.as_i64()).collect()
}

/// One scripted response.
#[derive(Debug, Clone)]
pub enum Step {
    /// Serve these profiles
    Page(Vec<Profile>),
    /// Fail the request
    Fail(&'static str),
}

/// In-memory page source serving a fixed listing per account.
///
/// The pages of one account are chained with the cursors `p1`, `p2`, ...
/// and the last one points at the end sentinel. Requests are recorded, and
/// the number of listings being walked at the same time is tracked.
#[derive(Default)]
pub struct ScriptedSource {
    scripts: HashMap<AccountId, Vec<Step>>,
    latency: Duration,
    requests: Mutex<Vec<(AccountId, Cursor)>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `steps` as the listing of `source`.
    #[must_use]
    pub fn with_listing(mut self, source: i64, steps: Vec<Step>) -> Self {
        self.scripts.insert(AccountId(source), steps);
        self
    }

    /// Serve `profiles` as a single-page listing of `source`.
    #[must_use]
    pub fn with_following(self, source: i64, profiles: Vec<Profile>) -> Self {
        self.with_listing(source, vec![Step::Page(profiles)])
    }

    /// Delay every response by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn requests(&self) -> Vec<(AccountId, Cursor)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_for(&self, source: i64) -> Vec<Cursor> {
        self.requests()
            .into_iter()
            .filter(|(id, _)| *id == AccountId(source))
            .map(|(_, cursor)| cursor)
            .collect()
    }

    /// Highest number of requests that were in progress at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn respond(&self, source: AccountId, cursor: &Cursor) -> Result<Page> {
        let steps = self
            .scripts
            .get(&source)
            .ok_or_else(|| Error::Protocol(format!("no listing scripted for {source}")))?;

        let index = match cursor {
            Cursor::Start => 0,
            Cursor::Token(token) => token
                .strip_prefix('p')
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| Error::Protocol(format!("unexpected cursor {token}")))?,
            Cursor::End => return Err(Error::Protocol("requested past the end".into())),
        };

        match steps.get(index) {
            Some(Step::Page(profiles)) => Ok(Page {
                profiles: profiles.clone(),
                next_cursor: if index + 1 == steps.len() {
                    Cursor::End
                } else {
                    Cursor::Token(format!("p{}", index + 1))
                },
            }),
            Some(Step::Fail(reason)) => Err(Error::Protocol((*reason).to_string())),
            None => Err(Error::Protocol(format!("no page {index} for {source}"))),
        }
    }
}

#[async_trait]
impl PageSource for ScriptedSource {
    async fn fetch_page(&self, source: AccountId, cursor: &Cursor) -> Result<Page> {
        self.requests.lock().unwrap().push((source, cursor.clone()));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let response = self.respond(source, cursor);

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        response
    }
}
