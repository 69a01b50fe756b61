//! Concurrent fetch-then-ingest cycles over many root accounts.
//!
//! Each root gets one independent cycle: fetch its whole following list,
//! then merge it as a branch. Cycles for different roots run in parallel up
//! to a worker bound; the store is the only state they share. The fetch is
//! async, the ingest runs on the blocking pool since `SQLite` calls block.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::db::GraphStore;
use crate::error::{Error, Result};
use crate::fetch::{PageSource, fetch_following};
use crate::graph::distinct_ids;
use crate::types::{AccountId, Branch, BranchStats};

/// Result of crawling one root account.
#[derive(Debug)]
pub struct CrawlOutcome {
    /// Root account this cycle crawled
    pub source_id: AccountId,
    /// The branch as fetched, present whenever the fetch completed, even if
    /// the ingest then failed
    pub fetched: Option<Branch>,
    /// What the ingest committed, or why the cycle failed
    pub result: Result<BranchStats>,
}

impl CrawlOutcome {
    fn failed(source_id: AccountId, error: Error) -> Self {
        Self {
            source_id,
            fetched: None,
            result: Err(error),
        }
    }
}

/// Runs fetch-then-ingest cycles against a shared store.
pub struct Crawler {
    store: Arc<GraphStore>,
    source: Arc<dyn PageSource>,
    workers: usize,
}

impl std::fmt::Debug for Crawler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crawler")
            .field("store", &self.store)
            .field("workers", &self.workers)
            .finish_non_exhaustive()
    }
}

impl Crawler {
    /// Create a crawler running at most `workers` cycles at once.
    ///
    /// A worker count of zero is treated as one.
    #[must_use]
    pub fn new(store: Arc<GraphStore>, source: Arc<dyn PageSource>, workers: usize) -> Self {
        Self {
            store,
            source,
            workers: workers.max(1),
        }
    }

    /// Maximum number of cycles running at once.
    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Crawl every distinct id in `sources`.
    ///
    /// Outcomes come back in the order the ids were first given. A failing
    /// cycle does not stop the others; its error is in its outcome. Roots
    /// must already be seeded, otherwise their outcome is
    /// [`Error::MissingRoot`].
    ///
    /// Dropping the returned future aborts every cycle still fetching, and
    /// nothing is written for those branches.
    pub async fn crawl(&self, sources: &[AccountId]) -> Vec<CrawlOutcome> {
        let sources = distinct_ids(sources);
        let permits = Arc::new(Semaphore::new(self.workers));

        info!(
            sources = sources.len(),
            workers = self.workers,
            "Starting crawl"
        );

        // Dropping the set aborts every cycle that has not finished.
        let mut cycles = JoinSet::new();
        for (index, &source_id) in sources.iter().enumerate() {
            let permits = Arc::clone(&permits);
            let store = Arc::clone(&self.store);
            let api = Arc::clone(&self.source);
            cycles.spawn(async move {
                let _permit = match permits.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        return (
                            index,
                            CrawlOutcome::failed(
                                source_id,
                                Error::Internal(format!("crawl worker pool closed: {e}")),
                            ),
                        );
                    }
                };
                (index, run_cycle(store, api, source_id).await)
            });
        }

        let mut slots: Vec<Option<CrawlOutcome>> = sources.iter().map(|_| None).collect();
        while let Some(joined) = cycles.join_next().await {
            match joined {
                Ok((index, outcome)) => slots[index] = Some(outcome),
                Err(e) => warn!(error = %e, "Crawl task failed"),
            }
        }

        let outcomes: Vec<_> = sources
            .iter()
            .zip(slots)
            .map(|(&source_id, slot)| {
                slot.unwrap_or_else(|| {
                    CrawlOutcome::failed(
                        source_id,
                        Error::Internal(format!("crawl task for {source_id} did not complete")),
                    )
                })
            })
            .collect();

        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        info!(
            sources = outcomes.len(),
            failed,
            "Crawl finished"
        );

        outcomes
    }
}

async fn run_cycle(
    store: Arc<GraphStore>,
    api: Arc<dyn PageSource>,
    source_id: AccountId,
) -> CrawlOutcome {
    let profiles = match fetch_following(api.as_ref(), source_id).await {
        Ok(profiles) => profiles,
        Err(e) => {
            warn!(source_id = %source_id, error = %e, "Fetch failed");
            return CrawlOutcome::failed(source_id, e);
        }
    };

    let ingest = tokio::task::spawn_blocking(move || {
        let result = store.ingest_branch(source_id, &profiles);
        (profiles, result)
    })
    .await;

    match ingest {
        Ok((profiles, result)) => {
            match &result {
                Ok(stats) => info!(
                    source_id = %source_id,
                    profiles = stats.profiles_processed,
                    edges_created = stats.edges_created,
                    "Branch ingested"
                ),
                Err(e) => warn!(source_id = %source_id, error = %e, "Ingest failed"),
            }
            CrawlOutcome {
                source_id,
                fetched: Some(Branch::new(source_id, profiles)),
                result,
            }
        }
        Err(e) => CrawlOutcome::failed(
            source_id,
            Error::Internal(format!("ingest task for {source_id} failed: {e}")),
        ),
    }
}
