//! Shared utilities for followgraph benchmarks.

// Benchmark utilities - pedantic lints not critical here
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_wrap)]

use followgraph::{AccountId, GraphStore, Profile};
use tempfile::TempDir;

/// A store ready for benchmarking with branches already ingested.
pub struct PopulatedStore {
    /// Temp directory - must be kept alive for the duration of the benchmark.
    pub dir: TempDir,
    pub store: GraphStore,
    /// Root accounts whose branches were ingested, in id order.
    pub roots: Vec<AccountId>,
}

/// Profiles `first..first + count` with varied follower counts.
pub fn following_range(first: i64, count: i64) -> Vec<Profile> {
    (first..first + count)
        .map(|id| Profile::new(id, format!("user{id}")).with_follower_count(id * 7919 % 100_000))
        .collect()
}

/// Create a store with `roots` crawled accounts, each following
/// `following` accounts. Consecutive roots share `overlap` of them, so every
/// root follows the first `overlap` accounts of the shared pool.
pub fn populate(roots: usize, following: i64, overlap: i64) -> PopulatedStore {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let store = GraphStore::open(&dir.path().join("bench.db")).expect("failed to open store");

    let shared = following_range(1_000_000, overlap);
    let mut root_ids = Vec::with_capacity(roots);

    for (i, root) in (1..=roots as i64).enumerate() {
        store
            .seed_account(&Profile::new(root, format!("root{root}")))
            .expect("seed failed");

        let own_first = 2_000_000 + i as i64 * following;
        let mut branch = shared.clone();
        branch.extend(following_range(own_first, following - overlap));
        store
            .ingest_branch(AccountId(root), &branch)
            .expect("ingest failed");

        root_ids.push(AccountId(root));
    }

    PopulatedStore {
        dir,
        store,
        roots: root_ids,
    }
}
