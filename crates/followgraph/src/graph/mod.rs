//! Read operations on the follow graph.
//!
//! This module provides the query side of the graph:
//! - Adjacency (whom does this account follow? who follows it?)
//! - Intersection (whom do *all* of these accounts follow?)
//!
//! ## Design
//!
//! - The trait defines the operations (`FollowGraphOps`)
//! - The `SQLite` implementation lives on `GraphStore` and answers each query
//!   with a single statement
//! - Every listing uses the same popularity ranking: follower count
//!   descending with missing counts last, then handle ascending

use std::collections::HashSet;

use crate::error::Result;
use crate::types::{AccountId, Profile};

/// Queries over stored accounts and follow edges.
///
/// All operations are pure reads. They may run concurrently with branch
/// ingests and observe the last committed state.
pub trait FollowGraphOps: Send + Sync {
    /// Accounts that `source` follows, ranked.
    fn following(&self, source: AccountId) -> Result<Vec<Profile>>;

    /// Accounts that follow `target`, ranked.
    fn followers(&self, target: AccountId) -> Result<Vec<Profile>>;

    /// Accounts followed by every one of `sources`, ranked.
    ///
    /// Duplicate ids in `sources` are ignored. A single source yields its
    /// full following list; an empty slice yields an empty result without
    /// touching the database.
    fn common_followees(&self, sources: &[AccountId]) -> Result<Vec<Profile>>;
}

/// Remove repeated ids, keeping the first occurrence of each.
#[must_use]
pub fn distinct_ids(ids: &[AccountId]) -> Vec<AccountId> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}
