//! Atomic branch ingest.
//!
//! A branch is merged in one transaction: every fetched profile is upserted
//! as a vertex, then an edge from the root to each of them is inserted. The
//! store's constraints do the validation. If the root was never seeded the
//! first edge violates its foreign key, and if the root appears among its own
//! targets the self-follow check fires. Either way the transaction is dropped
//! and nothing from the call is persisted, not even the vertex upserts that
//! already ran.

use rusqlite::{Transaction, TransactionBehavior, params};
use tracing::{debug, trace};

use super::GraphStore;
use super::accounts::upsert_account;
use super::helpers::classify_branch_error;
use crate::error::Result;
use crate::types::{AccountId, BranchStats, Profile};

/// Duplicate edges are absorbed here. The conflict target covers only the
/// primary key, so check and foreign-key violations still raise.
const INSERT_FOLLOW_SQL: &str = "\
INSERT INTO follows (source_id, target_id) VALUES (?1, ?2)
ON CONFLICT(source_id, target_id) DO NOTHING";

impl GraphStore {
    /// Merge a fetched branch into the graph as a single atomic unit.
    ///
    /// Re-ingesting an identical branch leaves the store unchanged. An empty
    /// profile list commits nothing and reports zero counts.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingRoot`](crate::Error::MissingRoot) if `source` is not
    ///   a stored account and `profiles` is non-empty
    /// - [`Error::SelfFollow`](crate::Error::SelfFollow) if any profile has
    ///   the id `source`
    /// - [`Error::Database`](crate::Error::Database) for any other storage failure
    ///
    /// In every error case the whole call is rolled back.
    pub fn ingest_branch(&self, source: AccountId, profiles: &[Profile]) -> Result<BranchStats> {
        let mut conn = self.connection()?;
        // IMMEDIATE takes the write lock up front, so concurrent writers wait
        // on the busy timeout instead of failing on lock upgrade.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let stats = match merge_branch(&tx, source, profiles) {
            Ok(stats) => stats,
            Err(e) => {
                let error = classify_branch_error(e, source);
                debug!(source_id = %source, error = %error, "Branch rolled back");
                // Dropping `tx` rolls back.
                return Err(error);
            }
        };

        tx.commit()?;

        debug!(
            source_id = %source,
            profiles = stats.profiles_processed,
            edges_created = stats.edges_created,
            "Branch committed"
        );

        Ok(stats)
    }
}

fn merge_branch(
    tx: &Transaction<'_>,
    source: AccountId,
    profiles: &[Profile],
) -> rusqlite::Result<BranchStats> {
    for profile in profiles {
        upsert_account(tx, profile)?;
    }

    let mut insert = tx.prepare_cached(INSERT_FOLLOW_SQL)?;
    let mut edges_created = 0;
    for profile in profiles {
        let inserted = insert.execute(params![source.as_i64(), profile.id.as_i64()])?;
        if inserted == 0 {
            trace!(source_id = %source, target_id = %profile.id, "Edge already stored");
        }
        edges_created += inserted;
    }

    Ok(BranchStats {
        profiles_processed: profiles.len(),
        edges_attempted: profiles.len(),
        edges_created,
    })
}
