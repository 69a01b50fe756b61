//! Graph operations implemented directly on `GraphStore`.
//!
//! Every query is a single statement, so each one sees one consistent
//! committed state of the graph.

use rusqlite::params;

use super::{ACCOUNTS_COLUMNS, GraphStore, RANKING, row_to_profile};
use crate::error::{Error, Result};
use crate::graph::{FollowGraphOps, distinct_ids};
use crate::types::{AccountId, Profile};

impl FollowGraphOps for GraphStore {
    fn following(&self, source: AccountId) -> Result<Vec<Profile>> {
        let conn = self.connection()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {ACCOUNTS_COLUMNS} FROM accounts
             WHERE id IN (SELECT target_id FROM follows WHERE source_id = ?1)
             ORDER BY {RANKING}"
        ))?;

        let profiles = stmt
            .query_map([source.as_i64()], row_to_profile)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(profiles)
    }

    fn followers(&self, target: AccountId) -> Result<Vec<Profile>> {
        let conn = self.connection()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {ACCOUNTS_COLUMNS} FROM accounts
             WHERE id IN (SELECT source_id FROM follows WHERE target_id = ?1)
             ORDER BY {RANKING}"
        ))?;

        let profiles = stmt
            .query_map([target.as_i64()], row_to_profile)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(profiles)
    }

    fn common_followees(&self, sources: &[AccountId]) -> Result<Vec<Profile>> {
        let sources = distinct_ids(sources);
        if sources.is_empty() {
            return Ok(Vec::new());
        }

        // A target qualifies when it is followed by as many distinct sources
        // as were asked about. The sources travel as one JSON array so the
        // statement has two parameters whatever the input size.
        let sql = format!(
            "SELECT {ACCOUNTS_COLUMNS} FROM accounts WHERE id IN (
                 SELECT target_id FROM follows
                 WHERE source_id IN (SELECT value FROM json_each(?1))
                 GROUP BY target_id
                 HAVING COUNT(DISTINCT source_id) = ?2
             )
             ORDER BY {RANKING}"
        );

        let source_list = serde_json::to_string(&sources)
            .map_err(|e| Error::Internal(format!("failed to encode source ids: {e}")))?;
        // Safety: a slice never holds more than i64::MAX elements
        #[allow(clippy::cast_possible_wrap)]
        let required = sources.len() as i64;

        let conn = self.connection()?;
        let mut stmt = conn.prepare(&sql)?;
        let profiles = stmt
            .query_map(params![source_list, required], row_to_profile)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        tracing::trace!(
            sources = sources.len(),
            matches = profiles.len(),
            "Computed common followees"
        );

        Ok(profiles)
    }
}
