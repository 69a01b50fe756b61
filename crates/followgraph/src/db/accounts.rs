//! Account (vertex) operations.

use rusqlite::{Connection, OptionalExtension, params};

use super::{ACCOUNTS_COLUMNS, GraphStore, RANKING, row_to_profile};
use crate::error::Result;
use crate::types::{AccountId, Profile};

/// Insert an account or overwrite every mutable field of the stored one.
const UPSERT_ACCOUNT_SQL: &str = "\
INSERT INTO accounts (id, handle, display_name, description, follower_count, pinned_url, profile_url)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
ON CONFLICT(id) DO UPDATE SET
  handle = excluded.handle,
  display_name = excluded.display_name,
  description = excluded.description,
  follower_count = excluded.follower_count,
  pinned_url = excluded.pinned_url,
  profile_url = excluded.profile_url";

/// Upsert one account on an existing connection or transaction.
///
/// Last write wins; there is no versioning of account snapshots.
pub(crate) fn upsert_account(conn: &Connection, profile: &Profile) -> rusqlite::Result<()> {
    conn.prepare_cached(UPSERT_ACCOUNT_SQL)?.execute(params![
        profile.id.as_i64(),
        profile.handle,
        profile.display_name,
        profile.description,
        profile.follower_count,
        profile.pinned_url,
        profile.profile_url,
    ])?;
    Ok(())
}

impl GraphStore {
    /// Store a single account outside of any branch.
    ///
    /// This is how a crawl root enters the graph: its branch can only be
    /// ingested once the root itself exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails.
    pub fn seed_account(&self, profile: &Profile) -> Result<()> {
        let conn = self.connection()?;
        upsert_account(&conn, profile)?;
        tracing::debug!(account_id = %profile.id, handle = %profile.handle, "Seeded account");
        Ok(())
    }

    /// Get an account by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_account(&self, id: AccountId) -> Result<Option<Profile>> {
        let conn = self.connection()?;

        conn.query_row(
            &format!("SELECT {ACCOUNTS_COLUMNS} FROM accounts WHERE id = ?1"),
            [id.as_i64()],
            row_to_profile,
        )
        .optional()
        .map_err(Into::into)
    }

    /// Find accounts currently stored under `handle`.
    ///
    /// Handles are not unique over time (accounts rename, names get reused),
    /// so this can return several accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_by_handle(&self, handle: &str) -> Result<Vec<Profile>> {
        let handle = handle.strip_prefix('@').unwrap_or(handle);
        let conn = self.connection()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {ACCOUNTS_COLUMNS} FROM accounts WHERE handle = ?1 ORDER BY {RANKING}"
        ))?;

        let accounts = stmt
            .query_map([handle], row_to_profile)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(accounts)
    }

    /// Delete an account together with every edge touching it.
    ///
    /// Returns `false` if no such account was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_account(&self, id: AccountId) -> Result<bool> {
        let conn = self.connection()?;
        let deleted = conn.execute("DELETE FROM accounts WHERE id = ?1", [id.as_i64()])?;
        if deleted > 0 {
            tracing::info!(account_id = %id, "Deleted account and its edges");
        }
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, GraphStore) {
        let dir = tempfile::tempdir().expect("should create temp directory");
        let path: PathBuf = dir.path().join("graph.db");
        let store = GraphStore::open(&path).expect("should open store");
        (dir, store)
    }

    #[test]
    fn seed_then_get_round_trips_all_fields() {
        let (_dir, store) = temp_store();
        let profile = Profile::new(10, "satoshi")
            .with_display_name("Satoshi")
            .with_description("p2p cash")
            .with_follower_count(21_000_000)
            .with_pinned_url("https://bitcoin.org")
            .with_profile_url("https://x.com/satoshi");

        store.seed_account(&profile).unwrap();

        assert_eq!(store.get_account(AccountId(10)).unwrap(), Some(profile));
    }

    #[test]
    fn get_missing_account_returns_none() {
        let (_dir, store) = temp_store();

        assert!(store.get_account(AccountId(404)).unwrap().is_none());
    }

    #[test]
    fn upsert_is_last_write_wins_on_every_field() {
        let (_dir, store) = temp_store();
        store
            .seed_account(
                &Profile::new(1, "old_handle")
                    .with_display_name("Old")
                    .with_description("old bio")
                    .with_follower_count(5)
                    .with_pinned_url("https://old.example"),
            )
            .unwrap();

        let renamed = Profile::new(1, "new_handle").with_follower_count(6);
        store.seed_account(&renamed).unwrap();

        // Fields absent from the newer snapshot are cleared, not merged.
        assert_eq!(store.get_account(AccountId(1)).unwrap(), Some(renamed));
        assert_eq!(store.stats().unwrap().account_count, 1);
    }

    #[test]
    fn find_by_handle_returns_every_holder_of_the_handle() {
        let (_dir, store) = temp_store();
        store
            .seed_account(&Profile::new(1, "shared").with_follower_count(1))
            .unwrap();
        store
            .seed_account(&Profile::new(2, "shared").with_follower_count(2))
            .unwrap();
        store.seed_account(&Profile::new(3, "other")).unwrap();

        let found = store.find_by_handle("@shared").unwrap();

        let ids: Vec<_> = found.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![AccountId(2), AccountId(1)]);
    }

    #[test]
    fn delete_account_cascades_to_edges_in_both_directions() {
        let (_dir, store) = temp_store();
        store.seed_account(&Profile::new(1, "a")).unwrap();
        store.seed_account(&Profile::new(2, "b")).unwrap();
        store
            .ingest_branch(AccountId(1), &[Profile::new(3, "c")])
            .unwrap();
        store
            .ingest_branch(AccountId(2), &[Profile::new(1, "a"), Profile::new(3, "c")])
            .unwrap();
        assert_eq!(store.stats().unwrap().follow_count, 3);

        assert!(store.delete_account(AccountId(1)).unwrap());

        let stats = store.stats().unwrap();
        assert_eq!(stats.account_count, 2);
        // Only 2 -> 3 survives: 1 -> 3 and 2 -> 1 both touched account 1.
        assert_eq!(stats.follow_count, 1);
        assert!(!store.delete_account(AccountId(1)).unwrap());
    }
}
