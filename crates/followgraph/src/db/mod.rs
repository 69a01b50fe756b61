//! `SQLite` storage layer for the follow graph.
//!
//! `SQLite` is the single home of all persisted vertex and edge state. The
//! fetcher and the query engine hold nothing beyond the operation in flight.
//!
//! ## Module Structure
//!
//! - `schema` - Database schema (DDL)
//! - `helpers` - Row conversion, shared SQL fragments, constraint mapping
//! - `accounts` - Vertex upserts and lookups
//! - `branch` - Atomic branch ingest (vertices + edges in one transaction)
//! - `graph` - Adjacency and intersection queries (`FollowGraphOps`)

mod accounts;
mod branch;
mod graph;
mod helpers;
mod schema;

pub(crate) use helpers::{ACCOUNTS_COLUMNS, RANKING, row_to_profile};
pub(crate) use schema::SCHEMA;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use rusqlite::Connection;

use crate::error::{Error, Result};
use crate::types::{AccountId, Degree, GraphStats};

/// How long a writer waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// `SQLite` database wrapper for the follow graph.
///
/// The connection is wrapped in a `Mutex`; every operation acquires it for
/// exactly its own duration and releases it when the guard drops, so a
/// `GraphStore` can be shared behind an `Arc` by concurrent crawl workers and
/// readers.
pub struct GraphStore {
    conn: Mutex<Connection>,
    path: PathBuf,
}

impl std::fmt::Debug for GraphStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl GraphStore {
    /// Open or create the graph database.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created, the file
    /// cannot be opened, or the schema cannot be applied.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.busy_timeout(BUSY_TIMEOUT)?;

        conn.execute_batch(SCHEMA)?;

        tracing::debug!(path = %path.display(), "Opened graph store");

        Ok(Self {
            conn: Mutex::new(conn),
            path: path.to_path_buf(),
        })
    }

    /// Path of the underlying database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Acquire the connection lock.
    ///
    /// Returns a `MutexGuard` providing exclusive access to the underlying connection.
    /// Used internally by all database operations.
    pub(crate) fn connection(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            Error::Internal(format!(
                "database connection mutex poisoned (a thread panicked while holding the lock): {e}"
            ))
        })
    }

    /// Count stored accounts, edges and crawled sources.
    ///
    /// # Errors
    ///
    /// Returns an error if any count query fails.
    pub fn stats(&self) -> Result<GraphStats> {
        let conn = self.connection()?;

        let account_count: usize =
            conn.query_row("SELECT COUNT(*) FROM accounts", [], |row| row.get(0))?;
        let follow_count: usize =
            conn.query_row("SELECT COUNT(*) FROM follows", [], |row| row.get(0))?;
        let source_count: usize = conn.query_row(
            "SELECT COUNT(DISTINCT source_id) FROM follows",
            [],
            |row| row.get(0),
        )?;

        Ok(GraphStats {
            account_count,
            follow_count,
            source_count,
        })
    }

    /// Count the stored edges leaving and entering `account`.
    ///
    /// # Errors
    ///
    /// Returns an error if the count query fails.
    pub fn degree(&self, account: AccountId) -> Result<Degree> {
        let conn = self.connection()?;

        let (following, followers) = conn.query_row(
            "SELECT (SELECT COUNT(*) FROM follows WHERE source_id = ?1),
                    (SELECT COUNT(*) FROM follows WHERE target_id = ?1)",
            [account.as_i64()],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(Degree {
            following,
            followers,
        })
    }
}
