//! # Followgraph: Social Follow-Graph Ingestion and Intersection
//!
//! Followgraph retrieves the accounts a given account follows from a
//! cursor-paginated remote listing, merges each retrieved list into a
//! persistent directed graph stored in `SQLite`, and answers intersection
//! queries: which accounts are followed by *all* of a set of source accounts,
//! ranked by popularity.
//!
//! ## Design Philosophy
//!
//! - **Store is the truth** - Every vertex and edge lives in `SQLite`; nothing is cached in memory
//! - **Constraints validate** - Missing roots and self-follows are rejected by the schema, not by pre-checks
//! - **All or nothing** - A fetch fails as a whole, a branch commits as a whole
//! - **Embeddable** - Library first, CLI second
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use std::time::Duration;
//!
//! use followgraph::{
//!     AccountId, FollowGraphOps, FriendsListClient, GraphStore, Profile, Session,
//!     fetch_following,
//! };
//!
//! # async fn example() -> followgraph::Result<()> {
//! let store = GraphStore::open(Path::new("followgraph.db"))?;
//! let root = AccountId(1_312_083_283);
//! store.seed_account(&Profile::new(root, "zxocw"))?;
//!
//! let session = Session::load(Path::new("session.yaml"))?;
//! let client = FriendsListClient::new(
//!     followgraph::DEFAULT_BASE_URL,
//!     followgraph::DEFAULT_PAGE_SIZE,
//!     Duration::from_secs(30),
//!     &session,
//! )?;
//!
//! let profiles = fetch_following(&client, root).await?;
//! let stats = store.ingest_branch(root, &profiles)?;
//! println!("{} new edges", stats.edges_created);
//!
//! for account in store.common_followees(&[root, AccountId(12)])? {
//!     println!("@{}", account.handle);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod crawl;
mod db;
mod error;
pub mod fetch;
mod graph;
pub mod snapshot;
mod types;

pub use config::{Config, EndpointConfig};
pub use crawl::{CrawlOutcome, Crawler};
pub use db::GraphStore;
pub use error::{Error, Result};
pub use fetch::{
    Cursor, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE, FriendsListClient, PAGE_COOLDOWN, Page,
    PageSource, Session, fetch_following,
};
pub use graph::{FollowGraphOps, distinct_ids};
pub use snapshot::{read_snapshot, replay, write_snapshot};
pub use types::{AccountId, Branch, BranchStats, Degree, GraphStats, Profile};
