//! CLI command implementations.

mod display;

pub mod common;
pub mod crawl;
pub mod init;
pub mod replay;
pub mod seed;
pub mod show;
pub mod stats;

use followgraph::{AccountId, Config, GraphStore};

/// Open the graph database named in the configuration.
fn open_store(config: &Config) -> followgraph::Result<GraphStore> {
    GraphStore::open(&config.database)
}

/// Parse account ids given on the command line.
fn parse_ids(raw: &[String]) -> followgraph::Result<Vec<AccountId>> {
    raw.iter().map(|id| id.parse()).collect()
}
