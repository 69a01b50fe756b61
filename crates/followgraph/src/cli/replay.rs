//! `followgraph replay` command implementation.

use std::path::Path;

use colored::Colorize;
use followgraph::{Config, read_snapshot, replay};

use super::open_store;

/// Run the replay command.
pub async fn run(config: &Config, snapshot: &Path) -> Result<(), followgraph::Error> {
    let branches = read_snapshot(snapshot).await?;
    let store = open_store(config)?;

    let stats = replay(&store, &branches)?;

    let profiles: usize = stats.iter().map(|s| s.profiles_processed).sum();
    let created: usize = stats.iter().map(|s| s.edges_created).sum();
    println!(
        "{} {} branches ({} profiles, {} new edges)",
        "Replayed".green().bold(),
        stats.len(),
        profiles,
        created
    );
    Ok(())
}
