//! `followgraph common` command implementation.

use colored::Colorize;
use followgraph::{Config, FollowGraphOps, distinct_ids};

use super::display::print_ranked;
use super::{open_store, parse_ids};

/// Run the common command.
pub fn run(config: &Config, raw_ids: &[String], limit: usize) -> Result<(), followgraph::Error> {
    let ids = distinct_ids(&parse_ids(raw_ids)?);
    let store = open_store(config)?;

    let common = store.common_followees(&ids)?;

    if common.is_empty() {
        println!("No account is followed by all {} accounts", ids.len());

        // Point at roots that have nothing stored yet
        let uncrawled: Vec<String> = ids
            .iter()
            .map(|&id| store.following(id).map(|f| (id, f.is_empty())))
            .collect::<followgraph::Result<Vec<_>>>()?
            .into_iter()
            .filter(|(_, empty)| *empty)
            .map(|(id, _)| id.to_string())
            .collect();
        if !uncrawled.is_empty() {
            println!(
                "\n{}: no stored following for {}. Run '{}' first.",
                "hint".dimmed(),
                uncrawled.join(", "),
                "followgraph crawl".cyan()
            );
        }
        return Ok(());
    }

    println!(
        "{} accounts followed by all of {}:",
        common.len().to_string().green().bold(),
        ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    );
    println!();

    for (rank, profile) in common.iter().take(limit).enumerate() {
        print_ranked(rank + 1, profile);
    }

    if common.len() > limit {
        println!("  {} ... and {} more", "•".dimmed(), common.len() - limit);
    }

    Ok(())
}
