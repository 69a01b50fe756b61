//! `followgraph crawl` command implementation.

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use followgraph::{Config, Crawler, FriendsListClient, Session, write_snapshot};

use super::{open_store, parse_ids};

/// Run the crawl command.
///
/// Every branch is attempted. If any failed, the first failure is returned
/// after the summary has been printed and the snapshot (if requested) has
/// been written with whatever was fetched.
pub async fn run(
    config: &Config,
    raw_ids: &[String],
    snapshot: Option<&Path>,
) -> Result<(), followgraph::Error> {
    let ids = parse_ids(raw_ids)?;

    let session = Session::load(&config.session_file)?;
    let client = FriendsListClient::new(
        &config.endpoint.base_url,
        config.endpoint.page_size,
        config.endpoint.timeout(),
        &session,
    )?;
    let store = Arc::new(open_store(config)?);
    let crawler = Crawler::new(store, Arc::new(client), config.workers);

    println!(
        "{} {} accounts ({} at a time)...",
        "Crawling".cyan().bold(),
        ids.len(),
        crawler.workers()
    );

    let outcomes = crawler.crawl(&ids).await;

    println!();
    let mut fetched = Vec::new();
    let mut first_error = None;
    let mut failed = 0usize;
    for outcome in outcomes {
        match &outcome.result {
            Ok(stats) => println!(
                "  {} {}: {} following, {} new edges",
                "✓".green(),
                outcome.source_id,
                stats.profiles_processed,
                stats.edges_created
            ),
            Err(e) => {
                failed += 1;
                println!("  {} {}: {e}", "✗".red(), outcome.source_id);
            }
        }
        if let Some(branch) = outcome.fetched {
            fetched.push(branch);
        }
        if let Err(e) = outcome.result {
            first_error.get_or_insert(e);
        }
    }

    if let Some(path) = snapshot {
        write_snapshot(path, &fetched).await?;
        println!(
            "\n{} {} branches to {}",
            "Archived".green().bold(),
            fetched.len(),
            path.display()
        );
    }

    match first_error {
        Some(e) => {
            println!(
                "\n{}: {failed} of {} accounts failed",
                "Warning".yellow().bold(),
                ids.len()
            );
            Err(e)
        }
        None => Ok(()),
    }
}
