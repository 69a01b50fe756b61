//! `followgraph stats` command implementation.

use colored::Colorize;
use followgraph::Config;

use super::open_store;

/// Run the stats command.
pub fn run(config: &Config) -> Result<(), followgraph::Error> {
    let store = open_store(config)?;

    // Get database size
    let db_path = store.path();
    let db_size_str = match std::fs::metadata(db_path) {
        Ok(meta) => format_size(meta.len()),
        Err(e) => match e.kind() {
            std::io::ErrorKind::PermissionDenied => {
                tracing::warn!(path = %db_path.display(), "Permission denied reading database");
                "permission denied".to_string()
            }
            _ => {
                tracing::debug!(error = %e, "Failed to get database file size");
                "size unknown".to_string()
            }
        },
    };

    let stats = store.stats()?;

    println!("{}", "Followgraph Statistics".cyan().bold());
    println!();

    println!(
        "  {}: {} ({})",
        "Database".white().bold(),
        db_path.display(),
        db_size_str
    );
    println!();

    println!(
        "  {}: {}",
        "Accounts".white().bold(),
        stats.account_count.to_string().green()
    );
    println!(
        "  {}: {}",
        "Follow edges".white().bold(),
        stats.follow_count.to_string().green()
    );
    println!(
        "  {}: {}",
        "Crawled sources".white().bold(),
        stats.source_count.to_string().green()
    );

    if stats.account_count > 0 && stats.source_count == 0 {
        println!(
            "\n{}: accounts are seeded but none has been crawled. Run '{}'.",
            "hint".dimmed(),
            "followgraph crawl".cyan()
        );
    }

    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
