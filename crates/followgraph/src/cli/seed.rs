//! `followgraph seed` command implementation.

use colored::Colorize;
use followgraph::{AccountId, Config, Profile};

use super::open_store;

/// Run the seed command.
pub fn run(
    config: &Config,
    id: &str,
    handle: &str,
    name: Option<String>,
    followers: Option<i64>,
) -> Result<(), followgraph::Error> {
    let id: AccountId = id.parse()?;
    let handle = handle.strip_prefix('@').unwrap_or(handle);
    if handle.is_empty() {
        return Err(followgraph::Error::Config("handle must not be empty".to_string()));
    }

    let mut profile =
        Profile::new(id, handle).with_profile_url(format!("https://x.com/{handle}"));
    profile.display_name = name;
    profile.follower_count = followers;

    let store = open_store(config)?;
    store.seed_account(&profile)?;

    println!(
        "{} @{} ({})",
        "Seeded".green().bold(),
        handle.cyan(),
        id
    );
    Ok(())
}
