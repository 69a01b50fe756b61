//! `followgraph show` command implementation.

use colored::Colorize;
use followgraph::{AccountId, Config, GraphStore, Profile};

use super::display::format_followers;
use super::open_store;

/// Run the show command.
pub fn run(config: &Config, account: &str) -> Result<(), followgraph::Error> {
    let store = open_store(config)?;

    let profiles = if account.starts_with('@') {
        store.find_by_handle(account)?
    } else {
        let id: AccountId = account.parse()?;
        store.get_account(id)?.into_iter().collect()
    };

    if profiles.is_empty() {
        return Err(followgraph::Error::NotFound(format!("account {account}")));
    }

    for (i, profile) in profiles.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_account(&store, profile)?;
    }
    Ok(())
}

fn print_account(store: &GraphStore, profile: &Profile) -> Result<(), followgraph::Error> {
    let degree = store.degree(profile.id)?;

    println!(
        "{} {}",
        format!("@{}", profile.handle).cyan().bold(),
        profile.id.to_string().dimmed()
    );
    if let Some(name) = &profile.display_name {
        println!("  {}: {name}", "Name".white().bold());
    }
    if let Some(description) = profile.description.as_deref().filter(|d| !d.is_empty()) {
        println!("  {}: {description}", "Bio".white().bold());
    }
    println!(
        "  {}: {}",
        "Audience".white().bold(),
        format_followers(profile.follower_count)
    );
    if let Some(url) = &profile.pinned_url {
        println!("  {}: {url}", "Link".white().bold());
    }
    if let Some(url) = &profile.profile_url {
        println!("  {}: {url}", "Profile".white().bold());
    }
    println!(
        "  {}: {} stored, {} stored followers",
        "Following".white().bold(),
        degree.following.to_string().green(),
        degree.followers.to_string().green()
    );
    Ok(())
}
