//! Common display utilities for CLI commands.

use colored::Colorize;
use followgraph::Profile;

/// Print one account as a ranked list entry.
///
/// ```text
///   1. @jack (jack) 6.5M followers
///      https://x.com/jack
/// ```
pub fn print_ranked(rank: usize, profile: &Profile) {
    let name = profile
        .display_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .map(|name| format!(" ({name})"))
        .unwrap_or_default();

    println!(
        "  {:>3}. {}{} {}",
        rank,
        format!("@{}", profile.handle).cyan(),
        name,
        format_followers(profile.follower_count).dimmed()
    );

    if let Some(url) = &profile.profile_url {
        println!("       {}", url.dimmed());
    }
}

/// Human-readable follower count: `6.5M followers`, `unknown followers`.
#[allow(clippy::cast_precision_loss)]
pub fn format_followers(count: Option<i64>) -> String {
    const THOUSAND: i64 = 1_000;
    const MILLION: i64 = 1_000_000;

    match count {
        None => "unknown followers".to_string(),
        Some(n) if n >= MILLION => format!("{:.1}M followers", n as f64 / MILLION as f64),
        Some(n) if n >= THOUSAND => format!("{:.1}K followers", n as f64 / THOUSAND as f64),
        Some(1) => "1 follower".to_string(),
        Some(n) => format!("{n} followers"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follower_counts_are_abbreviated() {
        assert_eq!(format_followers(None), "unknown followers");
        assert_eq!(format_followers(Some(1)), "1 follower");
        assert_eq!(format_followers(Some(999)), "999 followers");
        assert_eq!(format_followers(Some(6_500_000)), "6.5M followers");
        assert_eq!(format_followers(Some(12_300)), "12.3K followers");
    }
}
