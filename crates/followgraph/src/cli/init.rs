//! `followgraph init` command implementation.

use std::path::Path;

use colored::Colorize;
use followgraph::Config;

/// Run the init command.
pub async fn run(config_path: &Path, force: bool) -> Result<(), followgraph::Error> {
    if config_path.exists() && !force {
        return Err(followgraph::Error::Config(format!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        )));
    }

    let config = Config::default();
    config.save(config_path).await?;

    println!(
        "{} {}",
        "Wrote".green().bold(),
        config_path.display()
    );
    println!(
        "\n{}: put the request headers and cookies of a logged-in browser session in '{}'.",
        "hint".dimmed(),
        config.session_file.display().to_string().cyan()
    );

    Ok(())
}
