//! Followgraph CLI - Crawl follow lists and intersect them from the command line.
//!
//! Followgraph fetches the accounts a root account follows, stores them as a
//! directed graph in `SQLite`, and lists the accounts a group of roots all
//! follow.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use followgraph::Config;
use followgraph::config::CONFIG_FILE_NAME;
use tracing_subscriber::EnvFilter;

mod cli;

/// Followgraph: follow-graph ingestion and intersection.
#[derive(Parser)]
#[command(name = "followgraph")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to ./followgraph.yaml; missing means defaults)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Store a root account so its branch can be crawled
    Seed {
        /// Account id
        id: String,

        /// Current handle (screen name), with or without '@'
        handle: String,

        /// Display name
        #[arg(long)]
        name: Option<String>,

        /// Follower count
        #[arg(long)]
        followers: Option<i64>,
    },

    /// Fetch and ingest the following lists of seeded accounts
    Crawl {
        /// Account ids to crawl
        #[arg(required = true)]
        ids: Vec<String>,

        /// Also archive the fetched branches to this JSONL file
        #[arg(short, long)]
        snapshot: Option<PathBuf>,
    },

    /// Ingest branches from a snapshot file
    Replay {
        /// Snapshot file written by `crawl --snapshot`
        snapshot: PathBuf,
    },

    /// List accounts followed by all of the given accounts
    Common {
        /// Account ids to intersect
        #[arg(required = true)]
        ids: Vec<String>,

        /// Maximum number of results
        #[arg(short, long, default_value = "50")]
        limit: usize,
    },

    /// Show a stored account by id or @handle
    Show {
        /// Account id or @handle
        account: String,
    },

    /// Show graph statistics
    Stats,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));

    let result = match cli.command {
        Commands::Init { force } => cli::init::run(&config_path, force).await,
        command => match Config::load(&config_path).await {
            Ok(config) => run(&config, command).await,
            Err(e) => Err(e),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            // Show cause chain for nested errors
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  {}: {cause}", "caused by".dimmed());
                source = std::error::Error::source(cause);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(config: &Config, command: Commands) -> followgraph::Result<()> {
    match command {
        Commands::Init { .. } => Ok(()),
        Commands::Seed {
            id,
            handle,
            name,
            followers,
        } => cli::seed::run(config, &id, &handle, name, followers),
        Commands::Crawl { ids, snapshot } => {
            cli::crawl::run(config, &ids, snapshot.as_deref()).await
        }
        Commands::Replay { snapshot } => cli::replay::run(config, &snapshot).await,
        Commands::Common { ids, limit } => cli::common::run(config, &ids, limit),
        Commands::Show { account } => cli::show::run(config, &account),
        Commands::Stats => cli::stats::run(config),
    }
}
