//! Docsync CLI
//!
//! Keeps an HTML documentation page in step with the API collection it was
//! generated from.

mod artifacts;
mod cli;
mod commands;
mod error;
mod release;

use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use commands::sync::SyncArgs;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            println!("{} Documentation sync CLI", "docsync".green().bold());
            println!();
            println!("Run {} for available commands.", "docsync --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Sync {
            collection,
            html,
            baseline,
            release_version,
            release_date,
            release_title,
            artifacts_dir,
            dry_run,
        } => {
            let release_date =
                release_date.unwrap_or_else(|| Utc::now().format("%Y-%m-%d").to_string());
            commands::run_sync(&SyncArgs {
                collection: &collection,
                html: &html,
                baseline: baseline.as_deref(),
                release_version: &release_version,
                release_date: &release_date,
                release_title: &release_title,
                artifacts_dir: &artifacts_dir,
                dry_run,
            })
        }
        Commands::Diff {
            collection,
            html,
            baseline,
        } => commands::run_diff(&collection, &html, baseline.as_deref()),
    }
}
