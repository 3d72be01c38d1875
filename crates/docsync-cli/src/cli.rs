//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};

/// Docsync - Keep an HTML documentation page in step with its API collection
#[derive(Parser, Debug)]
#[command(name = "docsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Sync the documentation page from the collection
    ///
    /// Parses both sources, diffs the derived snapshots, prepends a release
    /// note to the page, and writes the diff artifacts. Only the release
    /// notes block is rewritten; the curated documentation blocks are left
    /// untouched.
    Sync {
        /// Path to the collection JSON
        #[arg(long)]
        collection: String,

        /// Path to the HTML documentation page
        #[arg(long)]
        html: String,

        /// Path to a baseline collection JSON; defaults to the current
        /// collection, which yields an all-zero diff
        #[arg(long)]
        baseline: Option<String>,

        /// Release version recorded in the release notes
        #[arg(long)]
        release_version: String,

        /// Release date; defaults to today (UTC)
        #[arg(long)]
        release_date: Option<String>,

        /// Release section title
        #[arg(long)]
        release_title: String,

        /// Directory for diff artifacts
        #[arg(long, default_value = "artifacts")]
        artifacts_dir: String,

        /// Compute everything but write no files
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the structural diff between baseline and current snapshots
    Diff {
        /// Path to the collection JSON
        #[arg(long)]
        collection: String,

        /// Path to the HTML documentation page
        #[arg(long)]
        html: String,

        /// Path to a baseline collection JSON
        #[arg(long)]
        baseline: Option<String>,
    },
}
