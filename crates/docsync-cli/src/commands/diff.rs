//! The diff command: print the structural diff without touching any file.

use docsync_diff::diff_snapshots;

use crate::commands::load_sources;
use crate::error::Result;

pub fn run_diff(collection: &str, html: &str, baseline: Option<&str>) -> Result<()> {
    let sources = load_sources(collection, html, baseline)?;
    let diff = diff_snapshots(
        &sources.baseline_snapshot,
        &sources.current_snapshot,
        sources.baseline_source,
        sources.current_source,
    );
    println!("{}", serde_json::to_string_pretty(&diff)?);
    Ok(())
}
