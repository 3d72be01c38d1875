//! Command implementations

pub mod diff;
pub mod sync;

pub use diff::run_diff;
pub use sync::run_sync;

use std::fs;
use std::path::Path;

use docsync_collection::{Collection, ParseOptions, Snapshot, parse_collection};
use docsync_content::{BlockName, BlockSet, normalize_newlines};
use docsync_core::json::hash_str;
use docsync_diff::SourceDescriptor;
use tracing::{debug, warn};

use crate::error::{CliError, Result};

/// Everything both commands need: the raw page, its parsed blocks, and the
/// baseline/current snapshots with their source descriptors.
pub(crate) struct Sources {
    pub html: String,
    pub blocks: BlockSet,
    pub baseline_snapshot: Snapshot,
    pub current_snapshot: Snapshot,
    pub baseline_source: SourceDescriptor,
    pub current_source: SourceDescriptor,
}

fn read_required(path: &str) -> Result<String> {
    if !Path::new(path).exists() {
        return Err(CliError::user(format!("Required file not found: {path}")));
    }
    Ok(fs::read_to_string(path)?)
}

/// Load and parse both sources. Baseline and current snapshots are parsed
/// against the same document context so endpoint ids line up across the
/// diff. A missing or unreadable baseline falls back to the current
/// collection, which yields an all-zero diff.
pub(crate) fn load_sources(
    collection_path: &str,
    html_path: &str,
    baseline_path: Option<&str>,
) -> Result<Sources> {
    let html = normalize_newlines(&read_required(html_path)?);
    let blocks = BlockSet::parse(&html)?;

    let collection_raw = read_required(collection_path)?;
    let current_collection: Collection = serde_json::from_str(&collection_raw)?;

    let baseline_raw = baseline_path.and_then(|path| match fs::read_to_string(path) {
        Ok(raw) => Some(raw),
        Err(error) => {
            warn!(path, %error, "baseline unreadable; using current collection");
            None
        }
    });
    let baseline_collection: Collection = match &baseline_raw {
        Some(raw) => serde_json::from_str(raw)?,
        None => current_collection.clone(),
    };

    let options = ParseOptions {
        current_api_data: blocks
            .value(BlockName::ApiData)
            .as_object()
            .cloned()
            .unwrap_or_default(),
        current_examples: blocks
            .value(BlockName::Examples)
            .as_object()
            .cloned()
            .unwrap_or_default(),
    };
    debug!(
        api_data = options.current_api_data.len(),
        examples = options.current_examples.len(),
        "parsed document context"
    );

    let current_snapshot = parse_collection(&current_collection, &options);
    let baseline_snapshot = parse_collection(&baseline_collection, &options);

    let baseline_source = SourceDescriptor {
        label: match (&baseline_raw, baseline_path) {
            (Some(_), Some(path)) => path.to_string(),
            _ => "fallback-current".to_string(),
        },
        file_hash: hash_str(baseline_raw.as_deref().unwrap_or(&collection_raw)),
        collection_path: collection_path.to_string(),
    };
    let current_source = SourceDescriptor {
        label: collection_path.to_string(),
        file_hash: hash_str(&collection_raw),
        collection_path: collection_path.to_string(),
    };

    Ok(Sources {
        html,
        blocks,
        baseline_snapshot,
        current_snapshot,
        baseline_source,
        current_source,
    })
}
