//! Splicing re-serialized blocks back into the document

use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use crate::block::{BlockName, BlockSet};
use crate::codec::serialize_block;

/// Replace the spans of the given blocks with their new values, leaving
/// every other byte of the document untouched.
///
/// Splices are applied in descending offset order so earlier replacements
/// never invalidate later offsets.
pub fn apply_updates(
    document: &str,
    blocks: &BlockSet,
    updates: &BTreeMap<BlockName, Value>,
) -> String {
    let mut patches: Vec<(usize, usize, String)> = updates
        .iter()
        .filter_map(|(name, value)| {
            let block = blocks.get(*name)?;
            let text = serialize_block(*name, value, &block.indent);
            Some((block.replace_start, block.replace_end, text))
        })
        .collect();
    patches.sort_by(|a, b| b.0.cmp(&a.0));

    let mut result = document.to_string();
    for (start, end, text) in patches {
        debug!(start, end, "splicing block");
        result.replace_range(start..end, &text);
    }
    result
}
