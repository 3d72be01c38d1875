//! Release notes maintenance
//!
//! Every sync run prepends one entry to the release notes block. Entries
//! are keyed by version: re-running a sync for the same version replaces
//! its entry instead of stacking duplicates, and the list is capped at 30.

use docsync_diff::DiffReport;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

const MAX_ENTRIES: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseSection {
    pub title: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseEntry {
    pub version: String,
    pub date: String,
    pub tag: String,
    pub sections: Vec<ReleaseSection>,
}

impl ReleaseEntry {
    pub fn is_change(&self) -> bool {
        self.tag == "Latest"
    }
}

/// Build the entry for one sync run from its diff summary.
pub fn build_release_entry(
    version: &str,
    date: &str,
    title: &str,
    diff: &DiffReport,
) -> ReleaseEntry {
    let endpoint_changes = diff.summary.endpoints_added
        + diff.summary.endpoints_removed
        + diff.summary.endpoints_changed;
    let delta_line = format!(
        "API delta: +{} / -{} / ~{}, errors ~{}, welcome ~{}",
        diff.summary.endpoints_added,
        diff.summary.endpoints_removed,
        diff.summary.endpoints_changed,
        diff.summary.error_codes_changed,
        diff.summary.welcome_sections_changed,
    );

    ReleaseEntry {
        version: version.to_string(),
        date: date.to_string(),
        tag: if endpoint_changes > 0 {
            "Latest".to_string()
        } else {
            "No API Changes".to_string()
        },
        sections: vec![ReleaseSection {
            title: title.to_string(),
            items: vec![delta_line],
        }],
    }
}

/// Prepend the entry to the existing block value, replacing any prior
/// entry with the same version.
pub fn build_release_notes_content(existing: &Value, entry: &ReleaseEntry) -> Value {
    let mut items = vec![json!(entry)];
    if let Some(existing_items) = existing.get("items").and_then(Value::as_array) {
        items.extend(
            existing_items
                .iter()
                .filter(|item| item.get("version").and_then(Value::as_str) != Some(&entry.version))
                .cloned(),
        );
    }
    items.truncate(MAX_ENTRIES);
    json!({ "items": items })
}
