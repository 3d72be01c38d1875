//! Diff report structure
//!
//! The report is the artifact persisted after every sync run; its shape is
//! part of the tool's output contract, so every field serializes with a
//! fixed camelCase name.

use docsync_collection::StatusCodeEntry;
use serde::{Deserialize, Serialize};

/// Where a snapshot came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDescriptor {
    /// Baseline file path, or `fallback-current` when no baseline exists.
    pub label: String,
    /// Hash of the raw collection text the snapshot was parsed from.
    pub file_hash: String,
    pub collection_path: String,
}

/// Per-domain change counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffSummary {
    pub categories_added: usize,
    pub categories_removed: usize,
    pub categories_changed: usize,
    pub endpoints_added: usize,
    pub endpoints_removed: usize,
    pub endpoints_changed: usize,
    pub error_codes_added: usize,
    pub error_codes_removed: usize,
    pub error_codes_changed: usize,
    pub welcome_sections_changed: usize,
}

impl DiffSummary {
    /// True when every counter is zero.
    pub fn is_empty(&self) -> bool {
        self == &DiffSummary::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryChanges {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub changed: Vec<String>,
}

/// Which endpoint fields differ between baseline and current.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointChange {
    pub id: String,
    pub change_types: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointChanges {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub changed: Vec<EndpointChange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorCodeChange {
    pub code: String,
    pub before: StatusCodeEntry,
    pub after: StatusCodeEntry,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorCodeChanges {
    pub added: Vec<StatusCodeEntry>,
    pub removed: Vec<StatusCodeEntry>,
    pub changed: Vec<ErrorCodeChange>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeChanges {
    pub changed_sections: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentHashes {
    pub baseline: String,
    pub current: String,
}

/// The full structural diff between two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffReport {
    pub baseline: SourceDescriptor,
    pub current: SourceDescriptor,
    pub summary: DiffSummary,
    pub categories: CategoryChanges,
    pub endpoints: EndpointChanges,
    pub error_codes: ErrorCodeChanges,
    pub welcome: WelcomeChanges,
    /// Presentation block names whose derived content differs; always
    /// includes the release-notes block.
    pub html_blocks_changed: Vec<String>,
    /// Order-independent content hashes of the derived documentation
    /// payloads, usable for change detection without payload comparison.
    pub hashes: ContentHashes,
}
