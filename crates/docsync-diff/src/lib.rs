//! Snapshot diffing for docsync
//!
//! [`diff_snapshots`] is a pure function over a baseline and current
//! [`Snapshot`]: key-based set differences per domain, field-level change
//! classification for endpoints, and a derived list of presentation blocks
//! whose content must be rewritten.

pub mod report;

use std::collections::BTreeMap;

use docsync_core::json::hash_object;
use docsync_collection::{Endpoint, Snapshot, StatusCodeEntry, WelcomeContent};
use serde_json::json;

pub use report::{
    CategoryChanges, ContentHashes, DiffReport, DiffSummary, EndpointChange, EndpointChanges,
    ErrorCodeChange, ErrorCodeChanges, SourceDescriptor, WelcomeChanges,
};

/// Fields compared individually on the welcome content, by serialized name.
const WELCOME_SECTIONS: [&str; 6] = [
    "title",
    "subtitle",
    "guidelinesLeft",
    "guidelinesRight",
    "supportCards",
    "baseUrl",
];

fn endpoint_change_types(before: &Endpoint, after: &Endpoint) -> Vec<String> {
    let mut types = Vec::new();
    if before.method != after.method {
        types.push("method".to_string());
    }
    if before.path != after.path {
        types.push("path".to_string());
    }
    if before.params != after.params {
        types.push("params".to_string());
    }
    if before.description != after.description {
        types.push("description".to_string());
    }
    if before.examples != after.examples {
        types.push("examples".to_string());
    }
    if before.category_id != after.category_id {
        types.push("category".to_string());
    }
    types
}

fn welcome_section(welcome: &WelcomeContent, section: &str) -> serde_json::Value {
    match section {
        "title" => json!(welcome.title),
        "subtitle" => json!(welcome.subtitle),
        "guidelinesLeft" => json!(welcome.guidelines_left),
        "guidelinesRight" => json!(welcome.guidelines_right),
        "supportCards" => json!(welcome.support_cards),
        "baseUrl" => json!(welcome.base_url),
        _ => serde_json::Value::Null,
    }
}

fn index_by_code(entries: &[StatusCodeEntry]) -> BTreeMap<String, &StatusCodeEntry> {
    entries.iter().map(|entry| (entry.code.clone(), entry)).collect()
}

fn content_hash(snapshot: &Snapshot) -> String {
    hash_object(&json!({
        "apiData": snapshot.api_data,
        "examples": snapshot.examples,
        "errorCodes": snapshot.error_codes,
        "welcomeContent": snapshot.welcome_content,
    }))
}

/// Compare two snapshots domain by domain.
///
/// Endpoint and error lists are sorted so repeated runs over the same
/// inputs produce byte-identical reports. The release-notes block is
/// always flagged changed: every sync run appends an entry to it.
pub fn diff_snapshots(
    baseline: &Snapshot,
    current: &Snapshot,
    baseline_source: SourceDescriptor,
    current_source: SourceDescriptor,
) -> DiffReport {
    let baseline_categories: BTreeMap<&str, _> = baseline
        .categories
        .iter()
        .map(|c| (c.id.as_str(), c))
        .collect();
    let current_categories: BTreeMap<&str, _> = current
        .categories
        .iter()
        .map(|c| (c.id.as_str(), c))
        .collect();

    let mut categories = CategoryChanges::default();
    for (id, category) in &current_categories {
        match baseline_categories.get(id) {
            None => categories.added.push((*id).to_string()),
            Some(previous) if previous != category => {
                categories.changed.push((*id).to_string());
            }
            Some(_) => {}
        }
    }
    for id in baseline_categories.keys() {
        if !current_categories.contains_key(id) {
            categories.removed.push((*id).to_string());
        }
    }

    let baseline_endpoints: BTreeMap<&str, &Endpoint> = baseline
        .endpoints
        .iter()
        .map(|e| (e.id.as_str(), e))
        .collect();
    let current_endpoints: BTreeMap<&str, &Endpoint> = current
        .endpoints
        .iter()
        .map(|e| (e.id.as_str(), e))
        .collect();

    let mut endpoints = EndpointChanges::default();
    for (id, endpoint) in &current_endpoints {
        match baseline_endpoints.get(id) {
            None => endpoints.added.push((*id).to_string()),
            Some(previous) => {
                let change_types = endpoint_change_types(previous, endpoint);
                if !change_types.is_empty() {
                    endpoints.changed.push(EndpointChange {
                        id: (*id).to_string(),
                        change_types,
                    });
                }
            }
        }
    }
    for id in baseline_endpoints.keys() {
        if !current_endpoints.contains_key(id) {
            endpoints.removed.push((*id).to_string());
        }
    }
    endpoints.added.sort();
    endpoints.removed.sort();
    endpoints.changed.sort_by(|a, b| a.id.cmp(&b.id));

    let baseline_status = index_by_code(&baseline.error_codes.status_codes);
    let current_status = index_by_code(&current.error_codes.status_codes);

    let mut error_codes = ErrorCodeChanges::default();
    for (code, entry) in &current_status {
        match baseline_status.get(code) {
            None => error_codes.added.push((*entry).clone()),
            Some(previous) if previous != entry => {
                error_codes.changed.push(ErrorCodeChange {
                    code: code.clone(),
                    before: (*previous).clone(),
                    after: (*entry).clone(),
                });
            }
            Some(_) => {}
        }
    }
    for (code, entry) in &baseline_status {
        if !current_status.contains_key(code) {
            error_codes.removed.push((*entry).clone());
        }
    }

    let changed_sections: Vec<String> = WELCOME_SECTIONS
        .iter()
        .filter(|section| {
            welcome_section(&baseline.welcome_content, section)
                != welcome_section(&current.welcome_content, section)
        })
        .map(|section| section.to_string())
        .collect();

    let mut html_blocks_changed = Vec::new();
    if baseline.api_data != current.api_data {
        html_blocks_changed.push("API_DATA".to_string());
    }
    if baseline.examples != current.examples {
        html_blocks_changed.push("EXAMPLES".to_string());
    }
    if baseline.error_codes != current.error_codes {
        html_blocks_changed.push("ERROR_CODES_CONTENT".to_string());
    }
    if baseline.welcome_content != current.welcome_content {
        html_blocks_changed.push("WELCOME_CONTENT".to_string());
    }
    html_blocks_changed.push("RELEASE_NOTES_CONTENT".to_string());

    let summary = DiffSummary {
        categories_added: categories.added.len(),
        categories_removed: categories.removed.len(),
        categories_changed: categories.changed.len(),
        endpoints_added: endpoints.added.len(),
        endpoints_removed: endpoints.removed.len(),
        endpoints_changed: endpoints.changed.len(),
        error_codes_added: error_codes.added.len(),
        error_codes_removed: error_codes.removed.len(),
        error_codes_changed: error_codes.changed.len(),
        welcome_sections_changed: changed_sections.len(),
    };

    DiffReport {
        baseline: baseline_source,
        current: current_source,
        summary,
        categories,
        endpoints,
        error_codes,
        welcome: WelcomeChanges {
            changed_sections,
        },
        html_blocks_changed,
        hashes: ContentHashes {
            baseline: content_hash(baseline),
            current: content_hash(current),
        },
    }
}
