//! Unified row registry
//!
//! Flattens both sources into one deterministic list of rows: per-endpoint
//! detail fields, per-endpoint example arrays, welcome fields, and the two
//! error-catalog arrays. Row order is stable across runs so resolution
//! maps keyed by [`row_key`] stay valid.

use std::collections::BTreeSet;

use docsync_collection::Snapshot;
use docsync_content::{BlockName, BlockSet};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::classify::{RowState, classify_row};

/// Which presentation block a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RowBlock {
    #[serde(rename = "apiData")]
    ApiData,
    #[serde(rename = "examples")]
    Examples,
    #[serde(rename = "welcome")]
    Welcome,
    #[serde(rename = "errorCodes")]
    ErrorCodes,
}

impl RowBlock {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowBlock::ApiData => "apiData",
            RowBlock::Examples => "examples",
            RowBlock::Welcome => "welcome",
            RowBlock::ErrorCodes => "errorCodes",
        }
    }
}

/// One comparable unit across the two sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedRow {
    pub id: String,
    pub block: RowBlock,
    pub field: String,
    /// Collection-side value, `Null` when absent.
    pub spec: Value,
    /// Document-side value, `Null` when absent.
    pub doc: Value,
    pub state: RowState,
}

/// Key under which a row's resolution is stored.
pub fn row_key(row: &UnifiedRow) -> String {
    format!("{}::{}::{}", row.block.as_str(), row.id, row.field)
}

/// Detail-record ids that are hand-maintained pages, not endpoints.
const STATIC_PAGES: [&str; 4] = ["welcome", "collection", "error-codes", "release-notes"];

/// Endpoint fields tracked row-by-row, in emission order.
const ENDPOINT_FIELDS: [&str; 7] = [
    "title",
    "description",
    "method",
    "path",
    "breadcrumb",
    "params",
    "getStarted",
];

/// Welcome fields tracked row-by-row, in emission order.
const WELCOME_FIELDS: [&str; 6] = [
    "title",
    "subtitle",
    "baseUrl",
    "guidelinesLeft",
    "guidelinesRight",
    "supportCards",
];

fn field_of(record: &Value, field: &str) -> Value {
    record.get(field).cloned().unwrap_or(Value::Null)
}

fn push_row(rows: &mut Vec<UnifiedRow>, id: &str, block: RowBlock, field: &str, spec: Value, doc: Value) {
    let state = classify_row(&spec, &doc);
    rows.push(UnifiedRow {
        id: id.to_string(),
        block,
        field: field.to_string(),
        spec,
        doc,
        state,
    });
}

/// Build the registry from a freshly parsed snapshot and the document's
/// parsed blocks.
pub fn build_unified_registry(snapshot: &Snapshot, blocks: &BlockSet) -> Vec<UnifiedRow> {
    let mut rows = Vec::new();

    let doc_api_data = blocks.value(BlockName::ApiData);
    let empty = serde_json::Map::new();
    let doc_api_map = doc_api_data.as_object().unwrap_or(&empty);

    let mut endpoint_ids: BTreeSet<&str> = snapshot.api_data.keys().map(String::as_str).collect();
    endpoint_ids.extend(doc_api_map.keys().map(String::as_str));
    for page in STATIC_PAGES {
        endpoint_ids.remove(page);
    }

    for id in endpoint_ids {
        let spec_record = snapshot.api_data.get(id).cloned().unwrap_or(Value::Null);
        let doc_record = doc_api_map.get(id).cloned().unwrap_or(Value::Null);
        for field in ENDPOINT_FIELDS {
            push_row(
                &mut rows,
                id,
                RowBlock::ApiData,
                field,
                field_of(&spec_record, field),
                field_of(&doc_record, field),
            );
        }
    }

    let doc_examples = blocks.value(BlockName::Examples);
    let doc_examples_map = doc_examples.as_object().unwrap_or(&empty);
    let mut example_ids: BTreeSet<&str> = snapshot.examples.keys().map(String::as_str).collect();
    example_ids.extend(doc_examples_map.keys().map(String::as_str));

    for id in example_ids {
        push_row(
            &mut rows,
            id,
            RowBlock::Examples,
            "examples",
            snapshot.examples.get(id).cloned().unwrap_or(Value::Null),
            doc_examples_map.get(id).cloned().unwrap_or(Value::Null),
        );
    }

    let spec_welcome = json!(snapshot.welcome_content);
    let doc_welcome = blocks.value(BlockName::WelcomeContent);
    for field in WELCOME_FIELDS {
        push_row(
            &mut rows,
            "welcome",
            RowBlock::Welcome,
            field,
            field_of(&spec_welcome, field),
            field_of(doc_welcome, field),
        );
    }

    let spec_errors = json!(snapshot.error_codes);
    let doc_errors = blocks.value(BlockName::ErrorCodesContent);
    for field in ["statusCodes", "httpCodes"] {
        push_row(
            &mut rows,
            "error-codes",
            RowBlock::ErrorCodes,
            field,
            field_of(&spec_errors, field),
            field_of(doc_errors, field),
        );
    }

    rows
}
