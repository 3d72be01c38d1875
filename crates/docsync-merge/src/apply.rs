//! Applying resolutions to both sources.

use std::collections::{BTreeMap, HashMap};

use docsync_core::path::set_at_path;
use docsync_core::text::slugify;
use docsync_content::{BlockName, BlockSet, apply_updates};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use crate::registry::{RowBlock, UnifiedRow, row_key};

/// Where a row's resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionSource {
    /// Leave both sources alone for this row.
    Unchanged,
    /// Collection value wins; written to the document block.
    Spec,
    /// Document value wins; written back to the collection where possible.
    Doc,
    /// Hand-edited value; written to both sources.
    Custom,
}

/// A resolved value for one registry row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub resolved: Value,
    pub source: ResolutionSource,
}

/// Both updated sources after a merge.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    /// Collection re-serialized with two-space indentation.
    pub collection_json: String,
    pub document_text: String,
}

fn value_as_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The slug the parser would assign this request when no prior record
/// pins it: display name, else `METHOD-rawUrl`. No collision suffixes
/// here, so back-writes to duplicate-named requests hit the first one.
fn request_slug(item: &Value) -> Option<String> {
    let request = item.get("request")?;
    let name = item.get("name").and_then(Value::as_str).unwrap_or("");
    if !name.is_empty() {
        return Some(slugify(name));
    }
    let method = request
        .get("method")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .unwrap_or("GET")
        .to_uppercase();
    let raw_url = request
        .get("url")
        .and_then(|url| match url {
            Value::String(raw) => Some(raw.as_str()),
            other => other.get("raw").and_then(Value::as_str),
        })
        .unwrap_or("");
    Some(slugify(&format!("{method}-{raw_url}")))
}

/// Depth-first search for the request item whose derived slug matches.
fn find_request_item<'a>(items: &'a mut Vec<Value>, target_id: &str) -> Option<&'a mut Value> {
    for index in 0..items.len() {
        let is_folder = items[index]
            .get("item")
            .map(Value::is_array)
            .unwrap_or(false);
        if is_folder {
            let found = {
                let children = items[index]
                    .get_mut("item")
                    .and_then(Value::as_array_mut)?;
                find_request_item(children, target_id).is_some()
            };
            if found {
                let children = items[index]
                    .get_mut("item")
                    .and_then(Value::as_array_mut)?;
                return find_request_item(children, target_id);
            }
            continue;
        }
        if items[index].get("request").is_none() {
            continue;
        }
        if request_slug(&items[index]).as_deref() == Some(target_id) {
            return Some(&mut items[index]);
        }
    }
    None
}

/// Best-effort back-write of a resolved value into the collection. Only
/// descriptions and example bodies/names have a write target; structural
/// fields would break the request and are skipped.
fn write_to_collection(collection: &mut Value, row: &UnifiedRow, resolved: &Value) {
    let Some(items) = collection.get_mut("item").and_then(Value::as_array_mut) else {
        return;
    };
    let Some(target) = find_request_item(items, &row.id) else {
        debug!(id = %row.id, "no collection request matches; skipping back-write");
        return;
    };

    match row.block {
        RowBlock::ApiData => {
            if row.field == "description" {
                if let Some(request) = target.get_mut("request") {
                    if let Some(map) = request.as_object_mut() {
                        map.insert("description".to_string(), json!(value_as_text(resolved)));
                    }
                }
            }
        }
        RowBlock::Examples => {
            let Some(examples) = resolved.as_array() else {
                return;
            };
            let Some(responses) = target.get_mut("response").and_then(Value::as_array_mut) else {
                return;
            };
            for (index, example) in examples.iter().enumerate() {
                let Some(response) = responses.get_mut(index).and_then(Value::as_object_mut)
                else {
                    break;
                };
                let body = example.get("response").cloned().unwrap_or(Value::Null);
                response.insert("body".to_string(), json!(value_as_text(&body)));
                if let Some(title) = example.get("title").and_then(Value::as_str) {
                    if !title.is_empty() {
                        response.insert("name".to_string(), json!(title));
                    }
                }
            }
        }
        _ => {}
    }
}

/// Apply every non-`unchanged` resolution and re-serialize both sources.
///
/// Document-side writes go into clones of the four managed block values
/// and are spliced in one pass; the release-notes block is untouched.
/// Collection-side writes are best-effort and silently skipped when no
/// request matches the row's id.
pub fn apply_resolutions(
    registry: &[UnifiedRow],
    resolutions: &HashMap<String, Resolution>,
    collection: &Value,
    document_text: &str,
    blocks: &BlockSet,
) -> MergeOutcome {
    let mut collection = collection.clone();

    let mut api_data = blocks.value(BlockName::ApiData).clone();
    if !api_data.is_object() {
        api_data = json!({});
    }
    let mut examples = blocks.value(BlockName::Examples).clone();
    if !examples.is_object() {
        examples = json!({});
    }
    let mut welcome = blocks.value(BlockName::WelcomeContent).clone();
    if !welcome.is_object() {
        welcome = json!({});
    }
    let mut error_codes = blocks.value(BlockName::ErrorCodesContent).clone();
    if !error_codes.is_object() {
        error_codes = json!({});
    }

    for row in registry {
        let Some(resolution) = resolutions.get(&row_key(row)) else {
            continue;
        };
        if resolution.source == ResolutionSource::Unchanged {
            continue;
        }

        let write_doc = matches!(
            resolution.source,
            ResolutionSource::Spec | ResolutionSource::Custom
        );
        if write_doc {
            match row.block {
                RowBlock::ApiData => {
                    if let Some(map) = api_data.as_object_mut() {
                        let record = map.entry(row.id.clone()).or_insert_with(|| json!({}));
                        set_at_path(record, &row.field, resolution.resolved.clone());
                    }
                }
                RowBlock::Examples => {
                    if let Some(map) = examples.as_object_mut() {
                        map.insert(row.id.clone(), resolution.resolved.clone());
                    }
                }
                RowBlock::Welcome => {
                    set_at_path(&mut welcome, &row.field, resolution.resolved.clone());
                }
                RowBlock::ErrorCodes => {
                    set_at_path(&mut error_codes, &row.field, resolution.resolved.clone());
                }
            }
        }

        let write_spec = matches!(
            resolution.source,
            ResolutionSource::Doc | ResolutionSource::Custom
        );
        if write_spec {
            match row.block {
                RowBlock::ApiData | RowBlock::Examples => {
                    write_to_collection(&mut collection, row, &resolution.resolved);
                }
                RowBlock::Welcome => {
                    // Approximate targets: the collection has no welcome
                    // page, only a display name and a description.
                    if let Some(info) = collection.get_mut("info").and_then(Value::as_object_mut) {
                        if row.field == "title" {
                            info.insert(
                                "name".to_string(),
                                json!(value_as_text(&resolution.resolved)),
                            );
                        }
                        if row.field == "subtitle" {
                            info.insert(
                                "description".to_string(),
                                json!(value_as_text(&resolution.resolved)),
                            );
                        }
                    }
                }
                // Error codes are derived from response bodies; there is
                // no direct write target in the collection.
                RowBlock::ErrorCodes => {}
            }
        }
    }

    let mut updates: BTreeMap<BlockName, Value> = BTreeMap::new();
    updates.insert(BlockName::ApiData, api_data);
    updates.insert(BlockName::Examples, examples);
    updates.insert(BlockName::WelcomeContent, welcome);
    updates.insert(BlockName::ErrorCodesContent, error_codes);
    let document_text = apply_updates(document_text, blocks, &updates);

    MergeOutcome {
        collection_json: serde_json::to_string_pretty(&collection).unwrap_or_default(),
        document_text,
    }
}
