//! Collection tree traversal and snapshot assembly.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use docsync_core::json::hash_object;
use docsync_core::text::{collapse_whitespace, strip_markdown};
use regex::Regex;
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::catalog::build_error_catalog;
use crate::categories::map_category_key;
use crate::collection::{Collection, CollectionItem};
use crate::curl::build_curl;
use crate::identity::{existing_ids_by_method_path, pick_endpoint_id};
use crate::model::{Category, Endpoint, ExampleRecord, ResponseRecord, Snapshot};
use crate::paths::{extract_body_params, extract_query_params, to_path};
use crate::schema::normalize_response_schema;
use crate::welcome::build_welcome_content;

static AUTH_PATH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)auth").unwrap());

/// Detail records reserved for hand-maintained documentation pages. They
/// are carried over from the prior records verbatim, never re-derived.
pub const STATIC_PAGES: [&str; 4] = ["welcome", "collection", "error-codes", "release-notes"];

const DEFAULT_GET_STARTED: &str = "<ul><li>Authenticate first.</li><li>Validate required request fields.</li><li>Inspect response status fields.</li></ul>";

/// Prior-run context for an idempotent re-parse.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Detail records from the document's API data block.
    pub current_api_data: Map<String, Value>,
    /// Example records from the document's examples block.
    pub current_examples: Map<String, Value>,
}

/// A direct child of the collection root that contains children.
#[derive(Debug, Clone, PartialEq)]
pub struct TopFolder {
    pub id: String,
    pub key: String,
    pub name: String,
    pub description: String,
    pub order: usize,
}

fn describe_top_folders(collection: &Collection) -> Vec<TopFolder> {
    collection
        .items
        .iter()
        .filter(|item| item.is_folder())
        .enumerate()
        .map(|(index, folder)| {
            let name = folder.name.trim();
            let description = if !folder.description.trim().is_empty() {
                folder.description.trim().to_string()
            } else {
                folder
                    .request
                    .as_ref()
                    .and_then(|r| r.description.as_deref())
                    .unwrap_or("")
                    .trim()
                    .to_string()
            };
            TopFolder {
                id: format!("{}", index + 1),
                key: map_category_key(&folder.name),
                name: if name.is_empty() {
                    format!("Category {}", index + 1)
                } else {
                    name.to_string()
                },
                description,
                order: index,
            }
        })
        .collect()
}

/// Depth-first walk of the folder tree; only leaves carrying a request
/// count as endpoints.
fn collect_requests<'a>(
    items: &'a [CollectionItem],
    stack: &mut Vec<&'a CollectionItem>,
    output: &mut Vec<(&'a CollectionItem, Vec<&'a CollectionItem>)>,
) {
    for item in items {
        if let Some(children) = &item.items {
            stack.push(item);
            collect_requests(children, stack, output);
            stack.pop();
            continue;
        }
        if item.request.is_none() {
            continue;
        }
        output.push((item, stack.clone()));
    }
}

fn normalize_description(value: &str) -> String {
    collapse_whitespace(&strip_markdown(value))
}

fn resolve_description(item: &CollectionItem) -> String {
    let raw = item
        .request
        .as_ref()
        .and_then(|r| r.description.as_deref())
        .filter(|d| !d.is_empty())
        .unwrap_or(&item.description);
    normalize_description(raw)
}

fn string_field<'a>(record: &'a Map<String, Value>, key: &str) -> &'a str {
    record.get(key).and_then(Value::as_str).unwrap_or("")
}

/// Parse a collection into a [`Snapshot`].
///
/// Prior detail records supplied in `options` pin endpoint ids, preserve
/// curated fields, and carry static pages through untouched. Parsing the
/// same collection twice with the first snapshot's records as context
/// yields an identical snapshot.
pub fn parse_collection(collection: &Collection, options: &ParseOptions) -> Snapshot {
    let existing = existing_ids_by_method_path(&options.current_api_data);
    let top_folders = describe_top_folders(collection);
    let folder_by_name: HashMap<&str, &TopFolder> =
        top_folders.iter().map(|f| (f.name.as_str(), f)).collect();

    let mut request_entries = Vec::new();
    let mut stack = Vec::new();
    collect_requests(&collection.items, &mut stack, &mut request_entries);
    debug!(
        folders = top_folders.len(),
        requests = request_entries.len(),
        "collected collection tree"
    );

    let mut used_ids: HashSet<String> =
        options.current_api_data.keys().cloned().collect();

    let mut api_data: Map<String, Value> = Map::new();
    let mut examples: Map<String, Value> = Map::new();
    let mut endpoints: Vec<Endpoint> = Vec::new();

    for page in STATIC_PAGES {
        if let Some(record) = options.current_api_data.get(page) {
            api_data.insert(page.to_string(), record.clone());
        }
    }

    for (item, stack) in &request_entries {
        let request = match &item.request {
            Some(request) => request,
            None => continue,
        };
        let method = request
            .method
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or("GET")
            .to_uppercase();
        let path = to_path(request.url.as_ref());
        let query_params = extract_query_params(request.url.as_ref());
        let body_params = extract_body_params(request);
        let description = resolve_description(item);
        let mut params = query_params;
        params.extend(body_params);

        // Raw-name lookup: the map keys are trimmed, so a folder whose
        // name carries padding misses and falls back to misc.
        let top_folder = stack
            .first()
            .and_then(|folder| folder_by_name.get(folder.name.as_str()).copied());
        let category_key = top_folder.map(|f| f.key.as_str()).unwrap_or("misc");
        let breadcrumb = top_folder.map(|f| f.name.as_str()).unwrap_or("API Reference");

        let endpoint_id =
            pick_endpoint_id(&existing, &item.name, &method, &path, &mut used_ids);
        let current = options
            .current_api_data
            .get(&endpoint_id)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        let normalized_responses: Vec<ResponseRecord> = item
            .responses
            .iter()
            .map(|response| ResponseRecord {
                name: response.name.as_deref().unwrap_or("").trim().to_string(),
                code: response.code.clone().unwrap_or(Value::Null),
                status: response.status.as_deref().unwrap_or("").trim().to_string(),
                body: response.body.clone().unwrap_or_default(),
            })
            .collect();

        let endpoint_examples: Vec<ExampleRecord> = normalized_responses
            .iter()
            .take(6)
            .enumerate()
            .map(|(index, response)| {
                let code_text = match &response.code {
                    Value::Null => String::new(),
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                let subtitle = if code_text.is_empty() || code_text == "0" {
                    response.status.clone()
                } else {
                    format!("{code_text} {}", response.status).trim().to_string()
                };
                ExampleRecord {
                    title: if response.name.is_empty() {
                        format!("Example {}", index + 1)
                    } else {
                        response.name.clone()
                    },
                    subtitle,
                    request: build_curl(&method, &path, &params),
                    response: response.body.clone(),
                    note: if description.is_empty() {
                        String::new()
                    } else {
                        format!("Derived from: {description}")
                    },
                }
            })
            .collect();

        let response_schema = normalize_response_schema(&normalized_responses);

        let title = if !item.name.is_empty() {
            item.name.clone()
        } else if !string_field(&current, "title").is_empty() {
            string_field(&current, "title").to_string()
        } else {
            endpoint_id.clone()
        };
        let merged_description = if description.is_empty() {
            string_field(&current, "description").to_string()
        } else {
            description.clone()
        };

        let mut get_started = current
            .get("getStarted")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        if string_field(&get_started, "title").is_empty() {
            get_started.insert("title".to_string(), json!("Get Started"));
        }
        if string_field(&get_started, "content").is_empty() {
            get_started.insert("content".to_string(), json!(DEFAULT_GET_STARTED));
        }

        // Curated fields from the prior record survive; derived fields
        // overwrite in place, so key order is stable across re-parses.
        let mut record = current;
        record.insert("id".to_string(), json!(endpoint_id));
        record.insert("title".to_string(), json!(title));
        record.insert("method".to_string(), json!(method));
        record.insert("path".to_string(), json!(path));
        record.insert("category".to_string(), json!(category_key));
        record.insert("breadcrumb".to_string(), json!(breadcrumb));
        record.insert("description".to_string(), json!(merged_description));
        record.insert("params".to_string(), json!(params));
        record.insert("responseSchema".to_string(), json!(response_schema));
        record.insert("hasExamples".to_string(), json!(!endpoint_examples.is_empty()));
        record.insert("getStarted".to_string(), Value::Object(get_started));
        api_data.insert(endpoint_id.clone(), Value::Object(record));

        if !endpoint_examples.is_empty() {
            examples.insert(endpoint_id.clone(), json!(endpoint_examples));
        }

        endpoints.push(Endpoint {
            id: endpoint_id,
            name: item.name.clone(),
            method,
            path,
            category_id: category_key.to_string(),
            description,
            params,
            examples: endpoint_examples,
            responses: normalized_responses,
        });
    }

    // Examples keyed to static or legacy records survive re-parses; keys
    // backed by a parsed endpoint were rebuilt above.
    for (key, value) in &options.current_examples {
        let backed_by_endpoint = api_data
            .get(key)
            .and_then(Value::as_object)
            .map(|record| !string_field(record, "method").is_empty())
            .unwrap_or(false);
        if !examples.contains_key(key) && !backed_by_endpoint {
            examples.insert(key.clone(), value.clone());
        }
    }

    let mut categories: Vec<Category> = top_folders
        .iter()
        .map(|folder| Category {
            id: folder.key.clone(),
            name: folder.name.clone(),
            parent_id: None,
            order: folder.order,
        })
        .collect();
    categories.sort_by_key(|c| c.order);

    let has_auth_endpoint = endpoints
        .iter()
        .any(|e| AUTH_PATH.is_match(&e.path) || AUTH_PATH.is_match(&e.name));

    let welcome_content = build_welcome_content(collection, &top_folders, has_auth_endpoint);
    let error_codes = build_error_catalog(&endpoints);
    let hash = hash_object(&json!({
        "categories": categories,
        "endpoints": endpoints,
    }));

    Snapshot {
        categories,
        endpoints,
        api_data,
        examples,
        error_codes,
        welcome_content,
        hash,
    }
}
