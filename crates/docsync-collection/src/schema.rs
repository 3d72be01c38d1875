//! Response-shape flattening

use serde_json::Value;
use tracing::debug;

use crate::model::{ResponseRecord, SchemaField};
use crate::paths::runtime_type;

/// Flatten a JSON body into dotted path/type fields.
///
/// Objects recurse fully; arrays get a trailing `[]` and recurse one level
/// into their first element when it is a container.
pub fn flatten_json_schema(value: &Value, base_path: &str) -> Vec<SchemaField> {
    let mut fields = Vec::new();
    collect_fields(value, base_path, &mut fields);
    fields
}

fn collect_fields(value: &Value, base_path: &str, fields: &mut Vec<SchemaField>) {
    let entries: Vec<(String, &Value)> = match value {
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        Value::Array(arr) => arr
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        _ => return,
    };

    for (key, child) in entries {
        let path = if base_path.is_empty() {
            key
        } else {
            format!("{base_path}.{key}")
        };
        match child {
            Value::Object(_) => {
                fields.push(SchemaField {
                    path: path.clone(),
                    kind: "object".to_string(),
                    example: String::new(),
                });
                collect_fields(child, &path, fields);
            }
            Value::Array(arr) => {
                let array_path = format!("{path}[]");
                fields.push(SchemaField {
                    path: array_path.clone(),
                    kind: "array".to_string(),
                    example: String::new(),
                });
                if let Some(first @ (Value::Object(_) | Value::Array(_))) = arr.first() {
                    collect_fields(first, &array_path, fields);
                }
            }
            scalar => {
                fields.push(SchemaField {
                    path,
                    kind: runtime_type(scalar).to_string(),
                    example: scalar_example(scalar),
                });
            }
        }
    }
}

fn scalar_example(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Flatten the first response whose body yields a non-empty schema;
/// de-duplicate by `path:type` and sort by path.
pub fn normalize_response_schema(responses: &[ResponseRecord]) -> Vec<SchemaField> {
    let mut fields: Vec<SchemaField> = Vec::new();
    for response in responses {
        let body = response.body.trim();
        if body.is_empty() {
            continue;
        }
        if body.starts_with('{') || body.starts_with('[') {
            match serde_json::from_str::<Value>(body) {
                Ok(parsed) => fields.extend(flatten_json_schema(&parsed, "")),
                Err(_) => debug!(response = %response.name, "skipping unparsable example body"),
            }
        }
        if !fields.is_empty() {
            break;
        }
    }

    let mut seen = std::collections::HashSet::new();
    let mut unique: Vec<SchemaField> = fields
        .into_iter()
        .filter(|field| seen.insert(format!("{}:{}", field.path, field.kind)))
        .collect();
    unique.sort_by(|a, b| a.path.cmp(&b.path));
    unique
}
