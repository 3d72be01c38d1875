//! Order-normalized JSON comparison and content hashing

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// Recursively rebuild a value with object keys in sorted order.
///
/// Arrays keep their element order; only object key order is normalized.
pub fn sort_deep(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<_> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::new();
            for key in keys {
                if let Some(v) = map.get(key) {
                    sorted.insert(key.clone(), sort_deep(v));
                }
            }
            Value::Object(sorted)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_deep).collect()),
        other => other.clone(),
    }
}

/// Deep equality with object key order ignored at every level.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    // serde_json compares objects as maps, so ordering never participates.
    a == b
}

/// Deterministic serialization: keys sorted recursively, 2-space indent.
pub fn stable_stringify(value: &Value) -> String {
    serde_json::to_string_pretty(&sort_deep(value)).unwrap_or_default()
}

/// SHA-256 hex digest of the stable serialization of `value`.
pub fn hash_object(value: &Value) -> String {
    hash_str(&stable_stringify(value))
}

/// SHA-256 hex digest of a string.
pub fn hash_str(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    format!("{:x}", hasher.finalize())
}
