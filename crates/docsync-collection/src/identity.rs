//! Stable endpoint identity assignment
//!
//! Identity is keyed by `(METHOD, path)` once assigned: a prior detail
//! record with the same method and path keeps its id across re-parses.
//! New endpoints get a slug of their display name, and collisions are
//! resolved with a numeric suffix so two requests never share an id.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use docsync_core::text::slugify;
use regex::Regex;

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").unwrap());

/// Build the `(METHOD path)` → id lookup from prior detail records.
pub fn existing_ids_by_method_path(
    api_data: &serde_json::Map<String, serde_json::Value>,
) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for (id, record) in api_data {
        let Some(record) = record.as_object() else {
            continue;
        };
        let method = record
            .get("method")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_uppercase();
        let path = record.get("path").and_then(|v| v.as_str()).unwrap_or("");
        if method.is_empty() || path.is_empty() {
            continue;
        }
        map.insert(format!("{method} {path}"), id.clone());
    }
    map
}

/// Pick the id for one endpoint, marking it used.
pub fn pick_endpoint_id(
    existing_by_method_path: &HashMap<String, String>,
    request_name: &str,
    method: &str,
    path: &str,
    used_ids: &mut HashSet<String>,
) -> String {
    let key = format!("{} {}", method.to_uppercase(), path);
    if let Some(existing) = existing_by_method_path.get(&key) {
        used_ids.insert(existing.clone());
        return existing.clone();
    }

    let mut candidate = if request_name.is_empty() {
        slugify(&format!("{method}-{path}"))
    } else {
        slugify(request_name)
    };
    if candidate == "item" {
        candidate = slugify(&format!("{method}-{}", NON_WORD.replace_all(path, "-")));
    }

    let base = candidate.clone();
    let mut serial = 2;
    while used_ids.contains(&candidate) {
        candidate = format!("{base}-{serial}");
        serial += 1;
    }
    used_ids.insert(candidate.clone());
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prior_method_path_match_keeps_the_id() {
        let api_data = json!({
            "login-user": {"method": "post", "path": "/auth/login"}
        });
        let existing = existing_ids_by_method_path(api_data.as_object().unwrap());
        let mut used = HashSet::new();
        let id = pick_endpoint_id(&existing, "Renamed Login", "POST", "/auth/login", &mut used);
        assert_eq!(id, "login-user");
    }

    #[test]
    fn colliding_slugs_get_numeric_suffixes() {
        let existing = HashMap::new();
        let mut used = HashSet::new();
        let first = pick_endpoint_id(&existing, "Search Parts", "GET", "/a", &mut used);
        let second = pick_endpoint_id(&existing, "Search Parts!", "GET", "/b", &mut used);
        let third = pick_endpoint_id(&existing, "search parts", "GET", "/c", &mut used);
        assert_eq!(first, "search-parts");
        assert_eq!(second, "search-parts-2");
        assert_eq!(third, "search-parts-3");
    }

    #[test]
    fn unusable_names_fall_back_to_method_and_path() {
        let existing = HashMap::new();
        let mut used = HashSet::new();
        let id = pick_endpoint_id(&existing, "!!!", "GET", "/search/part", &mut used);
        assert_eq!(id, "get-search-part");
    }
}
