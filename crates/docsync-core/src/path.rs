//! Dotted-path writes into JSON values

use serde_json::{Map, Value};

/// Set `new_value` at a dotted path such as `getStarted.title`, creating
/// intermediate objects as needed.
///
/// Returns `false` when a non-terminal segment resolves to something other
/// than an object; the value is left untouched in that case.
pub fn set_at_path(value: &mut Value, path: &str, new_value: Value) -> bool {
    let mut parts = path.split('.').peekable();
    let mut cursor = value;

    while let Some(part) = parts.next() {
        if parts.peek().is_none() {
            let Value::Object(map) = cursor else {
                return false;
            };
            map.insert(part.to_string(), new_value);
            return true;
        }

        let Value::Object(map) = cursor else {
            return false;
        };
        cursor = map
            .entry(part.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sets_top_level_key() {
        let mut value = json!({"title": "old"});
        assert!(set_at_path(&mut value, "title", json!("new")));
        assert_eq!(value, json!({"title": "new"}));
    }

    #[test]
    fn creates_intermediate_objects() {
        let mut value = json!({});
        assert!(set_at_path(&mut value, "getStarted.title", json!("Start")));
        assert_eq!(value, json!({"getStarted": {"title": "Start"}}));
    }

    #[test]
    fn refuses_to_descend_into_scalars() {
        let mut value = json!({"getStarted": 3});
        assert!(!set_at_path(&mut value, "getStarted.title", json!("x")));
        assert_eq!(value, json!({"getStarted": 3}));
    }
}
