//! Row state classification.

use docsync_core::json::deep_equal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Relationship between the collection-side and document-side values of
/// one registry row. `Null` counts as absent on either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowState {
    Match,
    Conflict,
    SpecOnly,
    DocOnly,
    NullBoth,
}

/// Classify a value pair. Deep equality is order-insensitive for object
/// keys, so two records with reordered fields still match.
pub fn classify_row(spec_value: &Value, doc_value: &Value) -> RowState {
    match (spec_value.is_null(), doc_value.is_null()) {
        (true, true) => RowState::NullBoth,
        (true, false) => RowState::DocOnly,
        (false, true) => RowState::SpecOnly,
        (false, false) => {
            if deep_equal(spec_value, doc_value) {
                RowState::Match
            } else {
                RowState::Conflict
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_values_classify_by_side() {
        assert_eq!(classify_row(&Value::Null, &Value::Null), RowState::NullBoth);
        assert_eq!(classify_row(&json!("x"), &Value::Null), RowState::SpecOnly);
        assert_eq!(classify_row(&Value::Null, &json!("x")), RowState::DocOnly);
    }

    #[test]
    fn key_order_does_not_cause_conflicts() {
        let a = json!({"method": "GET", "path": "/x"});
        let b = json!({"path": "/x", "method": "GET"});
        assert_eq!(classify_row(&a, &b), RowState::Match);
        assert_eq!(classify_row(&a, &json!({"method": "PUT", "path": "/x"})), RowState::Conflict);
    }

    #[test]
    fn false_and_zero_are_present_values() {
        assert_eq!(classify_row(&json!(false), &json!(false)), RowState::Match);
        assert_eq!(classify_row(&json!(0), &Value::Null), RowState::SpecOnly);
    }
}
