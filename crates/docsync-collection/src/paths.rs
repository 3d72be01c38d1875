//! Request path and parameter extraction

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::collection::{QueryParam, RequestSpec, UrlSpec};
use crate::model::Parameter;

static SCHEME_HOST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://[^/]+").unwrap());

/// Derive the endpoint path from a request URL.
///
/// Structured path segments win when present. Otherwise the raw URL is
/// parsed, giving a non-absolute raw value a placeholder scheme and
/// host first. As a last resort the query string and any
/// `scheme://host` prefix are stripped textually.
pub fn to_path(url: Option<&UrlSpec>) -> String {
    let detail = match url {
        None => return "/".to_string(),
        Some(UrlSpec::Raw(raw)) => return path_from_raw(raw),
        Some(UrlSpec::Detailed(detail)) => detail,
    };

    if let Some(segments) = &detail.path {
        let clean: Vec<String> = segments
            .iter()
            .filter_map(segment_text)
            .map(|part| part.trim().to_string())
            .filter(|part| !part.is_empty())
            .collect();
        return format!("/{}", clean.join("/"));
    }

    path_from_raw(&detail.raw)
}

/// Text form of one path segment. Truthy numbers and `true` keep their
/// text form; zero, `false`, null, and structured values are dropped.
fn segment_text(part: &Value) -> Option<String> {
    match part {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

fn path_from_raw(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return "/".to_string();
    }

    let absolute = if raw.starts_with("http") {
        raw.to_string()
    } else if raw.starts_with('/') {
        format!("https://placeholder.local{raw}")
    } else {
        format!("https://placeholder.local/{raw}")
    };

    match pathname(&absolute) {
        Some(path) => path,
        None => {
            // Textual fallback: drop the query, then any scheme://host.
            let without_query = raw.split('?').next().unwrap_or("/");
            let without_query = if without_query.is_empty() {
                "/"
            } else {
                without_query
            };
            let no_host = SCHEME_HOST.replace(without_query, "");
            if no_host.starts_with('/') {
                no_host.to_string()
            } else {
                format!("/{no_host}")
            }
        }
    }
}

/// Pathname of an absolute URL: everything from the first `/` after the
/// host up to the query or fragment.
fn pathname(url: &str) -> Option<String> {
    let (_, rest) = url.split_once("://")?;
    if rest.is_empty() {
        return None;
    }
    let path = match rest.find('/') {
        Some(i) => &rest[i..],
        None => "/",
    };
    let path = path.split(['?', '#']).next().unwrap_or("/");
    if path.is_empty() {
        Some("/".to_string())
    } else {
        Some(path.to_string())
    }
}

/// Enabled query entries become the `query` parameter family.
pub fn extract_query_params(url: Option<&UrlSpec>) -> Vec<Parameter> {
    let Some(UrlSpec::Detailed(detail)) = url else {
        return Vec::new();
    };

    detail
        .query
        .iter()
        .filter(|q| !q.disabled)
        .filter_map(|q: &QueryParam| {
            let name = q.key.as_deref().unwrap_or("").trim().to_string();
            if name.is_empty() {
                return None;
            }
            Some(Parameter {
                name,
                kind: "string".to_string(),
                required: false,
                param_type: "query".to_string(),
                desc: q.description.as_deref().unwrap_or("").trim().to_string(),
            })
        })
        .collect()
}

/// Body parameters, derived per encoding: url-encoded and multipart fields
/// map directly (file-typed multipart fields flagged as `file`); a raw JSON
/// object body is shallow-enumerated into top-level names typed by runtime
/// value type.
pub fn extract_body_params(request: &RequestSpec) -> Vec<Parameter> {
    let Some(body) = &request.body else {
        return Vec::new();
    };
    let mode = body.mode.as_deref().unwrap_or("");
    let mut out = Vec::new();

    match mode {
        "urlencoded" => {
            if let Some(fields) = &body.urlencoded {
                for field in fields.iter().filter(|f| !f.disabled) {
                    push_form_field(&mut out, field, "string");
                }
            }
        }
        "formdata" => {
            if let Some(fields) = &body.formdata {
                for field in fields.iter().filter(|f| !f.disabled) {
                    let kind = if field.field_type.as_deref() == Some("file") {
                        "file"
                    } else {
                        "string"
                    };
                    push_form_field(&mut out, field, kind);
                }
            }
        }
        "raw" => {
            if let Some(raw) = &body.raw {
                out.extend(raw_json_params(raw));
            }
        }
        _ => {}
    }

    out
}

fn push_form_field(out: &mut Vec<Parameter>, field: &crate::collection::FormField, kind: &str) {
    let name = field.key.as_deref().unwrap_or("").trim().to_string();
    if name.is_empty() {
        return;
    }
    out.push(Parameter {
        name,
        kind: kind.to_string(),
        required: false,
        param_type: "body".to_string(),
        desc: field.description.as_deref().unwrap_or("").trim().to_string(),
    });
}

fn raw_json_params(raw: &str) -> Vec<Parameter> {
    let raw = raw.trim();
    if !(raw.starts_with('{') || raw.starts_with('[')) {
        return Vec::new();
    }
    // An unparsable raw body contributes nothing; extraction stays
    // deterministic over the rest of the request.
    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(raw) else {
        return Vec::new();
    };
    map.iter()
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| Parameter {
            name: key.clone(),
            kind: runtime_type(value).to_string(),
            required: false,
            param_type: "body".to_string(),
            desc: String::new(),
        })
        .collect()
}

/// Runtime type names as a dynamic-language `typeof` would report them.
pub fn runtime_type(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "boolean",
        Value::Null | Value::Object(_) | Value::Array(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::UrlDetail;
    use serde_json::json;

    fn detailed(raw: &str, path: Option<Vec<Value>>) -> UrlSpec {
        UrlSpec::Detailed(UrlDetail {
            raw: raw.to_string(),
            path,
            query: Vec::new(),
        })
    }

    #[test]
    fn structured_segments_win_over_raw() {
        let url = detailed(
            "https://x.y/ignored",
            Some(vec![json!("search"), json!(" part "), json!(""), json!(7)]),
        );
        assert_eq!(to_path(Some(&url)), "/search/part/7");
    }

    #[test]
    fn numeric_segments_keep_their_place_in_the_path() {
        let url = detailed("", Some(vec![json!("api"), json!(2), json!("search")]));
        assert_eq!(to_path(Some(&url)), "/api/2/search");
    }

    #[test]
    fn only_truthy_segments_survive() {
        let url = detailed(
            "",
            Some(vec![
                json!("v1"),
                json!(0),
                json!(false),
                json!(null),
                json!(true),
            ]),
        );
        assert_eq!(to_path(Some(&url)), "/v1/true");
    }

    #[test]
    fn raw_urls_yield_their_pathname() {
        let url = detailed("https://api.example.com/ProductAPI/search?x=1", None);
        assert_eq!(to_path(Some(&url)), "/ProductAPI/search");
        let relative = detailed("search/part?x=1", None);
        assert_eq!(to_path(Some(&relative)), "/search/part");
        let slashless = detailed("https://api.example.com", None);
        assert_eq!(to_path(Some(&slashless)), "/");
    }

    #[test]
    fn missing_url_is_the_root_path() {
        assert_eq!(to_path(None), "/");
        assert_eq!(to_path(Some(&detailed("", None))), "/");
    }

    #[test]
    fn raw_json_body_enumerates_top_level_keys() {
        let request: RequestSpec = serde_json::from_value(json!({
            "method": "POST",
            "body": {"mode": "raw", "raw": "{\"part\":\"lm317\",\"limit\":5,\"deep\":{\"x\":1}}"}
        }))
        .unwrap();
        let params = extract_body_params(&request);
        let kinds: Vec<(&str, &str)> = params
            .iter()
            .map(|p| (p.name.as_str(), p.kind.as_str()))
            .collect();
        assert_eq!(
            kinds,
            vec![("part", "string"), ("limit", "number"), ("deep", "object")]
        );
    }

    #[test]
    fn unparsable_raw_body_is_skipped() {
        let request: RequestSpec = serde_json::from_value(json!({
            "body": {"mode": "raw", "raw": "{not json"}
        }))
        .unwrap();
        assert!(extract_body_params(&request).is_empty());
    }

    #[test]
    fn disabled_fields_are_excluded() {
        let request: RequestSpec = serde_json::from_value(json!({
            "body": {"mode": "urlencoded", "urlencoded": [
                {"key": "user", "description": " who "},
                {"key": "secret", "disabled": true}
            ]}
        }))
        .unwrap();
        let params = extract_body_params(&request);
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "user");
        assert_eq!(params[0].desc, "who");
    }
}
