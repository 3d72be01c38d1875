//! Derived error-code catalog
//!
//! Two catalogs are built from endpoint responses: HTTP-level codes (one
//! entry per distinct code, first occurrence wins) and application-level
//! status codes mined from response payloads. JSON bodies are visited
//! recursively for status/code/message shapes; XML-ish bodies contribute
//! positional `<Code>`/`<Message>` pairs. Bodies that fail to parse are
//! skipped without aborting extraction.

use std::cmp::Ordering;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::model::{Endpoint, ErrorCatalog, HttpCodeEntry, Severity, StatusCodeEntry};

static AUTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"auth|unauthor|forbidden|denied|session|login|credential").unwrap());
static QUOTA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"quota|limit|rate|throttle").unwrap());
static VALIDATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"invalid|missing|required|bad request|format|parse|validation").unwrap()
});
static SERVER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"server|internal|timeout|unavailable|error").unwrap());

static XML_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<Code>\s*([^<]+?)\s*</Code>").unwrap());
static XML_MESSAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<Message>\s*([^<]+?)\s*</Message>").unwrap());

/// Classify a code/message pair into a severity family. Families are
/// checked in a fixed order and the first match wins; messages often match
/// several families, so the order is part of the contract.
pub fn classify_error_kind(code: &str, message: &str, context: &str) -> Severity {
    let text = format!("{code} {message} {context}").to_lowercase();
    if AUTH.is_match(&text) {
        Severity::Auth
    } else if QUOTA.is_match(&text) {
        Severity::Quota
    } else if VALIDATION.is_match(&text) {
        Severity::Validation
    } else if SERVER.is_match(&text) {
        Severity::Server
    } else {
        Severity::Unknown
    }
}

fn action_for(severity: Severity) -> &'static str {
    match severity {
        Severity::Auth => "Authenticate again or verify credentials/permissions.",
        Severity::Validation => "Validate required parameters and input formats.",
        Severity::Quota => "Reduce request frequency and retry with backoff.",
        Severity::Server => "Retry later; escalate if issue persists.",
        Severity::Unknown => "Inspect message and endpoint documentation for guidance.",
    }
}

const GENERAL_NOTES: [&str; 3] = [
    "Always evaluate both HTTP status and payload status code fields.",
    "Retry logic should include backoff for quota or transient failures.",
    "Authentication/session errors should trigger a fresh authenticate call.",
];

/// One application-status observation from a response body.
#[derive(Debug, Clone)]
struct StatusSignal {
    code: String,
    message: String,
    endpoint: String,
    context: String,
}

/// Numeric-aware string comparison: digit runs compare as numbers, so
/// `"5" < "10"` and `"E2" < "E10"`.
pub fn numeric_compare(a: &str, b: &str) -> Ordering {
    let mut ca = a.chars().peekable();
    let mut cb = b.chars().peekable();
    loop {
        match (ca.peek().copied(), cb.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let na = take_digits(&mut ca);
                let nb = take_digits(&mut cb);
                let cmp = na
                    .trim_start_matches('0')
                    .len()
                    .cmp(&nb.trim_start_matches('0').len())
                    .then_with(|| na.trim_start_matches('0').cmp(nb.trim_start_matches('0')));
                if cmp != Ordering::Equal {
                    return cmp;
                }
            }
            (Some(x), Some(y)) => {
                let cmp = x.cmp(&y);
                if cmp != Ordering::Equal {
                    return cmp;
                }
                ca.next();
                cb.next();
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars>) -> String {
    let mut out = String::new();
    while let Some(c) = chars.peek().copied() {
        if c.is_ascii_digit() {
            out.push(c);
            chars.next();
        } else {
            break;
        }
    }
    out
}

fn code_as_text(code: &Value) -> String {
    match code {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Numeric when the recorded code is numeric (or a numeric string),
/// otherwise the raw text.
fn normalize_http_code(code: &Value) -> Value {
    match code {
        Value::Number(_) => code.clone(),
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(n) => Value::from(n),
            Err(_) => code.clone(),
        },
        other => Value::String(code_as_text(other)),
    }
}

/// Visit every object node of a JSON body looking for status signals:
/// a nested `status` object carrying a code, or a sibling `code` key
/// accompanied by `message`, `status`, or `success`. Key matching is
/// case-insensitive.
fn read_status_signals(value: &Value, signals: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            let find_key = |wanted: &str| {
                map.keys()
                    .find(|k| k.to_lowercase() == wanted)
                    .map(String::as_str)
            };
            let code_key = find_key("code").or_else(|| find_key("statuscode"));
            let status_key = find_key("status");
            let message_key = find_key("message");

            if let Some(status_obj) = status_key.and_then(|k| map.get(k)).and_then(Value::as_object)
            {
                let code = status_obj
                    .get("Code")
                    .or_else(|| status_obj.get("code"))
                    .or_else(|| status_obj.get("StatusCode"))
                    .or_else(|| status_obj.get("statusCode"));
                if let Some(code) = code {
                    let message = status_obj
                        .get("Message")
                        .or_else(|| status_obj.get("message"))
                        .map(code_as_text)
                        .unwrap_or_default();
                    signals.push((code_as_text(code), message));
                }
            }

            if let Some(code_key) = code_key {
                let accompanied =
                    message_key.is_some() || status_key.is_some() || find_key("success").is_some();
                if accompanied {
                    let message = message_key
                        .and_then(|k| map.get(k))
                        .map(code_as_text)
                        .unwrap_or_default();
                    if let Some(code) = map.get(code_key) {
                        signals.push((code_as_text(code), message));
                    }
                }
            }

            for nested in map.values() {
                read_status_signals(nested, signals);
            }
        }
        Value::Array(items) => {
            for item in items {
                read_status_signals(item, signals);
            }
        }
        _ => {}
    }
}

/// Extract `<Code>`/`<Message>` element pairs positionally from an XML-ish
/// body.
fn extract_xml_status(body: &str) -> Vec<(String, String)> {
    let codes: Vec<String> = XML_CODE
        .captures_iter(body)
        .map(|c| c[1].trim().to_string())
        .collect();
    let messages: Vec<String> = XML_MESSAGE
        .captures_iter(body)
        .map(|c| c[1].trim().to_string())
        .collect();
    codes
        .into_iter()
        .enumerate()
        .map(|(i, code)| (code, messages.get(i).cloned().unwrap_or_default()))
        .collect()
}

/// Build both catalogs from parsed endpoints.
pub fn build_error_catalog(endpoints: &[Endpoint]) -> ErrorCatalog {
    let mut status_signals: Vec<StatusSignal> = Vec::new();
    let mut http_codes: Vec<HttpCodeEntry> = Vec::new();
    let mut seen_http: std::collections::HashSet<String> = std::collections::HashSet::new();

    for endpoint in endpoints {
        let signature = format!("{} {}", endpoint.method.to_uppercase(), endpoint.path);
        for response in &endpoint.responses {
            if !response.code.is_null() {
                let code = normalize_http_code(&response.code);
                let key = code_as_text(&code);
                if seen_http.insert(key) {
                    let meaning = if response.status.is_empty() {
                        "HTTP Response".to_string()
                    } else {
                        response.status.clone()
                    };
                    http_codes.push(HttpCodeEntry {
                        severity: classify_error_kind(
                            &code_as_text(&code),
                            &response.status,
                            &endpoint.description,
                        ),
                        description: format!("Observed in {signature}"),
                        meaning,
                        code,
                    });
                }
            }

            let body = response.body.trim();
            if body.is_empty() {
                continue;
            }

            let mut pairs: Vec<(String, String)> = Vec::new();
            if body.starts_with('{') || body.starts_with('[') {
                match serde_json::from_str::<Value>(body) {
                    Ok(parsed) => read_status_signals(&parsed, &mut pairs),
                    Err(_) => {
                        debug!(endpoint = %signature, "skipping unparsable example body");
                    }
                }
            } else if body.starts_with('<') {
                pairs = extract_xml_status(body);
            }

            status_signals.extend(pairs.into_iter().map(|(code, message)| StatusSignal {
                code,
                message,
                endpoint: signature.clone(),
                context: endpoint.description.clone(),
            }));
        }
    }

    // Merge signals by code string: the first signal's message wins, later
    // ones only contribute endpoint signatures.
    let mut order: Vec<String> = Vec::new();
    let mut by_code: std::collections::HashMap<String, StatusCodeEntry> =
        std::collections::HashMap::new();
    for signal in status_signals {
        let code = signal.code.trim().to_string();
        if code.is_empty() {
            continue;
        }
        let entry = by_code.entry(code.clone()).or_insert_with(|| {
            order.push(code.clone());
            let severity = classify_error_kind(&code, &signal.message, &signal.context);
            StatusCodeEntry {
                code,
                meaning: if signal.message.is_empty() {
                    "Status response".to_string()
                } else {
                    signal.message.clone()
                },
                action: action_for(severity).to_string(),
                severity,
                sources: Vec::new(),
            }
        });
        if !signal.endpoint.is_empty() {
            entry.sources.push(signal.endpoint);
        }
    }

    order.sort_by(|a, b| numeric_compare(a, b));
    let mut status_codes: Vec<StatusCodeEntry> = Vec::new();
    for code in order {
        if let Some(mut entry) = by_code.remove(&code) {
            entry.sources.sort();
            entry.sources.dedup();
            entry.sources.truncate(5);
            status_codes.push(entry);
        }
    }

    http_codes.sort_by(|a, b| numeric_compare(&code_as_text(&a.code), &code_as_text(&b.code)));

    ErrorCatalog {
        status_codes,
        http_codes,
        notes: GENERAL_NOTES.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResponseRecord;
    use serde_json::json;

    fn endpoint(method: &str, path: &str, description: &str, responses: Vec<ResponseRecord>) -> Endpoint {
        Endpoint {
            id: format!("{method}-{path}"),
            name: path.to_string(),
            method: method.to_string(),
            path: path.to_string(),
            category_id: "misc".to_string(),
            description: description.to_string(),
            params: Vec::new(),
            examples: Vec::new(),
            responses,
        }
    }

    fn response(code: Value, status: &str, body: &str) -> ResponseRecord {
        ResponseRecord {
            name: String::new(),
            code,
            status: status.to_string(),
            body: body.to_string(),
        }
    }

    #[test]
    fn classifier_checks_families_in_order() {
        // "invalid" and "forbidden" both match; auth is checked first.
        assert_eq!(
            classify_error_kind("9", "invalid token, access forbidden", ""),
            Severity::Auth
        );
        assert_eq!(classify_error_kind("3", "Invalid Parameters", ""), Severity::Validation);
        assert_eq!(classify_error_kind("8", "rate limit reached", ""), Severity::Quota);
        assert_eq!(classify_error_kind("1", "internal error", ""), Severity::Server);
        assert_eq!(classify_error_kind("7", "mystery", ""), Severity::Unknown);
    }

    #[test]
    fn http_codes_record_first_occurrence_per_code() {
        let endpoints = vec![
            endpoint(
                "GET",
                "/a",
                "",
                vec![response(json!(200), "OK", ""), response(json!(400), "Bad Request", "")],
            ),
            endpoint("POST", "/b", "", vec![response(json!(200), "Fine", "")]),
        ];
        let catalog = build_error_catalog(&endpoints);
        let codes: Vec<(String, String)> = catalog
            .http_codes
            .iter()
            .map(|e| (e.code.to_string(), e.meaning.clone()))
            .collect();
        assert_eq!(
            codes,
            vec![
                ("200".to_string(), "OK".to_string()),
                ("400".to_string(), "Bad Request".to_string()),
            ]
        );
        assert_eq!(catalog.http_codes[0].description, "Observed in GET /a");
    }

    #[test]
    fn nested_status_object_and_sibling_code_both_signal() {
        let body = r#"{"Status":{"Code":"0","Message":"Successful Operation"},
                       "result":{"code":"3","message":"Invalid Parameters"}}"#;
        let endpoints = vec![endpoint(
            "POST",
            "/search",
            "",
            vec![response(json!(200), "OK", body)],
        )];
        let catalog = build_error_catalog(&endpoints);
        let codes: Vec<&str> = catalog.status_codes.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["0", "3"]);
        assert_eq!(catalog.status_codes[1].severity, Severity::Validation);
        assert_eq!(
            catalog.status_codes[1].action,
            "Validate required parameters and input formats."
        );
    }

    #[test]
    fn xml_bodies_pair_codes_and_messages_positionally() {
        let body = "<ServiceResult><Code>5</Code><Message>Authentication Failed</Message></ServiceResult>";
        let endpoints = vec![endpoint(
            "POST",
            "/auth",
            "",
            vec![response(json!(401), "Unauthorized", body)],
        )];
        let catalog = build_error_catalog(&endpoints);
        assert_eq!(catalog.status_codes.len(), 1);
        let entry = &catalog.status_codes[0];
        assert_eq!(entry.code, "5");
        assert_eq!(entry.meaning, "Authentication Failed");
        assert_eq!(entry.severity, Severity::Auth);
        assert_eq!(entry.sources, vec!["POST /auth".to_string()]);
    }

    #[test]
    fn shared_codes_consolidate_sources_sorted_and_capped() {
        let body = "<r><Code>5</Code><Message>Denied</Message></r>";
        let endpoints = vec![
            endpoint("POST", "/b", "", vec![response(json!(401), "", body)]),
            endpoint("POST", "/a", "", vec![response(json!(401), "", body)]),
        ];
        let catalog = build_error_catalog(&endpoints);
        assert_eq!(catalog.status_codes.len(), 1);
        assert_eq!(
            catalog.status_codes[0].sources,
            vec!["POST /a".to_string(), "POST /b".to_string()]
        );
        // First signal's message wins.
        assert_eq!(catalog.status_codes[0].meaning, "Denied");
    }

    #[test]
    fn catalogs_sort_numerically_and_always_carry_the_notes() {
        let body = r#"{"code":"10","message":"limit"}"#;
        let body2 = r#"{"code":"5","message":"denied"}"#;
        let endpoints = vec![endpoint(
            "GET",
            "/x",
            "",
            vec![response(json!(200), "OK", body), response(json!(429), "", body2)],
        )];
        let catalog = build_error_catalog(&endpoints);
        let codes: Vec<&str> = catalog.status_codes.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["5", "10"]);
        assert_eq!(catalog.notes.len(), 3);
    }

    #[test]
    fn unparsable_bodies_are_skipped_not_fatal() {
        let endpoints = vec![endpoint(
            "GET",
            "/x",
            "",
            vec![
                response(json!(200), "OK", "{broken json"),
                response(Value::Null, "", "<r><Code>2</Code></r>"),
            ],
        )];
        let catalog = build_error_catalog(&endpoints);
        assert_eq!(catalog.status_codes.len(), 1);
        assert_eq!(catalog.status_codes[0].code, "2");
        assert_eq!(catalog.status_codes[0].meaning, "Status response");
        // The null-coded response contributes no HTTP entry.
        let codes: Vec<String> = catalog.http_codes.iter().map(|e| e.code.to_string()).collect();
        assert_eq!(codes, vec!["200".to_string()]);
    }

    #[test]
    fn numeric_compare_orders_digit_runs_as_numbers() {
        assert_eq!(numeric_compare("5", "10"), Ordering::Less);
        assert_eq!(numeric_compare("0", "3"), Ordering::Less);
        assert_eq!(numeric_compare("E10", "E2"), Ordering::Greater);
        assert_eq!(numeric_compare("abc", "abd"), Ordering::Less);
    }
}
