//! Rendered curl invocations for endpoint examples.

use crate::model::Parameter;

const CURL_BASE_URL: &str = "https://api.example.com";

/// Percent-encode a query component. Unreserved characters follow the
/// JavaScript `encodeURIComponent` set: alphanumerics plus `-_.!~*'()`.
fn encode_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' => out.push(byte as char),
            b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Build a display curl command for an endpoint. Query parameters render
/// as `name={{name}}` placeholders; a JSON content-type header is added
/// when the endpoint takes body parameters.
pub fn build_curl(method: &str, path: &str, params: &[Parameter]) -> String {
    let query: Vec<String> = params
        .iter()
        .filter(|p| p.param_type == "query")
        .map(|p| format!("{}={{{{{}}}}}", encode_component(&p.name), p.name))
        .collect();

    let mut url = format!("{CURL_BASE_URL}{path}");
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query.join("&"));
    }

    let mut lines = vec![format!("curl -X {} \"{}\"", method.to_uppercase(), url)];
    if params.iter().any(|p| p.param_type == "body") {
        lines.push("  -H \"Content-Type: application/json\"".to_string());
    }
    lines.join(" \\\n")
}
