//! Encoding and decoding of block literals
//!
//! The codec always writes strictly valid JSON (4-space indent), so any
//! block it produces is guaranteed to decode again. Hand-edited JS literal
//! syntax (unquoted keys, trailing commas) is rejected with a hint.

use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::block::BlockName;
use crate::error::{Error, Result};

/// Body-line indent used when the declaration line's own indent cannot be
/// detected. Twelve spaces matches the script region of the documentation
/// page.
pub const DEFAULT_INDENT: &str = "            ";

/// Decode a raw `{ ... }` slice into a JSON value.
pub fn parse_literal(name: &'static str, raw_text: &str) -> Result<Value> {
    serde_json::from_str(raw_text).map_err(|source| Error::MalformedLiteral { name, source })
}

/// Serialize a block back to its full declaration text:
/// `const NAME = { ... };`.
///
/// The first line carries no prefix; it sits directly after the page's own
/// leading whitespace, which is outside the replace span and preserved
/// as-is. Every following line is prefixed with `indent`.
pub fn serialize_block(name: BlockName, value: &Value, indent: &str) -> String {
    let body = to_json_pretty(value);
    let mut lines = body.lines();
    let mut out = format!("const {} = ", name.as_str());
    if let Some(first) = lines.next() {
        out.push_str(first);
    }
    for line in lines {
        out.push('\n');
        out.push_str(indent);
        out.push_str(line);
    }
    out.push(';');
    out
}

/// Leading whitespace of the line containing `anchor`, or the default when
/// the anchor does not start its own line.
pub fn detect_indent(document: &str, anchor: usize) -> String {
    let line_start = document[..anchor].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let prefix = &document[line_start..anchor];
    if prefix.chars().all(|c| c == ' ' || c == '\t') {
        prefix.to_string()
    } else {
        DEFAULT_INDENT.to_string()
    }
}

fn to_json_pretty(value: &Value) -> String {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    serde::Serialize::serialize(value, &mut serializer).expect("JSON value serialization");
    String::from_utf8(buf).expect("serde_json emits UTF-8")
}
