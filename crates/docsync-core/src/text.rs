//! Text helpers shared by the collection parser and reconciliation engine

use regex::Regex;
use std::sync::LazyLock;

static NON_SLUG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());
static HEADINGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#+\s+").unwrap());
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]+)`").unwrap());
static LINKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.*?)\]\([^)]*\)").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static SENTENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.+?[.!?])(\s|$)").unwrap());

/// Lowercase slug: alphanumeric runs joined by `-`. Empty input slugs to
/// `item` so callers always get a usable identifier.
pub fn slugify(value: &str) -> String {
    let lowered = value.to_lowercase();
    let slug = NON_SLUG.replace_all(&lowered, "-");
    let trimmed = slug.trim_matches('-');
    if trimmed.is_empty() {
        "item".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Drop carriage returns and surrounding whitespace.
pub fn clean_text(value: &str) -> String {
    value.replace('\r', "").trim().to_string()
}

/// Strip the markdown constructs that show up in collection descriptions:
/// heading markers, bold, inline code, and link syntax.
pub fn strip_markdown(value: &str) -> String {
    let text = clean_text(value);
    let text = HEADINGS.replace_all(&text, "");
    let text = BOLD.replace_all(&text, "$1");
    let text = INLINE_CODE.replace_all(&text, "$1");
    LINKS.replace_all(&text, "$1").to_string()
}

/// Collapse whitespace runs to single spaces and trim.
pub fn collapse_whitespace(value: &str) -> String {
    WHITESPACE.replace_all(value, " ").trim().to_string()
}

/// First sentence of a markdown-ish description, whitespace collapsed.
/// Falls back to the whole text when no sentence terminator exists.
pub fn first_sentence(value: &str) -> String {
    let text = strip_markdown(value);
    let text = collapse_whitespace(&text);
    let text = text.as_str();
    if text.is_empty() {
        return String::new();
    }
    match SENTENCE.captures(text) {
        Some(caps) => caps[1].trim().to_string(),
        None => text.to_string(),
    }
}
