//! Brace-balanced literal scanner
//!
//! A single forward pass over the document locates the balanced `{ ... }`
//! literal that follows a block's `const NAME =` anchor. The scanner is
//! quote- and comment-aware, so braces and semicolons inside strings, line
//! comments, or block comments never terminate the scan. Scan state is
//! local to one call.

use regex::Regex;

use crate::error::{Error, Result};

/// Scanner mode for one forward pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    InLineComment,
    InBlockComment,
    /// Inside a quoted string; the delimiter is `"`, `'`, or a backtick.
    InQuote { delim: char, escaped: bool },
}

/// Byte span of one located literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralSpan {
    /// Offset of the `c` in `const`, where replacement begins.
    pub replace_start: usize,
    /// Offset of the opening `{`.
    pub open: usize,
    /// Offset of the matching `}`.
    pub close: usize,
    /// Offset one past the trailing `;`, where replacement ends.
    pub replace_end: usize,
}

/// Find the unique `const NAME =` anchor for a block.
///
/// Exactly one occurrence is valid; zero or multiple is a structural error
/// naming the block.
pub fn find_anchor(document: &str, name: &'static str) -> Result<usize> {
    let pattern = Regex::new(&format!(r"\bconst\s+{name}\s*=")).expect("static anchor pattern");
    let mut matches = pattern.find_iter(document);
    let first = matches.next();
    let extra = matches.count();
    match (first, extra) {
        (Some(m), 0) => Ok(m.start()),
        (Some(_), n) => Err(Error::AmbiguousAnchor {
            name,
            found: n + 1,
        }),
        (None, _) => Err(Error::AmbiguousAnchor { name, found: 0 }),
    }
}

/// Scan forward from an anchor to the balanced literal and its terminator.
pub fn scan_literal(document: &str, name: &'static str, anchor: usize) -> Result<LiteralSpan> {
    let open = document[anchor..]
        .find('{')
        .map(|i| anchor + i)
        .ok_or(Error::MissingOpeningBrace { name })?;

    let mut state = ScanState::Normal;
    let mut depth: usize = 0;
    let mut chars = document[open..].char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        let at = open + offset;
        let next = chars.peek().map(|&(_, c)| c);

        match state {
            ScanState::Normal => match ch {
                '/' if next == Some('/') => {
                    state = ScanState::InLineComment;
                    chars.next();
                }
                '/' if next == Some('*') => {
                    state = ScanState::InBlockComment;
                    chars.next();
                }
                '"' | '\'' | '`' => {
                    state = ScanState::InQuote {
                        delim: ch,
                        escaped: false,
                    };
                }
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        let replace_end = find_terminator(document, name, at)?;
                        return Ok(LiteralSpan {
                            replace_start: anchor,
                            open,
                            close: at,
                            replace_end,
                        });
                    }
                }
                _ => {}
            },
            ScanState::InLineComment => {
                if ch == '\n' {
                    state = ScanState::Normal;
                }
            }
            ScanState::InBlockComment => {
                if ch == '*' && next == Some('/') {
                    state = ScanState::Normal;
                    chars.next();
                }
            }
            ScanState::InQuote { delim, escaped } => {
                if escaped {
                    state = ScanState::InQuote {
                        delim,
                        escaped: false,
                    };
                } else if ch == '\\' {
                    state = ScanState::InQuote {
                        delim,
                        escaped: true,
                    };
                } else if ch == delim {
                    state = ScanState::Normal;
                }
            }
        }
    }

    Err(Error::UnbalancedLiteral { name, depth })
}

/// After the closing brace, only whitespace may precede the `;`.
fn find_terminator(document: &str, name: &'static str, close: usize) -> Result<usize> {
    for (offset, ch) in document[close + 1..].char_indices() {
        if ch.is_whitespace() {
            continue;
        }
        if ch == ';' {
            return Ok(close + 1 + offset + 1);
        }
        return Err(Error::MissingTerminator { name });
    }
    Err(Error::MissingTerminator { name })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_requires_exactly_one_occurrence() {
        assert_eq!(find_anchor("x const API_DATA = {};", "API_DATA").unwrap(), 2);
        assert!(matches!(
            find_anchor("no anchor here", "API_DATA"),
            Err(Error::AmbiguousAnchor { found: 0, .. })
        ));
        assert!(matches!(
            find_anchor("const API_DATA = {}; const API_DATA = {};", "API_DATA"),
            Err(Error::AmbiguousAnchor { found: 2, .. })
        ));
    }

    #[test]
    fn anchor_ignores_partial_identifier_matches() {
        let doc = "const MY_API_DATA = 1; const API_DATA = {};";
        assert_eq!(find_anchor(doc, "API_DATA").unwrap(), 23);
    }

    #[test]
    fn braces_inside_strings_do_not_close_the_literal() {
        let doc = r#"const X = { "a": "}{;" };"#;
        let span = scan_literal(doc, "X", 0).unwrap();
        assert_eq!(&doc[span.open..=span.close], r#"{ "a": "}{;" }"#);
        assert_eq!(span.replace_end, doc.len());
    }

    #[test]
    fn braces_inside_comments_are_skipped() {
        let doc = "const X = {\n  // } not the end\n  /* }; */ \"a\": 1\n};";
        let span = scan_literal(doc, "X", 0).unwrap();
        assert_eq!(span.close, doc.len() - 2);
    }

    #[test]
    fn escaped_quotes_stay_inside_the_string() {
        let doc = r#"const X = { "a": "quote \" brace }" };"#;
        let span = scan_literal(doc, "X", 0).unwrap();
        assert_eq!(span.replace_end, doc.len());
    }

    #[test]
    fn unterminated_literal_is_an_error() {
        assert!(matches!(
            scan_literal("const X = { \"a\": 1 ", "X", 0),
            Err(Error::UnbalancedLiteral { .. })
        ));
    }

    #[test]
    fn missing_semicolon_is_an_error() {
        assert!(matches!(
            scan_literal("const X = {}\nconsole.log(X)", "X", 0),
            Err(Error::MissingTerminator { .. })
        ));
        assert!(matches!(
            scan_literal("const X = {}", "X", 0),
            Err(Error::MissingTerminator { .. })
        ));
    }

    #[test]
    fn whitespace_before_semicolon_is_tolerated() {
        let doc = "const X = {}\n  ;";
        let span = scan_literal(doc, "X", 0).unwrap();
        assert_eq!(span.replace_end, doc.len());
    }
}
