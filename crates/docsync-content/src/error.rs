//! Error types for docsync-content

/// Result type for docsync-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while locating or decoding managed blocks
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The anchor pattern for a required block is missing or appears more
    /// than once.
    #[error("Missing or ambiguous anchor for {name} (found {found})")]
    AmbiguousAnchor { name: &'static str, found: usize },

    /// No opening brace follows the block's assignment.
    #[error("{name}: object literal opening brace not found")]
    MissingOpeningBrace { name: &'static str },

    /// The scanner reached end of input before the literal's braces
    /// balanced.
    #[error("{name}: unbalanced object literal (end of input at depth {depth})")]
    UnbalancedLiteral { name: &'static str, depth: usize },

    /// The balanced literal is not followed by a `;` terminator.
    #[error("{name}: object literal missing trailing semicolon")]
    MissingTerminator { name: &'static str },

    /// The literal body is not strict JSON.
    #[error(
        "{name}: block body is not valid JSON ({source}); \
         hand-edited non-JSON syntax must be normalized to strict JSON first"
    )]
    MalformedLiteral {
        name: &'static str,
        source: serde_json::Error,
    },
}
