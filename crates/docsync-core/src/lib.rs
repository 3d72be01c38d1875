//! Shared utilities for the docsync workspace
//!
//! Provides order-normalized JSON comparison and hashing, dotted-path
//! writes into JSON values, and the text helpers (slugs, markdown
//! stripping, sentence extraction) used by the collection parser and the
//! reconciliation engine.

pub mod json;
pub mod path;
pub mod text;

pub use json::{deep_equal, hash_object, hash_str, sort_deep, stable_stringify};
pub use path::set_at_path;
pub use text::{clean_text, collapse_whitespace, first_sentence, slugify, strip_markdown};
