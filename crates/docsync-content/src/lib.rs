//! Managed content blocks in the documentation page
//!
//! The documentation page embeds five `const NAME = { ... };` declarations
//! inside a script region. This crate locates each declaration with a
//! comment- and string-aware scanner, decodes the literal into JSON, and
//! splices updated literals back without disturbing any other byte of the
//! page.

pub mod block;
pub mod codec;
pub mod error;
pub mod scanner;
pub mod splice;

pub use block::{BlockName, BlockSet, ContentBlock, normalize_newlines};
pub use codec::{DEFAULT_INDENT, serialize_block};
pub use error::{Error, Result};
pub use splice::apply_updates;
