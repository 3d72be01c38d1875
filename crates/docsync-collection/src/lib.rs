//! Collection parsing for docsync
//!
//! Turns an imported API collection (a folder/request tree with example
//! responses) into a normalized [`Snapshot`]: categories, endpoints with
//! stable ids, per-endpoint detail records and examples, a derived
//! error-code catalog, and welcome content. Parsing is deterministic and
//! idempotent when the prior detail records are supplied as context.

pub mod catalog;
pub mod categories;
pub mod collection;
pub mod curl;
pub mod identity;
pub mod model;
pub mod parse;
pub mod paths;
pub mod schema;
pub mod welcome;

pub use catalog::build_error_catalog;
pub use collection::{Collection, CollectionInfo, CollectionItem, RequestSpec};
pub use model::{
    Category, Endpoint, ErrorCatalog, ExampleRecord, HttpCodeEntry, Parameter, ResponseRecord,
    SchemaField, Severity, Snapshot, StatusCodeEntry, SupportCard, WelcomeContent,
};
pub use parse::{ParseOptions, TopFolder, parse_collection};
pub use welcome::build_welcome_content;
