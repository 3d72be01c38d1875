//! Snapshot model: the normalized view of a collection at one point in time

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A top-level documentation category derived from a root folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
    pub order: usize,
}

/// One request or body parameter of an endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub required: bool,
    pub param_type: String,
    pub desc: String,
}

/// A normalized example response as recorded in the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub name: String,
    /// HTTP code as recorded; numbers stay numbers, anything else is kept
    /// verbatim. `Null` when the response carries no code.
    pub code: Value,
    pub status: String,
    pub body: String,
}

/// A rendered example shown in the documentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleRecord {
    pub title: String,
    pub subtitle: String,
    pub request: String,
    pub response: String,
    pub note: String,
}

/// One flattened response-shape field (dotted path, `[]` for arrays).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaField {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub example: String,
}

/// A parsed endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub id: String,
    pub name: String,
    pub method: String,
    pub path: String,
    pub category_id: String,
    pub description: String,
    pub params: Vec<Parameter>,
    pub examples: Vec<ExampleRecord>,
    pub responses: Vec<ResponseRecord>,
}

/// Severity family assigned by the error classifier. Families are tested
/// in declaration order; the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Auth,
    Quota,
    Validation,
    Server,
    Unknown,
}

/// An application-level status code observed in response payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCodeEntry {
    pub code: String,
    pub meaning: String,
    pub action: String,
    pub severity: Severity,
    /// Up to five contributing endpoint signatures (`METHOD /path`),
    /// sorted and de-duplicated.
    pub sources: Vec<String>,
}

/// An HTTP-level status code observed on endpoint responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpCodeEntry {
    /// Numeric when the recorded code is numeric, otherwise the raw string.
    pub code: Value,
    pub meaning: String,
    pub description: String,
    pub severity: Severity,
}

/// Derived error-code catalog.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorCatalog {
    pub status_codes: Vec<StatusCodeEntry>,
    pub http_codes: Vec<HttpCodeEntry>,
    pub notes: Vec<String>,
}

/// One support card on the welcome page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportCard {
    pub title: String,
    pub description: String,
    pub route_type: String,
    pub section: String,
}

/// Welcome page content.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeContent {
    pub title: String,
    pub subtitle: String,
    pub base_url: String,
    pub guidelines_left: Vec<String>,
    pub guidelines_right: Vec<String>,
    pub support_cards: Vec<SupportCard>,
}

/// The normalized view of a collection.
///
/// `api_data` and `examples` are kept as raw JSON maps: detail records for
/// static pages and any curated fields from a prior run are preserved
/// verbatim across re-parses, whatever their shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub categories: Vec<Category>,
    pub endpoints: Vec<Endpoint>,
    pub api_data: Map<String, Value>,
    pub examples: Map<String, Value>,
    pub error_codes: ErrorCatalog,
    pub welcome_content: WelcomeContent,
    /// Content hash over categories and endpoints.
    pub hash: String,
}
