//! Read-only serde view of the imported collection tree
//!
//! Every field is defaulted so partially filled exports still parse; the
//! parser treats absent data as empty rather than failing.

use serde::Deserialize;
use serde_json::Value;

/// The imported collection: metadata plus a folder/request tree.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub info: CollectionInfo,
    #[serde(default, rename = "item")]
    pub items: Vec<CollectionItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A node in the tree: a folder when `items` is present, an endpoint when
/// it carries a request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "item")]
    pub items: Option<Vec<CollectionItem>>,
    #[serde(default)]
    pub request: Option<RequestSpec>,
    #[serde(default, rename = "response")]
    pub responses: Vec<ResponseSpec>,
}

impl CollectionItem {
    /// Folders are nodes carrying a child list, even an empty one.
    pub fn is_folder(&self) -> bool {
        self.items.is_some()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestSpec {
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub url: Option<UrlSpec>,
    #[serde(default)]
    pub body: Option<BodySpec>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A request URL: either a bare string or the structured form.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UrlSpec {
    Raw(String),
    Detailed(UrlDetail),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UrlDetail {
    #[serde(default)]
    pub raw: String,
    /// Structured path segments; numeric and boolean segments keep their
    /// text form, other non-strings are dropped.
    #[serde(default)]
    pub path: Option<Vec<Value>>,
    #[serde(default)]
    pub query: Vec<QueryParam>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryParam {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub disabled: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BodySpec {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub urlencoded: Option<Vec<FormField>>,
    #[serde(default)]
    pub formdata: Option<Vec<FormField>>,
    #[serde(default)]
    pub raw: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormField {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default, rename = "type")]
    pub field_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub disabled: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponseSpec {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub code: Option<Value>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}
