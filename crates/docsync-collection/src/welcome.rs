//! Welcome page content derived from the collection.

use docsync_core::text::{first_sentence, strip_markdown};

use crate::collection::Collection;
use crate::model::{SupportCard, WelcomeContent};
use crate::parse::TopFolder;

const DEFAULT_TITLE: &str = "API Documentation";
const DEFAULT_SUBTITLE: &str = "API documentation generated from the source collection.";
const BASE_URL: &str = "https://api.example.com/ProductAPI";

/// Build the welcome block: title/subtitle from the collection info, one
/// support card per top-level folder, and two fixed guideline checklists.
/// The first left-hand guideline changes when the collection exposes an
/// authentication endpoint.
pub fn build_welcome_content(
    collection: &Collection,
    top_folders: &[TopFolder],
    has_auth_endpoint: bool,
) -> WelcomeContent {
    let raw_title = if collection.info.name.is_empty() {
        DEFAULT_TITLE
    } else {
        collection.info.name.as_str()
    };
    let title = strip_markdown(raw_title);
    let title = if title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        title
    };

    let raw_subtitle = if collection.info.description.is_empty() {
        DEFAULT_SUBTITLE
    } else {
        collection.info.description.as_str()
    };
    let subtitle = first_sentence(raw_subtitle);

    let support_cards = top_folders
        .iter()
        .map(|folder| SupportCard {
            title: folder.name.clone(),
            description: if folder.description.is_empty() {
                format!("Endpoints for {}.", folder.name)
            } else {
                first_sentence(&folder.description)
            },
            route_type: "category".to_string(),
            section: folder.key.clone(),
        })
        .collect();

    let first_left = if has_auth_endpoint {
        "Run authentication first and reuse session cookies in subsequent requests."
    } else {
        "Confirm required credentials and headers before invoking endpoints."
    };

    WelcomeContent {
        title,
        subtitle,
        base_url: BASE_URL.to_string(),
        guidelines_left: vec![
            first_left.to_string(),
            "Use collection examples to validate request shape before coding integration."
                .to_string(),
            "Handle non-success status codes with deterministic retry/error handling.".to_string(),
        ],
        guidelines_right: vec![
            "Track release notes for integration-impacting changes.".to_string(),
            "Use endpoint examples in docs for quick troubleshooting.".to_string(),
            "Keep environment secrets in secure variables, never in committed files.".to_string(),
        ],
        support_cards,
    }
}
