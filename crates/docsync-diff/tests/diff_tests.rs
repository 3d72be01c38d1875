//! Structural diff scenarios over parsed snapshots.

use docsync_collection::{Collection, ParseOptions, Severity, parse_collection};
use docsync_diff::{SourceDescriptor, diff_snapshots};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn sources() -> (SourceDescriptor, SourceDescriptor) {
    (
        SourceDescriptor {
            label: "baseline.json".to_string(),
            file_hash: "1".to_string(),
            collection_path: "collection.json".to_string(),
        },
        SourceDescriptor {
            label: "collection.json".to_string(),
            file_hash: "2".to_string(),
            collection_path: "collection.json".to_string(),
        },
    )
}

fn collection(root_folder: &str) -> Collection {
    let raw = json!({
        "info": { "name": "Sample API", "description": "Docs." },
        "item": [
            {
                "name": root_folder,
                "item": [
                    {
                        "name": "Authenticate User",
                        "request": {
                            "method": "POST",
                            "url": { "raw": "https://api.example.com/auth/login" }
                        },
                        "response": [
                            {
                                "name": "Denied",
                                "code": 401,
                                "status": "Unauthorized",
                                "body": "{\"code\":\"5\",\"message\":\"session expired\"}"
                            }
                        ]
                    }
                ]
            }
        ]
    });
    serde_json::from_value(raw).unwrap()
}

#[test]
fn identical_snapshots_diff_to_all_zero_counters() {
    let snapshot = parse_collection(&collection("Authentication"), &ParseOptions::default());
    let (baseline_source, current_source) = sources();
    let diff = diff_snapshots(&snapshot, &snapshot, baseline_source, current_source);

    assert!(diff.summary.is_empty());
    assert!(diff.endpoints.added.is_empty());
    assert!(diff.endpoints.removed.is_empty());
    assert!(diff.endpoints.changed.is_empty());
    assert_eq!(diff.hashes.baseline, diff.hashes.current);
    // A release note is appended on every run, so its block always flags.
    assert_eq!(diff.html_blocks_changed, vec!["RELEASE_NOTES_CONTENT"]);
}

#[test]
fn renaming_a_root_folder_touches_only_welcome_and_categories() {
    let baseline = parse_collection(&collection("Authentication"), &ParseOptions::default());
    // "User Status & Quota" aliases to the same "auth" key, so this is a
    // pure display rename; the baseline records pin the endpoint ids.
    let current = parse_collection(
        &collection("User Status & Quota"),
        &ParseOptions {
            current_api_data: baseline.api_data.clone(),
            current_examples: baseline.examples.clone(),
        },
    );
    let (baseline_source, current_source) = sources();
    let diff = diff_snapshots(&baseline, &current, baseline_source, current_source);

    assert_eq!(diff.summary.endpoints_added, 0);
    assert_eq!(diff.summary.endpoints_removed, 0);
    assert_eq!(diff.summary.endpoints_changed, 0);
    assert_eq!(diff.categories.changed, vec!["auth".to_string()]);
    assert_eq!(diff.welcome.changed_sections, vec!["supportCards".to_string()]);
    assert!(diff.html_blocks_changed.contains(&"WELCOME_CONTENT".to_string()));
}

#[test]
fn endpoint_changes_report_every_differing_field() {
    let baseline = parse_collection(&collection("Authentication"), &ParseOptions::default());

    let mut altered: Value =
        json!({ "info": { "name": "Sample API", "description": "Docs." } });
    altered["item"] = json!([
        {
            "name": "Authentication",
            "item": [
                {
                    "name": "Authenticate User",
                    "description": "Now documented.",
                    "request": {
                        "method": "PUT",
                        "url": {
                            "raw": "https://api.example.com/auth/login",
                            "query": [{ "key": "strict" }]
                        }
                    },
                    "response": []
                }
            ]
        }
    ]);
    // Parsed without prior context: the slug still lands on the same id,
    // so the method change classifies as a field change, not add/remove.
    let current = parse_collection(
        &serde_json::from_value(altered).unwrap(),
        &ParseOptions::default(),
    );
    let (baseline_source, current_source) = sources();
    let diff = diff_snapshots(&baseline, &current, baseline_source, current_source);

    assert_eq!(diff.summary.endpoints_changed, 1);
    let change = &diff.endpoints.changed[0];
    assert_eq!(change.id, "authenticate-user");
    assert_eq!(
        change.change_types,
        vec!["method", "params", "description", "examples"]
    );
}

#[test]
fn newly_observed_auth_failures_enter_the_catalog_as_auth() {
    let baseline = parse_collection(&collection("Authentication"), &ParseOptions::default());

    let mut with_failures = collection("Authentication");
    let responses = &mut with_failures.items[0].items.as_mut().unwrap()[0].responses;
    responses.push(
        serde_json::from_value(json!({
            "name": "Unauthorized",
            "code": 401,
            "status": "Unauthorized",
            "body": "{\"status\":{\"Code\":\"401\",\"Message\":\"Session expired\"}}"
        }))
        .unwrap(),
    );
    responses.push(
        serde_json::from_value(json!({
            "name": "Forbidden",
            "code": 403,
            "status": "Forbidden",
            "body": "{\"status\":{\"Code\":\"403\",\"Message\":\"Access denied\"}}"
        }))
        .unwrap(),
    );
    let current = parse_collection(
        &with_failures,
        &ParseOptions {
            current_api_data: baseline.api_data.clone(),
            current_examples: baseline.examples.clone(),
        },
    );
    let (baseline_source, current_source) = sources();
    let diff = diff_snapshots(&baseline, &current, baseline_source, current_source);

    assert_eq!(diff.summary.error_codes_added, 2);
    let added: Vec<(&str, Severity)> = diff
        .error_codes
        .added
        .iter()
        .map(|entry| (entry.code.as_str(), entry.severity))
        .collect();
    assert_eq!(added, vec![("401", Severity::Auth), ("403", Severity::Auth)]);
    assert!(diff.html_blocks_changed.contains(&"ERROR_CODES_CONTENT".to_string()));
}

#[test]
fn added_and_removed_error_codes_carry_full_entries() {
    let baseline = parse_collection(&collection("Authentication"), &ParseOptions::default());

    let mut no_body = collection("Authentication");
    no_body.items[0].items.as_mut().unwrap()[0].responses.clear();
    let current = parse_collection(
        &no_body,
        &ParseOptions {
            current_api_data: baseline.api_data.clone(),
            current_examples: baseline.examples.clone(),
        },
    );
    let (baseline_source, current_source) = sources();
    let diff = diff_snapshots(&baseline, &current, baseline_source, current_source);

    assert_eq!(diff.summary.error_codes_removed, 1);
    assert_eq!(diff.error_codes.removed[0].code, "5");
    assert!(diff.html_blocks_changed.contains(&"ERROR_CODES_CONTENT".to_string()));
    // The rebuilt example disappears with the response.
    assert!(diff.html_blocks_changed.contains(&"EXAMPLES".to_string()));
}
