//! CLI end-to-end tests that invoke the compiled `docsync` binary against
//! temporary directories holding a collection and a documentation page.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

fn run(dir: &std::path::Path, args: &[&str]) -> std::process::Output {
    Command::cargo_bin("docsync")
        .expect("binary exists")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("failed to execute docsync binary")
}

const INDENT: &str = "            ";

/// Render one `const NAME = {...};` declaration the way the page stores
/// them: four-space JSON indentation, continuation lines prefixed with the
/// script indent.
fn block_text(name: &str, value: &Value) -> String {
    let mut pretty = serde_json::Serializer::with_formatter(
        Vec::new(),
        serde_json::ser::PrettyFormatter::with_indent(b"    "),
    );
    serde::Serialize::serialize(value, &mut pretty).expect("serializable value");
    let four = String::from_utf8(pretty.into_inner()).expect("utf8 json");
    let indented: Vec<String> = four
        .lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                line.to_string()
            } else {
                format!("{INDENT}{line}")
            }
        })
        .collect();
    format!("{INDENT}const {name} = {};\n", indented.join("\n"))
}

fn write_fixtures(dir: &std::path::Path) {
    let collection = json!({
        "info": { "name": "Sample API", "description": "Docs." },
        "item": [
            {
                "name": "Authentication",
                "item": [
                    {
                        "name": "Authenticate User",
                        "request": {
                            "method": "POST",
                            "url": { "raw": "https://api.example.com/auth/login" }
                        },
                        "response": [
                            { "name": "OK", "code": 200, "status": "OK", "body": "{\"code\":\"0\",\"message\":\"ok\"}" }
                        ]
                    }
                ]
            }
        ]
    });
    fs::write(
        dir.join("collection.json"),
        serde_json::to_string_pretty(&collection).unwrap(),
    )
    .unwrap();

    let mut page = String::from("<!DOCTYPE html>\n<html><body>\n<script>\n");
    page.push_str(&block_text("API_DATA", &json!({})));
    page.push_str(&block_text("EXAMPLES", &json!({})));
    page.push_str(&block_text("WELCOME_CONTENT", &json!({"title": "Docs"})));
    page.push_str(&block_text("ERROR_CODES_CONTENT", &json!({"statusCodes": [], "httpCodes": []})));
    page.push_str(&block_text("RELEASE_NOTES_CONTENT", &json!({"items": []})));
    page.push_str("</script>\n</body></html>\n");
    fs::write(dir.join("docs.html"), page).unwrap();
}

fn sync_args<'a>() -> Vec<&'a str> {
    vec![
        "sync",
        "--collection",
        "collection.json",
        "--html",
        "docs.html",
        "--release-version",
        "2.4.0",
        "--release-date",
        "2026-08-27",
        "--release-title",
        "Sync",
    ]
}

#[test]
fn help_exits_zero() {
    Command::cargo_bin("docsync")
        .expect("binary exists")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("sync").and(predicate::str::contains("diff")));
}

#[test]
fn sync_appends_a_release_note_and_writes_artifacts() {
    let dir = TempDir::new().unwrap();
    write_fixtures(dir.path());

    let out = run(dir.path(), &sync_args());
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let output: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(output["htmlChanged"], json!(true));
    assert_eq!(output["baseline"], json!("fallback-current"));
    assert_eq!(output["summary"]["endpointsAdded"], json!(0));
    assert_eq!(output["htmlBlocksChanged"], json!(["RELEASE_NOTES_CONTENT"]));

    let page = fs::read_to_string(dir.path().join("docs.html")).unwrap();
    assert!(page.contains("\"version\": \"2.4.0\""));
    assert!(page.contains("\"tag\": \"No API Changes\""));
    // Curated blocks stay untouched.
    assert!(page.contains("const WELCOME_CONTENT = {\n                \"title\": \"Docs\"\n            };"));

    for artifact in [
        "artifacts/collection_html_diff.json",
        "artifacts/collection_html_diff.md",
        "artifacts/collection_html_content_snapshot.json",
    ] {
        assert!(dir.path().join(artifact).exists(), "missing {artifact}");
    }

    let md = fs::read_to_string(dir.path().join("artifacts/collection_html_diff.md")).unwrap();
    assert!(md.contains("- Endpoints: +0 / -0 / ~0"));
}

#[test]
fn dry_run_leaves_the_page_untouched() {
    let dir = TempDir::new().unwrap();
    write_fixtures(dir.path());
    let before = fs::read_to_string(dir.path().join("docs.html")).unwrap();

    let mut args = sync_args();
    args.push("--dry-run");
    let out = run(dir.path(), &args);
    assert!(out.status.success());

    let output: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(output["dryRun"], json!(true));
    assert_eq!(output["htmlChanged"], json!(true));
    let after = fs::read_to_string(dir.path().join("docs.html")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn resyncing_the_same_version_is_stable() {
    let dir = TempDir::new().unwrap();
    write_fixtures(dir.path());

    let first = run(dir.path(), &sync_args());
    assert!(first.status.success());
    let page_after_first = fs::read_to_string(dir.path().join("docs.html")).unwrap();

    let second = run(dir.path(), &sync_args());
    assert!(second.status.success());
    let output: Value = serde_json::from_slice(&second.stdout).unwrap();
    // The entry for 2.4.0 is replaced, not stacked, so nothing changes.
    assert_eq!(output["htmlChanged"], json!(false));
    let page_after_second = fs::read_to_string(dir.path().join("docs.html")).unwrap();
    assert_eq!(page_after_first, page_after_second);
}

#[test]
fn diff_against_a_baseline_reports_added_endpoints() {
    let dir = TempDir::new().unwrap();
    write_fixtures(dir.path());
    fs::write(
        dir.path().join("baseline.json"),
        serde_json::to_string_pretty(&json!({
            "info": { "name": "Sample API", "description": "Docs." },
            "item": []
        }))
        .unwrap(),
    )
    .unwrap();

    let out = run(
        dir.path(),
        &[
            "diff",
            "--collection",
            "collection.json",
            "--html",
            "docs.html",
            "--baseline",
            "baseline.json",
        ],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let report: Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["summary"]["endpointsAdded"], json!(1));
    assert_eq!(report["endpoints"]["added"], json!(["authenticate-user"]));
    assert_eq!(report["baseline"]["label"], json!("baseline.json"));
}

#[test]
fn missing_collection_fails_with_a_clear_error() {
    let dir = TempDir::new().unwrap();
    write_fixtures(dir.path());
    fs::remove_file(dir.path().join("collection.json")).unwrap();

    Command::cargo_bin("docsync")
        .expect("binary exists")
        .args(&sync_args())
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Required file not found: collection.json",
        ));
}
