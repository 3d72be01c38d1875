//! Diff artifacts written after every sync run.

use std::fs;
use std::path::{Path, PathBuf};

use docsync_diff::DiffReport;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// Paths of the written artifacts, echoed in the command output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactPaths {
    pub json_path: PathBuf,
    pub md_path: PathBuf,
    pub snapshot_path: PathBuf,
}

/// Render the human-readable diff summary.
pub fn build_markdown_diff(diff: &DiffReport) -> String {
    fn join_or_none(items: &[String]) -> String {
        if items.is_empty() {
            "None".to_string()
        } else {
            items.join(", ")
        }
    }

    let mut lines: Vec<String> = Vec::new();
    lines.push("# Collection to HTML Sync Diff".to_string());
    lines.push(String::new());
    lines.push(format!("- Baseline: {}", diff.baseline.label));
    lines.push(format!("- Current: {}", diff.current.label));
    lines.push(String::new());
    lines.push("## Summary".to_string());
    lines.push(format!(
        "- Categories: +{} / -{} / ~{}",
        diff.summary.categories_added,
        diff.summary.categories_removed,
        diff.summary.categories_changed
    ));
    lines.push(format!(
        "- Endpoints: +{} / -{} / ~{}",
        diff.summary.endpoints_added,
        diff.summary.endpoints_removed,
        diff.summary.endpoints_changed
    ));
    lines.push(format!(
        "- Error Codes: +{} / -{} / ~{}",
        diff.summary.error_codes_added,
        diff.summary.error_codes_removed,
        diff.summary.error_codes_changed
    ));
    lines.push(format!(
        "- Welcome Sections Changed: {}",
        diff.summary.welcome_sections_changed
    ));
    lines.push(String::new());

    lines.push("## Endpoint Changes".to_string());
    lines.push(format!("- Added: {}", join_or_none(&diff.endpoints.added)));
    lines.push(format!("- Removed: {}", join_or_none(&diff.endpoints.removed)));
    let changed: Vec<String> = diff
        .endpoints
        .changed
        .iter()
        .map(|item| format!("{} [{}]", item.id, item.change_types.join(", ")))
        .collect();
    lines.push(format!(
        "- Changed: {}",
        if changed.is_empty() {
            "None".to_string()
        } else {
            changed.join("; ")
        }
    ));
    lines.push(String::new());

    lines.push("## Error Code Changes".to_string());
    let codes = |entries: &[docsync_collection::StatusCodeEntry]| {
        join_or_none(&entries.iter().map(|e| e.code.clone()).collect::<Vec<_>>())
    };
    lines.push(format!("- Added: {}", codes(&diff.error_codes.added)));
    lines.push(format!("- Removed: {}", codes(&diff.error_codes.removed)));
    lines.push(format!(
        "- Changed: {}",
        join_or_none(
            &diff
                .error_codes
                .changed
                .iter()
                .map(|e| e.code.clone())
                .collect::<Vec<_>>()
        )
    ));
    lines.push(String::new());

    lines.push("## Welcome Changes".to_string());
    lines.push(format!(
        "- Sections: {}",
        join_or_none(&diff.welcome.changed_sections)
    ));
    lines.push(String::new());

    lines.push("## HTML Blocks Changed".to_string());
    lines.push(format!("- {}", diff.html_blocks_changed.join(", ")));

    format!("{}\n", lines.join("\n"))
}

/// Write the diff JSON, its markdown rendering, and the derived content
/// snapshot into the artifacts directory.
pub fn write_artifacts(
    artifacts_dir: &Path,
    diff_json: &Value,
    diff: &DiffReport,
    content_snapshot: &Value,
) -> Result<ArtifactPaths> {
    fs::create_dir_all(artifacts_dir)?;

    let paths = ArtifactPaths {
        json_path: artifacts_dir.join("collection_html_diff.json"),
        md_path: artifacts_dir.join("collection_html_diff.md"),
        snapshot_path: artifacts_dir.join("collection_html_content_snapshot.json"),
    };

    fs::write(
        &paths.json_path,
        format!("{}\n", serde_json::to_string_pretty(diff_json)?),
    )?;
    fs::write(&paths.md_path, build_markdown_diff(diff))?;
    fs::write(
        &paths.snapshot_path,
        format!("{}\n", serde_json::to_string_pretty(content_snapshot)?),
    )?;

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsync_diff::{DiffReport, EndpointChange};

    #[test]
    fn markdown_spells_out_empty_sections() {
        let mut diff = DiffReport::default();
        diff.baseline.label = "baseline.json".to_string();
        diff.current.label = "collection.json".to_string();
        diff.html_blocks_changed = vec!["RELEASE_NOTES_CONTENT".to_string()];
        let text = build_markdown_diff(&diff);
        assert!(text.contains("- Baseline: baseline.json"));
        assert!(text.contains("- Added: None"));
        assert!(text.contains("- RELEASE_NOTES_CONTENT"));
    }

    #[test]
    fn markdown_lists_changed_endpoints_with_their_fields() {
        let mut diff = DiffReport::default();
        diff.endpoints.changed.push(EndpointChange {
            id: "part-search".to_string(),
            change_types: vec!["method".to_string(), "params".to_string()],
        });
        let text = build_markdown_diff(&diff);
        assert!(text.contains("- Changed: part-search [method, params]"));
    }
}
