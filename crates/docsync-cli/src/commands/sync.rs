//! The sync command: release notes update plus diff artifacts.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use docsync_content::{BlockName, apply_updates};
use docsync_diff::diff_snapshots;
use serde_json::{Value, json};
use tracing::info;

use crate::artifacts::write_artifacts;
use crate::commands::load_sources;
use crate::error::Result;
use crate::release::{build_release_entry, build_release_notes_content};

pub struct SyncArgs<'a> {
    pub collection: &'a str,
    pub html: &'a str,
    pub baseline: Option<&'a str>,
    pub release_version: &'a str,
    pub release_date: &'a str,
    pub release_title: &'a str,
    pub artifacts_dir: &'a str,
    pub dry_run: bool,
}

/// Run a sync: diff the snapshots, prepend a release note, write artifacts.
///
/// Only the release notes block is rewritten. The other four blocks hold
/// curated documentation and must not be overwritten with raw collection
/// data; reconciling those is the merge engine's job, not the sync's.
pub fn run_sync(args: &SyncArgs<'_>) -> Result<()> {
    let sources = load_sources(args.collection, args.html, args.baseline)?;

    let diff = diff_snapshots(
        &sources.baseline_snapshot,
        &sources.current_snapshot,
        sources.baseline_source.clone(),
        sources.current_source,
    );

    let entry = build_release_entry(
        args.release_version,
        args.release_date,
        args.release_title,
        &diff,
    );
    let release_notes = build_release_notes_content(
        sources.blocks.value(BlockName::ReleaseNotesContent),
        &entry,
    );

    let mut updates: BTreeMap<BlockName, Value> = BTreeMap::new();
    updates.insert(BlockName::ReleaseNotesContent, release_notes);
    let updated_html = apply_updates(&sources.html, &sources.blocks, &updates);

    let html_changed = updated_html != sources.html;
    if html_changed && !args.dry_run {
        fs::write(args.html, &updated_html)?;
        info!(path = args.html, "documentation page updated");
    }

    let mut diff_json = serde_json::to_value(&diff)?;
    if let Some(map) = diff_json.as_object_mut() {
        map.insert(
            "releaseNoteEntry".to_string(),
            json!({
                "version": entry.version,
                "date": entry.date,
                "title": args.release_title,
                "status": if entry.is_change() { "changed" } else { "no-change" },
            }),
        );
    }

    let content_snapshot = json!({
        "api_data": sources.current_snapshot.api_data,
        "examples": sources.current_snapshot.examples,
        "error_codes": sources.current_snapshot.error_codes,
        "welcome_content": sources.current_snapshot.welcome_content,
    });

    let artifacts = write_artifacts(
        Path::new(args.artifacts_dir),
        &diff_json,
        &diff,
        &content_snapshot,
    )?;

    let output = json!({
        "dryRun": args.dry_run,
        "htmlChanged": html_changed,
        "baseline": sources.baseline_source.label,
        "artifacts": artifacts,
        "summary": diff.summary,
        "htmlBlocksChanged": diff.html_blocks_changed,
        "releaseVersion": args.release_version,
        "releaseDate": args.release_date,
        "releaseTitle": args.release_title,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
