//! Folder-name to category-key mapping
//!
//! Pure configuration: known folder names map to short category keys, and
//! anything unrecognized falls back to a slug of the folder name.

use docsync_core::text::slugify;

/// Case-insensitive substring aliases, checked in order.
const CATEGORY_ALIAS: &[(&str, &str)] = &[
    ("Authentication", "auth"),
    ("User Status & Quota", "auth"),
    ("Part Search Operations", "search"),
    ("Parametric Search Operations", "parametric"),
    ("BOM Operations", "bom"),
    ("ACL & Alert & PCN Operations", "acl"),
    ("Supply Chain Risk Management (SCRM) Operations", "scrm"),
    ("Manufacturer/Supplier Search", "mfr"),
    ("Reports", "reports"),
    ("IPC", "ipc"),
];

/// Map a top-level folder name to its category key.
pub fn map_category_key(folder_name: &str) -> String {
    let normalized = folder_name.to_lowercase();
    for (source, key) in CATEGORY_ALIAS {
        if normalized.contains(&source.to_lowercase()) {
            return (*key).to_string();
        }
    }
    slugify(folder_name)
}
