//! Reconciliation engine for docsync
//!
//! Flattens a parsed snapshot and a document's block set into a unified
//! row registry, classifies each row, and applies per-row resolutions back
//! to both sources: resolved values flow into the document's presentation
//! blocks, and best-effort back-writes flow into the collection.

pub mod apply;
pub mod classify;
pub mod registry;

pub use apply::{MergeOutcome, Resolution, ResolutionSource, apply_resolutions};
pub use classify::{RowState, classify_row};
pub use registry::{RowBlock, UnifiedRow, build_unified_registry, row_key};
