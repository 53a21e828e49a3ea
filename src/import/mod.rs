//! Bulk import pipeline: CSV decoding and per-item batch execution.
//!
//! Mirrors the export pipeline in reverse. A decoded file (or a numeric id
//! range) is walked strictly in order, one remote call per item, with every
//! item's outcome isolated and logged. All-or-nothing semantics are
//! explicitly rejected in favor of maximum partial progress.

pub mod codec;
pub mod importer;

pub use codec::{decode, ImportRow, IMPORT_COLUMNS};
pub use importer::{BatchEntry, BatchOutcome, BatchStatus, BulkImporter, DEFAULT_CATEGORY};
