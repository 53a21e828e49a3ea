//! Bulk aggregation, merge, and CSV export pipeline.
//!
//! The pipeline enumerates every record id, fan-out fetches each record and
//! (optionally) its audit annotation concurrently, merges the pair into a
//! flat rectangular row, and serializes the batch to delimited text with a
//! fixed column order. Per-record failures are collected alongside the
//! results instead of aborting the batch.

pub mod fetcher;
pub mod merge;
pub mod writer;

pub use fetcher::{BulkFetcher, ExportBatch, FetchFailure};
pub use merge::{flatten, header, merge, MergedRow, AUDIT_COLUMNS, RECORD_COLUMNS};
pub use writer::{batch_file_name, encode, term_file_name, write_export};
