//! Core library for an administrative console over a remote term and
//! legislation content store.
//!
//! The store itself is an external JSON-over-HTTP collaborator; this crate
//! owns the logic around it:
//!
//! - **Typed store clients** for terms, legislation, audits, and text
//!   generation ([`store`])
//! - **Bulk export** - concurrent fan-out fetch of every record, merge with
//!   audit annotations, rectangular CSV serialization, atomic file output
//!   ([`export`])
//! - **Bulk import** - decoded CSV rows or a numeric id range, one create or
//!   generate call per item, streaming per-item outcome log, no early
//!   termination ([`import`])
//! - **Keyword autocompletion** - prefix matching over existing record names
//!   with tab-acceptance semantics ([`suggest`])

pub mod error;
pub mod export;
pub mod import;
pub mod store;
pub mod suggest;

pub use error::{AppError, ErrorPresentation};
pub use export::{BulkFetcher, ExportBatch, FetchFailure, MergedRow};
pub use import::{BatchEntry, BatchOutcome, BatchStatus, BulkImporter, ImportRow};
pub use store::{
    AuditClient, AuditRecord, GenerationClient, LegislationClient, LegislativeBill, StoreClient,
    StoreConfig, Term, TermsClient,
};
pub use suggest::KeywordMatcher;
