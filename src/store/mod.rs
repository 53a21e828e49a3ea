//! HTTP client layer for the remote content store.
//!
//! This module provides typed clients for the store's record resources.
//! Key features:
//!
//! - **Single-call contract** - every operation is one remote call; retry
//!   policy belongs to callers
//! - **Error taxonomy mapping** - 404/400/409 map onto `NotFound`,
//!   `Validation`, and `Conflict`; transport failures onto `ConnectionFailed`
//! - **Safe logging** - one `method path status duration` line per request,
//!   never request or response bodies

pub mod audit;
pub mod client;
pub mod generate;
pub mod legislation;
pub mod terms;

pub use audit::{AuditClient, AuditRecord, AuditUpdate};
pub use client::{StoreClient, StoreConfig};
pub use generate::GenerationClient;
pub use legislation::{BillPatch, LegislationClient, LegislativeBill};
pub use terms::{CreatedTerm, NewTerm, Term, TermPatch, TermsClient};
