//! Concurrent fan-out aggregation of the full record set.
//!
//! Retrieves every term id, then fetches each term (and, when requested, its
//! audit record) concurrently. Per-id failures are collected, never fatal: a
//! single missing record must never blank the entire export. Only an empty
//! id list aborts the operation up front.

use futures_util::future::join_all;
use tracing::{info, warn};

use crate::error::AppError;
use crate::export::merge::{flatten, merge, MergedRow};
use crate::store::{AuditClient, TermsClient};

// ─────────────────────────────────────────────────────────────────────────────
// Public Types
// ─────────────────────────────────────────────────────────────────────────────

/// A per-id fetch failure recorded during a bulk export.
#[derive(Debug)]
pub struct FetchFailure {
    /// The id whose fetch failed.
    pub id: u64,
    /// What went wrong for this id.
    pub error: AppError,
}

/// Result of a bulk fetch: the rows that succeeded plus the per-id failures.
///
/// `rows` follows the store's id order; `failures` holds every id that was
/// excluded and why.
#[derive(Debug)]
pub struct ExportBatch {
    pub rows: Vec<MergedRow>,
    pub failures: Vec<FetchFailure>,
}

// ─────────────────────────────────────────────────────────────────────────────
// BulkFetcher
// ─────────────────────────────────────────────────────────────────────────────

/// Fan-out fetcher over the term catalogue.
///
/// Concurrency is unbounded: one in-flight request pair per id, joined by an
/// all-complete barrier. Typical batch sizes are in the low hundreds, which
/// the store absorbs; a concurrency cap is a recorded open question.
pub struct BulkFetcher<'a> {
    terms: &'a TermsClient,
    audits: &'a AuditClient,
}

impl<'a> BulkFetcher<'a> {
    /// Creates a fetcher over the given clients.
    pub fn new(terms: &'a TermsClient, audits: &'a AuditClient) -> Self {
        Self { terms, audits }
    }

    /// Fetches and merges every record in the store.
    ///
    /// # Errors
    ///
    /// - `AppError::EmptyExport` - the store returned zero ids; surfaced
    ///   rather than silently producing an empty file
    /// - errors from the id enumeration call itself
    ///
    /// Per-id fetch failures do NOT error; they land in
    /// [`ExportBatch::failures`].
    pub async fn fetch_all(&self, include_audit: bool) -> Result<ExportBatch, AppError> {
        let ids = self.terms.fetch_all_ids().await?;
        if ids.is_empty() {
            return Err(AppError::EmptyExport);
        }

        info!(
            "[EXPORT] Fanning out {} record fetches (audit: {})",
            ids.len(),
            include_audit
        );

        let branches = ids.iter().map(|&id| self.fetch_row(id, include_audit));
        let settled = join_all(branches).await;

        let mut rows = Vec::with_capacity(settled.len());
        let mut failures = Vec::new();
        for outcome in settled {
            match outcome {
                Ok(row) => rows.push(row),
                Err(failure) => {
                    warn!(
                        "[EXPORT] Excluding id {} from export: {}",
                        failure.id, failure.error
                    );
                    failures.push(failure);
                }
            }
        }

        info!(
            "[EXPORT] Fetch complete: {} rows, {} failures",
            rows.len(),
            failures.len()
        );

        Ok(ExportBatch { rows, failures })
    }

    /// Fetches and merges a single record, for one-record exports.
    pub async fn fetch_one(&self, id: u64, include_audit: bool) -> Result<MergedRow, AppError> {
        self.fetch_row(id, include_audit)
            .await
            .map_err(|failure| failure.error)
    }

    /// One fan-out branch: fetch the term and, when requested, its audit.
    ///
    /// The two calls for one id run concurrently. A failed or absent audit
    /// degrades the row to empty audit cells; a failed term fetch fails the
    /// branch.
    async fn fetch_row(&self, id: u64, include_audit: bool) -> Result<MergedRow, FetchFailure> {
        if include_audit {
            let (term, audit) = tokio::join!(self.terms.fetch_one(id), self.audits.fetch(id));
            let term = term.map_err(|error| FetchFailure { id, error })?;
            let audit = audit.unwrap_or(None);
            Ok(merge(&term, audit.as_ref()))
        } else {
            let term = self
                .terms
                .fetch_one(id)
                .await
                .map_err(|error| FetchFailure { id, error })?;
            Ok(flatten(&term))
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
