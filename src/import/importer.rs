//! Sequential bulk import with a streaming per-item outcome log.
//!
//! Two entry points: decoded CSV rows (one term creation per row) and a
//! numeric id range (one legislation generation call per id). Both walk
//! their batch strictly in order, isolate each item's outcome, and never
//! stop early on a single item's failure — a partially-successful bulk load
//! is the expected result, not an error.
//!
//! Each call is fully awaited before the next is issued. The range path in
//! particular triggers expensive downstream generation per call, and the
//! outcome log must read in request order, so this path must never be
//! "optimized" into concurrent fan-out.

use tracing::{info, warn};

use crate::error::AppError;
use crate::import::codec::ImportRow;
use crate::store::{LegislationClient, NewTerm, TermsClient};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Category assigned to imported rows whose type column is empty.
pub const DEFAULT_CATEGORY: &str = "other";

// ─────────────────────────────────────────────────────────────────────────────
// BatchOutcome
// ─────────────────────────────────────────────────────────────────────────────

/// Outcome of one processed batch item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    Success,
    Failure,
}

/// One line of the batch log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchEntry {
    /// The item this entry belongs to: a record name for row imports, a
    /// numeric id for range imports.
    pub label: String,
    pub status: BatchStatus,
    /// Human-readable outcome, including the remote error message on failure.
    pub message: String,
}

/// Ordered, append-only log of per-item results from a bulk operation.
///
/// Entries are chronological and never reordered or deduplicated.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    entries: Vec<BatchEntry>,
}

impl BatchOutcome {
    /// The log lines, in processing order.
    pub fn entries(&self) -> &[BatchEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of successful items.
    pub fn successes(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status == BatchStatus::Success)
            .count()
    }

    /// Number of failed items.
    pub fn failures(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status == BatchStatus::Failure)
            .count()
    }

    fn append<F>(&mut self, entry: BatchEntry, on_entry: &mut Option<F>)
    where
        F: FnMut(&BatchEntry),
    {
        self.entries.push(entry);
        if let Some(callback) = on_entry {
            callback(self.entries.last().expect("entry just pushed"));
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// BulkImporter
// ─────────────────────────────────────────────────────────────────────────────

/// Walks a user-supplied batch and performs one create/generate call per
/// item, appending one outcome entry per item.
///
/// The optional `on_entry` callback fires after every appended entry so
/// callers can re-render the log incrementally while the batch runs.
pub struct BulkImporter<'a> {
    terms: &'a TermsClient,
    legislation: &'a LegislationClient,
}

impl<'a> BulkImporter<'a> {
    /// Creates an importer over the given clients.
    pub fn new(terms: &'a TermsClient, legislation: &'a LegislationClient) -> Self {
        Self { terms, legislation }
    }

    /// Imports decoded CSV rows, strictly in file order.
    ///
    /// An empty type column defaults to [`DEFAULT_CATEGORY`]. Every row
    /// produces exactly one entry; failures never abort the batch.
    pub async fn import_rows<F>(&self, rows: &[ImportRow], mut on_entry: Option<F>) -> BatchOutcome
    where
        F: FnMut(&BatchEntry),
    {
        info!("[IMPORT] Importing {} rows", rows.len());
        let mut outcome = BatchOutcome::default();

        for row in rows {
            let category = if row.category.is_empty() {
                DEFAULT_CATEGORY.to_string()
            } else {
                row.category.clone()
            };

            let payload = NewTerm {
                name: row.name.clone(),
                category,
                additional_keywords: row.keywords.clone(),
                priority: row.priority.clone(),
                custom_prompt: row.custom_prompt.clone(),
            };

            let entry = match self.terms.create(&payload).await {
                Ok(created) => BatchEntry {
                    label: row.name.clone(),
                    status: BatchStatus::Success,
                    message: format!("Added term \"{}\" with id {}", row.name, created.id),
                },
                Err(error) => {
                    warn!("[IMPORT] Row \"{}\" failed: {}", row.name, error);
                    BatchEntry {
                        label: row.name.clone(),
                        status: BatchStatus::Failure,
                        message: format!("Failed to add term \"{}\": {}", row.name, error),
                    }
                }
            };
            outcome.append(entry, &mut on_entry);
        }

        info!(
            "[IMPORT] Row import complete: {} ok, {} failed",
            outcome.successes(),
            outcome.failures()
        );
        outcome
    }

    /// Generates and saves every legislative id in `[start, end]`, ascending.
    ///
    /// Calls are strictly sequential; the log is ordered by id, never by
    /// completion time.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidRange` when `start > end`, before any
    /// network call is issued. Per-id failures do not error; they become
    /// failure entries.
    pub async fn import_range<F>(
        &self,
        congress_id: i64,
        start: u64,
        end: u64,
        mut on_entry: Option<F>,
    ) -> Result<BatchOutcome, AppError>
    where
        F: FnMut(&BatchEntry),
    {
        if start > end {
            return Err(AppError::InvalidRange { start, end });
        }

        info!(
            "[IMPORT] Generating legislation {}..={} for congress {}",
            start, end, congress_id
        );
        let mut outcome = BatchOutcome::default();

        for id in start..=end {
            let entry = match self.legislation.generate_and_save(congress_id, id).await {
                Ok(()) => BatchEntry {
                    label: id.to_string(),
                    status: BatchStatus::Success,
                    message: format!("Generated legislation {}", id),
                },
                Err(error) => {
                    warn!("[IMPORT] Legislation {} failed: {}", id, error);
                    BatchEntry {
                        label: id.to_string(),
                        status: BatchStatus::Failure,
                        message: format!("Failed to generate legislation {}: {}", id, error),
                    }
                }
            };
            outcome.append(entry, &mut on_entry);
        }

        info!(
            "[IMPORT] Range import complete: {} ok, {} failed",
            outcome.successes(),
            outcome.failures()
        );
        Ok(outcome)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{StoreClient, StoreConfig};
    use url::Url;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn clients(base: &str) -> (TermsClient, LegislationClient) {
        let config = StoreConfig::new(Url::parse(base).unwrap());
        let store = StoreClient::new(config).unwrap();
        (
            TermsClient::new(store.clone()),
            LegislationClient::new(store),
        )
    }

    fn row(name: &str, category: &str) -> ImportRow {
        ImportRow {
            name: name.into(),
            category: category.into(),
            keywords: String::new(),
            priority: "high".into(),
            custom_prompt: String::new(),
        }
    }

    #[tokio::test]
    async fn middle_row_failure_keeps_batch_order_and_count() {
        let server = MockServer::start().await;
        let (terms, legislation) = clients(&server.uri());

        Mock::given(method("POST"))
            .and(path("/api/terms/new"))
            .and(body_partial_json(serde_json::json!({"name": "Alpha"})))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({"id": 1, "message": "created"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/terms/new"))
            .and(body_partial_json(serde_json::json!({"name": "Beta"})))
            .respond_with(ResponseTemplate::new(400).set_body_json(
                serde_json::json!({"message": "Name, type, and priority are required"}),
            ))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/terms/new"))
            .and(body_partial_json(serde_json::json!({"name": "Gamma"})))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({"id": 3, "message": "created"})),
            )
            .mount(&server)
            .await;

        let importer = BulkImporter::new(&terms, &legislation);
        let rows = vec![row("Alpha", "a"), row("Beta", "b"), row("Gamma", "c")];
        let outcome = importer
            .import_rows(&rows, None::<fn(&BatchEntry)>)
            .await;

        assert_eq!(outcome.len(), 3);
        assert_eq!(outcome.entries()[0].status, BatchStatus::Success);
        assert_eq!(outcome.entries()[1].status, BatchStatus::Failure);
        assert_eq!(outcome.entries()[2].status, BatchStatus::Success);
        assert!(outcome.entries()[1].message.contains("required"));
        assert!(outcome.entries()[0].message.contains("id 1"));
    }

    #[tokio::test]
    async fn empty_category_defaults_to_other() {
        let server = MockServer::start().await;
        let (terms, legislation) = clients(&server.uri());

        Mock::given(method("POST"))
            .and(path("/api/terms/new"))
            .and(body_partial_json(serde_json::json!({"type": "other"})))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({"id": 9, "message": "created"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let importer = BulkImporter::new(&terms, &legislation);
        let outcome = importer
            .import_rows(&[row("Untyped", "")], None::<fn(&BatchEntry)>)
            .await;

        assert_eq!(outcome.successes(), 1);
    }

    #[tokio::test]
    async fn on_entry_fires_after_every_item() {
        let server = MockServer::start().await;
        let (terms, legislation) = clients(&server.uri());

        Mock::given(method("POST"))
            .and(path("/api/terms/new"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({"id": 1, "message": "created"})),
            )
            .mount(&server)
            .await;

        let importer = BulkImporter::new(&terms, &legislation);
        let rows = vec![row("Alpha", "a"), row("Beta", "b")];

        let mut seen: Vec<String> = Vec::new();
        let outcome = importer
            .import_rows(&rows, Some(|entry: &BatchEntry| seen.push(entry.label.clone())))
            .await;

        // Streaming contract: one callback per item, in order
        assert_eq!(seen, vec!["Alpha", "Beta"]);
        assert_eq!(outcome.len(), 2);
    }

    #[tokio::test]
    async fn range_import_logs_in_ascending_id_order() {
        let server = MockServer::start().await;
        let (terms, legislation) = clients(&server.uri());

        for id in [5u64, 7] {
            Mock::given(method("POST"))
                .and(path(format!(
                    "/api/legislation/generate-and-save-legislation/118/{}",
                    id
                )))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(serde_json::json!({"message": "Saved"})),
                )
                .expect(1)
                .mount(&server)
                .await;
        }
        Mock::given(method("POST"))
            .and(path("/api/legislation/generate-and-save-legislation/118/6"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"error": "generation backend down"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let importer = BulkImporter::new(&terms, &legislation);
        let outcome = importer
            .import_range(118, 5, 7, None::<fn(&BatchEntry)>)
            .await
            .unwrap();

        assert_eq!(outcome.len(), 3);
        let labels: Vec<&str> = outcome.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["5", "6", "7"]);
        assert_eq!(outcome.entries()[0].status, BatchStatus::Success);
        assert_eq!(outcome.entries()[1].status, BatchStatus::Failure);
        assert_eq!(outcome.entries()[2].status, BatchStatus::Success);
        assert!(outcome.entries()[1].message.contains("generation backend down"));
    }

    #[tokio::test]
    async fn inverted_range_fails_before_any_call() {
        let server = MockServer::start().await;
        let (terms, legislation) = clients(&server.uri());

        // Zero expected requests: the precondition must halt up front
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let importer = BulkImporter::new(&terms, &legislation);
        let result = importer
            .import_range(118, 9, 3, None::<fn(&BatchEntry)>)
            .await;

        assert!(matches!(
            result,
            Err(AppError::InvalidRange { start: 9, end: 3 })
        ));
    }

    #[tokio::test]
    async fn single_id_range_is_one_entry() {
        let server = MockServer::start().await;
        let (terms, legislation) = clients(&server.uri());

        Mock::given(method("POST"))
            .and(path("/api/legislation/generate-and-save-legislation/118/4"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": "Saved"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let importer = BulkImporter::new(&terms, &legislation);
        let outcome = importer
            .import_range(118, 4, 4, None::<fn(&BatchEntry)>)
            .await
            .unwrap();

        assert_eq!(outcome.len(), 1);
        assert_eq!(outcome.successes(), 1);
    }

    #[tokio::test]
    async fn empty_row_batch_is_empty_outcome() {
        let server = MockServer::start().await;
        let (terms, legislation) = clients(&server.uri());

        let importer = BulkImporter::new(&terms, &legislation);
        let outcome = importer.import_rows(&[], None::<fn(&BatchEntry)>).await;

        assert!(outcome.is_empty());
    }
}
