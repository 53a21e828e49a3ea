//! Typed client for the store's term resource.
//!
//! Terms are the primary record kind: a named entry with generated summary
//! text, up to five FAQ question/answer pairs, and keyword tag lists by
//! priority tier. Creation is generative — the store synthesizes the summary
//! and FAQ server-side from the submitted fields, so `create` only carries
//! the seed fields.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;
use crate::store::client::StoreClient;

// ─────────────────────────────────────────────────────────────────────────────
// Wire Types (match the store JSON exactly)
// ─────────────────────────────────────────────────────────────────────────────

/// A term record as returned by the store.
///
/// Every field except `id` and `name` is optional; absent fields deserialize
/// to `None` so older records with sparse data still parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Term {
    /// Store-assigned identifier, immutable once created.
    pub id: u64,
    /// Display name, unique within the store.
    pub name: String,
    #[serde(default)]
    pub faq_title: Option<String>,
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub faq_q1: Option<String>,
    #[serde(default)]
    pub faq_a1: Option<String>,
    #[serde(default)]
    pub faq_q2: Option<String>,
    #[serde(default)]
    pub faq_a2: Option<String>,
    #[serde(default)]
    pub faq_q3: Option<String>,
    #[serde(default)]
    pub faq_a3: Option<String>,
    #[serde(default)]
    pub faq_q4: Option<String>,
    #[serde(default)]
    pub faq_a4: Option<String>,
    #[serde(default)]
    pub faq_q5: Option<String>,
    #[serde(default)]
    pub faq_a5: Option<String>,
    #[serde(default)]
    pub high_keywords: Option<String>,
    #[serde(default)]
    pub medium_keywords: Option<String>,
    #[serde(default)]
    pub low_keywords: Option<String>,
    #[serde(default)]
    pub faq_high_keywords: Option<String>,
    #[serde(default)]
    pub faq_medium_keywords: Option<String>,
    #[serde(default)]
    pub faq_low_keywords: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Payload for creating a new term.
///
/// The store generates the summary and FAQ content from these seed fields,
/// so only the seed travels on the wire (snake_case, matching the create
/// endpoint's contract rather than the record shape).
#[derive(Debug, Clone, Serialize)]
pub struct NewTerm {
    pub name: String,
    /// Term category; the bulk importer defaults this to "other" when the
    /// source column is empty.
    #[serde(rename = "type")]
    pub category: String,
    pub additional_keywords: String,
    pub priority: String,
    pub custom_prompt: String,
}

/// Response to a successful term creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedTerm {
    pub id: u64,
    pub message: String,
}

/// Partial update for an existing term. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TermPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faq_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faq_q1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faq_a1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faq_q2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faq_a2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faq_q3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faq_a3: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faq_q4: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faq_a4: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faq_q5: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faq_a5: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium_keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faq_high_keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faq_medium_keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faq_low_keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// TermsClient
// ─────────────────────────────────────────────────────────────────────────────

/// Client for term CRUD against the content store.
#[derive(Clone)]
pub struct TermsClient {
    client: StoreClient,
}

impl TermsClient {
    /// Creates a new terms client wrapping the given store client.
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    /// Fetches every term, in the store's natural order.
    ///
    /// The order is treated as stable for the duration of one export.
    pub async fn fetch_all(&self) -> Result<Vec<Term>, AppError> {
        let terms: Vec<Term> = self
            .client
            .request_json(Method::GET, "/api/terms", None)
            .await?;
        info!("[STORE] Fetched {} terms", terms.len());
        Ok(terms)
    }

    /// Fetches every term id, in the store's natural order.
    pub async fn fetch_all_ids(&self) -> Result<Vec<u64>, AppError> {
        let terms = self.fetch_all().await?;
        Ok(terms.into_iter().map(|t| t.id).collect())
    }

    /// Fetches the names of every term, for the keyword suggestion vocabulary.
    pub async fn keyword_names(&self) -> Result<Vec<String>, AppError> {
        let terms = self.fetch_all().await?;
        Ok(terms.into_iter().map(|t| t.name).collect())
    }

    /// Fetches a single term by id.
    ///
    /// # Errors
    ///
    /// - `AppError::NotFound` - no term with that id
    /// - `AppError::ConnectionFailed` - network error
    pub async fn fetch_one(&self, id: u64) -> Result<Term, AppError> {
        self.client
            .request_json(Method::GET, &format!("/api/terms/{}", id), None)
            .await
    }

    /// Creates a new term. The store generates summary and FAQ text.
    ///
    /// # Errors
    ///
    /// - `AppError::Validation` - required field missing
    /// - `AppError::Conflict` - a term with this name already exists
    pub async fn create(&self, term: &NewTerm) -> Result<CreatedTerm, AppError> {
        let body = serde_json::to_value(term)
            .map_err(|e| AppError::Internal(format!("Failed to serialize term: {}", e)))?;
        self.client
            .request_json(Method::POST, "/api/terms/new", Some(body))
            .await
    }

    /// Applies a partial update to an existing term.
    pub async fn update(&self, id: u64, patch: &TermPatch) -> Result<(), AppError> {
        let body = serde_json::to_value(patch)
            .map_err(|e| AppError::Internal(format!("Failed to serialize patch: {}", e)))?;
        self.client
            .expect_success(Method::PUT, &format!("/api/terms/{}", id), Some(body))
            .await?;
        Ok(())
    }

    /// Deletes a single term by id.
    ///
    /// # Errors
    ///
    /// - `AppError::NotFound` - no term with that id
    pub async fn delete(&self, id: u64) -> Result<(), AppError> {
        self.client
            .expect_success(Method::DELETE, &format!("/api/terms/{}", id), None)
            .await?;
        Ok(())
    }

    /// Deletes every term in the store.
    pub async fn delete_all(&self) -> Result<(), AppError> {
        self.client
            .expect_success(Method::DELETE, "/api/terms/delete_all", None)
            .await?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
