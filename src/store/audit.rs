//! Typed client for per-term audit records.
//!
//! An audit record tracks review completion per section ("FAQ", "Summary",
//! "Technical_Stuff") plus free-text notes, keyed 1:1 by term id. A term
//! with no audit yet is a valid, distinct state from an audit with every
//! flag false; the store creates the record lazily on first submission.

use std::collections::BTreeMap;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::store::client::StoreClient;

// ─────────────────────────────────────────────────────────────────────────────
// Wire Types
// ─────────────────────────────────────────────────────────────────────────────

/// An audit record as returned by `GET /api/audit/{id}`.
///
/// `flags` is kept as an ordered map so re-encoding it (for CSV export) is
/// deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Same id as the term this audit belongs to.
    pub id: u64,
    /// Section name to completion flag.
    #[serde(rename = "auditData")]
    pub flags: BTreeMap<String, bool>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Payload for creating or updating an audit record.
#[derive(Debug, Clone, Serialize)]
pub struct AuditUpdate {
    #[serde(rename = "auditData")]
    pub flags: BTreeMap<String, bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Write responses wrap a flat audit object rather than the GET shape.
#[derive(Debug, Deserialize)]
struct WireAuditEnvelope {
    audit: WireAuditFlat,
}

#[derive(Debug, Deserialize)]
struct WireAuditFlat {
    id: u64,
    #[serde(rename = "FAQ")]
    faq: bool,
    #[serde(rename = "Summary")]
    summary: bool,
    #[serde(rename = "Technical_Stuff")]
    technical_stuff: bool,
    #[serde(default)]
    notes: Option<String>,
}

impl From<WireAuditFlat> for AuditRecord {
    fn from(wire: WireAuditFlat) -> Self {
        let mut flags = BTreeMap::new();
        flags.insert("FAQ".to_string(), wire.faq);
        flags.insert("Summary".to_string(), wire.summary);
        flags.insert("Technical_Stuff".to_string(), wire.technical_stuff);
        AuditRecord {
            id: wire.id,
            flags,
            notes: wire.notes,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// AuditClient
// ─────────────────────────────────────────────────────────────────────────────

/// Client for audit CRUD against the content store.
#[derive(Clone)]
pub struct AuditClient {
    client: StoreClient,
}

impl AuditClient {
    /// Creates a new audit client wrapping the given store client.
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    /// Fetches the audit record for a term, if one exists.
    ///
    /// An absent audit is `Ok(None)`, not an error: "no audit yet" is a
    /// normal state for a record that has never been reviewed. All other
    /// failures propagate.
    pub async fn fetch(&self, id: u64) -> Result<Option<AuditRecord>, AppError> {
        let result: Result<AuditRecord, AppError> = self
            .client
            .request_json(Method::GET, &format!("/api/audit/{}", id), None)
            .await;
        match result {
            Ok(audit) => Ok(Some(audit)),
            Err(AppError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Creates or updates the audit record for a term.
    ///
    /// The store creates the record lazily if it does not exist yet.
    pub async fn upsert(&self, id: u64, update: &AuditUpdate) -> Result<AuditRecord, AppError> {
        let body = serde_json::to_value(update)
            .map_err(|e| AppError::Internal(format!("Failed to serialize audit: {}", e)))?;
        let envelope: WireAuditEnvelope = self
            .client
            .request_json(Method::PUT, &format!("/api/audit/{}", id), Some(body))
            .await?;
        Ok(envelope.audit.into())
    }

    /// Creates an audit record for a term via the collection endpoint.
    ///
    /// # Errors
    ///
    /// - `AppError::NotFound` - the referenced term does not exist
    pub async fn create(&self, id: u64, update: &AuditUpdate) -> Result<AuditRecord, AppError> {
        let mut body = serde_json::to_value(update)
            .map_err(|e| AppError::Internal(format!("Failed to serialize audit: {}", e)))?;
        body.as_object_mut()
            .ok_or_else(|| AppError::Internal("Expected object in JSON".to_string()))?
            .insert("id".to_string(), serde_json::json!(id));
        let envelope: WireAuditEnvelope = self
            .client
            .request_json(Method::POST, "/api/audit", Some(body))
            .await?;
        Ok(envelope.audit.into())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
