//! Flattening of term and audit records into rectangular export rows.
//!
//! The column set is fixed and explicitly enumerated; a batch of merged rows
//! always forms a rectangular table. Missing values render as empty cells,
//! never as absent columns.

use crate::store::{AuditRecord, Term};

// ─────────────────────────────────────────────────────────────────────────────
// Column Sets
// ─────────────────────────────────────────────────────────────────────────────

/// Export columns derived from the term record, in canonical order.
pub const RECORD_COLUMNS: [&str; 20] = [
    "id",
    "name",
    "prompt",
    "response",
    "faqQ1",
    "faqA1",
    "faqQ2",
    "faqA2",
    "faqQ3",
    "faqA3",
    "faqQ4",
    "faqA4",
    "faqQ5",
    "faqA5",
    "highKeywords",
    "mediumKeywords",
    "lowKeywords",
    "faqHighKeywords",
    "faqMediumKeywords",
    "faqLowKeywords",
];

/// Columns appended when the export includes audit data.
pub const AUDIT_COLUMNS: [&str; 2] = ["auditData", "auditNotes"];

/// Returns the header row for an export, with or without audit columns.
pub fn header(include_audit: bool) -> Vec<&'static str> {
    let mut columns: Vec<&'static str> = RECORD_COLUMNS.to_vec();
    if include_audit {
        columns.extend_from_slice(&AUDIT_COLUMNS);
    }
    columns
}

// ─────────────────────────────────────────────────────────────────────────────
// MergedRow
// ─────────────────────────────────────────────────────────────────────────────

/// One flattened export row, positionally aligned with [`header`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRow {
    fields: Vec<String>,
    includes_audit: bool,
}

impl MergedRow {
    /// The row's cells, in header order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Whether this row carries the two audit columns.
    pub fn includes_audit(&self) -> bool {
        self.includes_audit
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Merging
// ─────────────────────────────────────────────────────────────────────────────

fn cell(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn record_fields(term: &Term) -> Vec<String> {
    vec![
        term.id.to_string(),
        term.name.clone(),
        cell(&term.prompt),
        cell(&term.response),
        cell(&term.faq_q1),
        cell(&term.faq_a1),
        cell(&term.faq_q2),
        cell(&term.faq_a2),
        cell(&term.faq_q3),
        cell(&term.faq_a3),
        cell(&term.faq_q4),
        cell(&term.faq_a4),
        cell(&term.faq_q5),
        cell(&term.faq_a5),
        cell(&term.high_keywords),
        cell(&term.medium_keywords),
        cell(&term.low_keywords),
        cell(&term.faq_high_keywords),
        cell(&term.faq_medium_keywords),
        cell(&term.faq_low_keywords),
    ]
}

/// Flattens a term without audit columns.
pub fn flatten(term: &Term) -> MergedRow {
    MergedRow {
        fields: record_fields(term),
        includes_audit: false,
    }
}

/// Merges a term with its audit record (or its absence) into one flat row.
///
/// Pure and idempotent. The audit flag map is re-encoded as a single JSON
/// blob in the `auditData` cell; an absent audit leaves both audit cells as
/// explicit empty strings, preserving rectangularity.
pub fn merge(term: &Term, audit: Option<&AuditRecord>) -> MergedRow {
    let mut fields = record_fields(term);
    match audit {
        Some(audit) => {
            // BTreeMap keys serialize in a stable order
            let blob = serde_json::to_string(&audit.flags).unwrap_or_default();
            fields.push(blob);
            fields.push(audit.notes.clone().unwrap_or_default());
        }
        None => {
            fields.push(String::new());
            fields.push(String::new());
        }
    }
    MergedRow {
        fields,
        includes_audit: true,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
