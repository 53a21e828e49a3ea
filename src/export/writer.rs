//! CSV serialization and atomic on-disk persistence of export batches.
//!
//! Uses the `csv` crate for quoting (fields containing the delimiter, quote
//! character, or newline are quoted, embedded quotes doubled). Exports are
//! persisted through a temp-file-then-rename so a failed export never leaves
//! a truncated file at the destination.

use std::io::BufWriter;
use std::path::{Path, PathBuf};

use csv::Writer;
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::AppError;
use crate::export::merge::{header, MergedRow};

// ─────────────────────────────────────────────────────────────────────────────
// File Naming
// ─────────────────────────────────────────────────────────────────────────────

/// File name for a whole-catalogue export.
pub fn batch_file_name(include_audit: bool) -> &'static str {
    if include_audit {
        "all_terms_with_audit.csv"
    } else {
        "all_terms.csv"
    }
}

/// File name for a single-record export, named after the record.
pub fn term_file_name(name: &str, include_audit: bool) -> String {
    if include_audit {
        format!("{}_with_audit.csv", name)
    } else {
        format!("{}.csv", name)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Encoding
// ─────────────────────────────────────────────────────────────────────────────

/// Serializes rows to delimited text: header first, then one line per row in
/// input order.
///
/// # Errors
///
/// Returns `AppError::CsvWrite` if a row's width does not match the header
/// (a rectangularity violation) or serialization fails.
pub fn encode(rows: &[MergedRow], include_audit: bool) -> Result<String, AppError> {
    let columns = header(include_audit);

    let mut writer = Writer::from_writer(Vec::new());
    writer
        .write_record(&columns)
        .map_err(|e| AppError::CsvWrite(format!("Failed to write header: {}", e)))?;

    for (index, row) in rows.iter().enumerate() {
        if row.fields().len() != columns.len() {
            return Err(AppError::CsvWrite(format!(
                "Row {} has {} fields, header has {}",
                index,
                row.fields().len(),
                columns.len()
            )));
        }
        writer
            .write_record(row.fields())
            .map_err(|e| AppError::CsvWrite(format!("Failed to write row {}: {}", index, e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::CsvWrite(format!("Failed to flush CSV writer: {}", e.error())))?;
    String::from_utf8(bytes).map_err(|e| AppError::CsvWrite(format!("Invalid UTF-8: {}", e)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Atomic Persistence
// ─────────────────────────────────────────────────────────────────────────────

/// Writes an export batch to `final_path` atomically.
///
/// The rows are streamed into a temporary file in the destination directory,
/// then renamed over the final path. On any failure the temporary file is
/// cleaned up and the destination is untouched.
///
/// # Returns
///
/// The final path on success.
pub fn write_export(
    final_path: impl AsRef<Path>,
    rows: &[MergedRow],
    include_audit: bool,
) -> Result<PathBuf, AppError> {
    let final_path = final_path.as_ref().to_path_buf();

    let parent_dir = final_path.parent().ok_or_else(|| {
        AppError::CsvWrite(format!(
            "Cannot determine parent directory for: {}",
            final_path.display()
        ))
    })?;

    // Same directory as the destination, so the rename stays on one filesystem
    let temp_file = NamedTempFile::new_in(parent_dir)
        .map_err(|e| AppError::CsvWrite(format!("Failed to create temporary file: {}", e)))?;

    let mut writer = Writer::from_writer(BufWriter::new(temp_file));
    let columns = header(include_audit);

    writer
        .write_record(&columns)
        .map_err(|e| AppError::CsvWrite(format!("Failed to write header: {}", e)))?;

    for (index, row) in rows.iter().enumerate() {
        if row.fields().len() != columns.len() {
            return Err(AppError::CsvWrite(format!(
                "Row {} has {} fields, header has {}",
                index,
                row.fields().len(),
                columns.len()
            )));
        }
        writer
            .write_record(row.fields())
            .map_err(|e| AppError::CsvWrite(format!("Failed to write row {}: {}", index, e)))?;
    }

    let buf_writer = writer
        .into_inner()
        .map_err(|e| AppError::CsvWrite(format!("Failed to flush CSV writer: {}", e.error())))?;
    let temp_file = buf_writer
        .into_inner()
        .map_err(|e| AppError::CsvWrite(format!("Failed to flush buffer: {}", e.error())))?;

    temp_file.persist(&final_path).map_err(|e| {
        AppError::CsvWrite(format!(
            "Failed to persist file to {}: {}",
            final_path.display(),
            e.error
        ))
    })?;

    info!(
        "[EXPORT] Wrote {} rows to {}",
        rows.len(),
        final_path.display()
    );

    Ok(final_path)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::merge::{flatten, merge};
    use crate::store::{AuditRecord, Term};
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::TempDir;

    fn term(id: u64, name: &str, response: &str) -> Term {
        Term {
            id,
            name: name.into(),
            faq_title: None,
            prompt: None,
            response: Some(response.into()),
            faq_q1: None,
            faq_a1: None,
            faq_q2: None,
            faq_a2: None,
            faq_q3: None,
            faq_a3: None,
            faq_q4: None,
            faq_a4: None,
            faq_q5: None,
            faq_a5: None,
            high_keywords: None,
            medium_keywords: None,
            low_keywords: None,
            faq_high_keywords: None,
            faq_medium_keywords: None,
            faq_low_keywords: None,
            notes: None,
        }
    }

    #[test]
    fn encode_produces_header_plus_one_line_per_row() {
        let rows = vec![
            flatten(&term(1, "Alpha", "first")),
            flatten(&term(2, "Beta", "second")),
            flatten(&term(3, "Gamma", "third")),
        ];

        let csv = encode(&rows, false).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), rows.len() + 1);
        assert!(lines[0].starts_with("id,name,prompt,response"));

        // Every data line has the same field count as the header
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let width = reader.headers().unwrap().len();
        for record in reader.records() {
            assert_eq!(record.unwrap().len(), width);
        }
    }

    #[test]
    fn encode_quotes_commas_quotes_and_newlines() {
        let tricky = term(1, "Name, with comma", "line one\nline \"two\"");
        let rows = vec![flatten(&tricky)];

        let csv_text = encode(&rows, false).unwrap();

        // Read it back and verify the values survive quoting
        let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(&record[1], "Name, with comma");
        assert_eq!(&record[3], "line one\nline \"two\"");
    }

    #[test]
    fn encode_with_audit_uses_wider_header() {
        let mut flags = BTreeMap::new();
        flags.insert("FAQ".to_string(), true);
        let audit = AuditRecord {
            id: 1,
            flags,
            notes: None,
        };
        let rows = vec![merge(&term(1, "Alpha", "first"), Some(&audit))];

        let csv = encode(&rows, true).unwrap();
        let header_line = csv.lines().next().unwrap();
        assert!(header_line.ends_with("auditData,auditNotes"));
    }

    #[test]
    fn encode_rejects_width_mismatch() {
        // A no-audit row against an audit header is a rectangularity violation
        let rows = vec![flatten(&term(1, "Alpha", "first"))];
        let result = encode(&rows, true);
        assert!(matches!(result, Err(AppError::CsvWrite(_))));
    }

    #[test]
    fn encode_empty_batch_is_header_only() {
        let csv = encode(&[], false).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn file_names_follow_audit_flag() {
        assert_eq!(batch_file_name(false), "all_terms.csv");
        assert_eq!(batch_file_name(true), "all_terms_with_audit.csv");
        assert_eq!(term_file_name("Filibuster", false), "Filibuster.csv");
        assert_eq!(
            term_file_name("Filibuster", true),
            "Filibuster_with_audit.csv"
        );
    }

    #[test]
    fn write_export_persists_atomically() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(batch_file_name(false));

        let rows = vec![flatten(&term(1, "Alpha", "first"))];
        let written = write_export(&path, &rows, false).unwrap();

        assert_eq!(written, path);
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("Alpha"));

        // No leftover temp files next to the export
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn failed_write_leaves_no_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.csv");

        // Width mismatch aborts mid-write
        let rows = vec![flatten(&term(1, "Alpha", "first"))];
        let result = write_export(&path, &rows, true);

        assert!(result.is_err());
        assert!(!path.exists(), "destination must not exist after a failure");
    }

    #[test]
    fn write_export_overwrites_previous_export() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(batch_file_name(false));

        fs::write(&path, "OLD_CONTENT").unwrap();

        let rows = vec![flatten(&term(2, "Beta", "second"))];
        write_export(&path, &rows, false).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.contains("OLD_CONTENT"));
        assert!(content.contains("Beta"));
    }
}
