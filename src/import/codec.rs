//! Decoding of uploaded delimited text into positional import rows.
//!
//! The import format is headerless: row 0 is data. Column order is fixed as
//! `name, type, keywords, priority, custom_prompt`. Missing trailing columns
//! become empty strings and extra columns are ignored, so ragged files never
//! fail to decode.

use csv::ReaderBuilder;

use crate::error::AppError;

/// Number of columns the import format defines.
pub const IMPORT_COLUMNS: usize = 5;

/// One decoded import row, positionally mapped from the fixed column order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportRow {
    pub name: String,
    /// Term category; empty here means the importer will default it.
    pub category: String,
    pub keywords: String,
    pub priority: String,
    pub custom_prompt: String,
}

/// Decodes delimited text into import rows, preserving file order.
///
/// Blank lines are skipped. Quoted fields may contain embedded commas,
/// quotes, and newlines.
///
/// # Errors
///
/// Returns `AppError::CsvInvalid` for structurally malformed input.
pub fn decode(text: &str) -> Result<Vec<ImportRow>, AppError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| AppError::CsvInvalid(e.to_string()))?;

        let field = |i: usize| record.get(i).unwrap_or("").to_string();
        rows.push(ImportRow {
            name: field(0),
            category: field(1),
            keywords: field(2),
            priority: field(3),
            custom_prompt: field(4),
        });
    }

    Ok(rows)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
