use serde::Serialize;
use thiserror::Error;

/// User-friendly error presentation for the frontend.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorPresentation {
    pub title: String,
    pub message: String,
    pub action: Option<String>,
}

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    // ── Store API ─────────────────────────────────────────────────────────────
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Duplicate record: {0}")]
    Conflict(String),

    #[error("Store error: {0}")]
    StoreError(String),

    // ── Network ───────────────────────────────────────────────────────────────
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    // ── Bulk Operations ───────────────────────────────────────────────────────
    #[error("Export source returned no record ids")]
    EmptyExport,

    #[error("Invalid id range: start {start} is greater than end {end}")]
    InvalidRange { start: u64, end: u64 },

    // ── File / CSV ────────────────────────────────────────────────────────────
    #[error("Invalid CSV: {0}")]
    CsvInvalid(String),

    #[error("CSV write error: {0}")]
    CsvWrite(String),

    // ── Generic fallback ──────────────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Converts the error into a user-friendly presentation suitable for UI display.
    pub fn to_presentation(&self) -> ErrorPresentation {
        match self {
            // ── Store API ─────────────────────────────────────────────────────
            AppError::NotFound(what) => ErrorPresentation {
                title: "Not Found".into(),
                message: format!("{} does not exist in the store.", what),
                action: Some("Check the record id and try again".into()),
            },

            AppError::Validation(msg) => ErrorPresentation {
                title: "Invalid Input".into(),
                message: format!("The store rejected the request: {}", msg),
                action: Some("Fill in the required fields and retry".into()),
            },

            AppError::Conflict(msg) => ErrorPresentation {
                title: "Duplicate Record".into(),
                message: format!("The store reported a conflict: {}", msg),
                action: Some("Use a different name or edit the existing record".into()),
            },

            AppError::StoreError(msg) => ErrorPresentation {
                title: "Store Error".into(),
                message: msg.clone(),
                action: None,
            },

            // ── Network ───────────────────────────────────────────────────────
            AppError::ConnectionFailed(_) => ErrorPresentation {
                title: "Connection Failed".into(),
                message: "Could not reach the content store. Please check your connection.".into(),
                action: Some("Check network and retry".into()),
            },

            // ── Bulk Operations ───────────────────────────────────────────────
            AppError::EmptyExport => ErrorPresentation {
                title: "Nothing to Export".into(),
                message: "The store returned no record ids, so no export file was produced."
                    .into(),
                action: Some("Verify the store URL and that records exist".into()),
            },

            AppError::InvalidRange { start, end } => ErrorPresentation {
                title: "Invalid Range".into(),
                message: format!(
                    "The start id {} is greater than the end id {}. No requests were issued.",
                    start, end
                ),
                action: Some("Swap the bounds and retry".into()),
            },

            // ── File / CSV ────────────────────────────────────────────────────
            AppError::CsvInvalid(msg) => ErrorPresentation {
                title: "Invalid CSV".into(),
                message: format!("The CSV file has a formatting problem: {}", msg),
                action: Some("Fix the CSV file and try again".into()),
            },

            AppError::CsvWrite(msg) => ErrorPresentation {
                title: "Export Failed".into(),
                message: format!("Error while writing the export file: {}", msg),
                action: Some("Check disk space and permissions".into()),
            },

            // ── Generic ───────────────────────────────────────────────────────
            AppError::Internal(_) => ErrorPresentation {
                title: "Unexpected Error".into(),
                message: "Something went wrong. Please try again.".into(),
                action: Some("Try again".into()),
            },
        }
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_presentation().serialize(serializer)
    }
}
