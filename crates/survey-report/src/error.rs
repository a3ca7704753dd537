//! Error types for survey exports.

use std::path::PathBuf;

use rust_xlsxwriter::XlsxError;
use thiserror::Error;

/// Errors that can occur while producing or writing an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// No survey with the requested id exists.
    #[error("Survey not found: {id}")]
    SurveyNotFound { id: String },

    /// The survey exists but has no stored responses.
    #[error("No responses to export for survey {id}")]
    NoResponses { id: String },

    /// The sheet does not fit a worksheet.
    #[error("{what} {count} exceeds the worksheet limit")]
    SheetTooLarge { what: &'static str, count: usize },

    /// Workbook assembly failed.
    #[error("failed to build workbook: {0}")]
    Workbook(#[from] XlsxError),

    /// CSV encoding failed.
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding failed.
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the artifact to disk failed.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
