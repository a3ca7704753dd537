//! Error types for survey store ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a survey store.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Store file not found.
    #[error("survey store not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read the store file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Store content is not valid JSON or does not hold survey documents.
    #[error("failed to parse survey store {path}: {source}")]
    StoreParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Two documents share the same survey id.
    #[error("duplicate survey id '{id}' in {path}")]
    DuplicateSurvey { id: String, path: PathBuf },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
