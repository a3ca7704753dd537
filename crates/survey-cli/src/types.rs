use std::path::PathBuf;

use chrono::{DateTime, Utc};
use survey_model::{ExportKind, Sheet};

/// One `export` invocation, resolved from command-line flags.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub store: PathBuf,
    pub survey_id: String,
    pub kind: ExportKind,
    pub output_dir: PathBuf,
    pub export_date: DateTime<Utc>,
}

/// What an export wrote.
#[derive(Debug)]
pub struct ExportOutcome {
    pub survey_id: String,
    pub survey_title: String,
    pub kind: ExportKind,
    pub path: PathBuf,
    pub bytes: usize,
    pub responses: usize,
    /// The response table, for workbook exports.
    pub sheet: Option<Sheet>,
}
