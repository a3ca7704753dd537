//! Configuration options for survey exports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How response data is turned into path/value maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlattenStrategy {
    /// Walk the survey definition against each response, falling back to
    /// raw flattening for responses the definition cannot describe.
    #[default]
    Definition,
    /// Flatten stored response data directly.
    Raw,
}

/// The artifact an export request produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExportKind {
    /// Two-sheet workbook built with the definition-guided flattener.
    #[default]
    Workbook,
    /// Two-sheet workbook built from raw stored data.
    RawWorkbook,
    /// Legacy one-column-per-question CSV.
    LegacyCsv,
    /// Survey metadata plus the stored responses as JSON.
    Json,
    /// Per-question response statistics as JSON.
    SummaryReport,
}

impl ExportKind {
    /// Filename fragment between the sanitized title and the date.
    pub fn file_stem_suffix(self) -> &'static str {
        match self {
            Self::Workbook | Self::LegacyCsv | Self::Json => "responses",
            Self::RawWorkbook => "responses_raw",
            Self::SummaryReport => "summary_report",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Workbook | Self::RawWorkbook => "xlsx",
            Self::LegacyCsv => "csv",
            Self::Json | Self::SummaryReport => "json",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Workbook | Self::RawWorkbook => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            Self::LegacyCsv => "text/csv",
            Self::Json | Self::SummaryReport => "application/json",
        }
    }

    /// Flattening strategy for workbook exports.
    pub fn flatten_strategy(self) -> FlattenStrategy {
        match self {
            Self::RawWorkbook => FlattenStrategy::Raw,
            _ => FlattenStrategy::Definition,
        }
    }
}

/// Options controlling one export request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportOptions {
    pub kind: ExportKind,
    /// Timestamp used for filenames and `exportDate` fields.
    pub export_date: DateTime<Utc>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::new(ExportKind::default())
    }
}

impl ExportOptions {
    pub fn new(kind: ExportKind) -> Self {
        Self {
            kind,
            export_date: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_export_date(mut self, export_date: DateTime<Utc>) -> Self {
        self.export_date = export_date;
        self
    }
}
