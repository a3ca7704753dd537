//! Survey export writers.
//!
//! This crate produces the files a survey export hands out:
//!
//! - **XLSX workbook**: response table plus codebook, built fully in memory
//! - **Legacy CSV**: one quoted column per question
//! - **JSON export**: survey metadata with the stored responses
//! - **Summary report**: per-question statistics as JSON

pub mod error;
mod export;
mod filename;
mod json;
mod legacy_csv;
mod workbook;

pub use error::{ExportError, Result};
pub use export::{
    ExportArtifact, export_from_store, export_survey, survey_sheet, write_artifact,
};
pub use filename::{export_filename, sanitize_title};
pub use json::{write_json_export, write_summary_report};
pub use legacy_csv::write_legacy_csv;
pub use workbook::write_workbook;
