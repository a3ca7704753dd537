//! Export orchestration.
//!
//! Looks the survey up, checks there is something to export, runs the
//! requested writer and hands back the complete artifact. Bytes only reach
//! disk through [`write_artifact`], after the artifact was fully built.

use std::path::{Path, PathBuf};

use tracing::{info, info_span};

use survey_ingest::{SurveyDocument, SurveyStore};
use survey_model::{ExportKind, ExportOptions, FlattenStrategy, Sheet};
use survey_transform::build_response_sheet;

use crate::error::{ExportError, Result};
use crate::filename::export_filename;
use crate::json::{write_json_export, write_summary_report};
use crate::legacy_csv::write_legacy_csv;
use crate::workbook::write_workbook;

/// A finished export, ready to be saved or sent.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub kind: ExportKind,
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
    /// The assembled table, for workbook exports.
    pub sheet: Option<Sheet>,
}

/// Assemble the response table of a survey with the given strategy.
pub fn survey_sheet(survey: &SurveyDocument, strategy: FlattenStrategy) -> Sheet {
    build_response_sheet(&survey.definition(), &survey.response_records(), strategy)
}

/// Export one survey document.
pub fn export_survey(survey: &SurveyDocument, options: &ExportOptions) -> Result<ExportArtifact> {
    let span = info_span!("export_survey", survey_id = %survey.id, kind = ?options.kind);
    let _guard = span.enter();

    if survey.responses.is_empty() {
        return Err(ExportError::NoResponses {
            id: survey.id.clone(),
        });
    }

    let mut sheet = None;
    let bytes = match options.kind {
        ExportKind::Workbook | ExportKind::RawWorkbook => {
            let built = survey_sheet(survey, options.kind.flatten_strategy());
            let bytes = write_workbook(&built)?;
            sheet = Some(built);
            bytes
        }
        ExportKind::LegacyCsv => {
            write_legacy_csv(&survey.definition(), &survey.response_records())?
        }
        ExportKind::Json => write_json_export(survey, &options.export_date)?,
        ExportKind::SummaryReport => write_summary_report(survey, &options.export_date)?,
    };

    let artifact = ExportArtifact {
        kind: options.kind,
        filename: export_filename(&survey.title, options.kind, &options.export_date),
        content_type: options.kind.content_type(),
        bytes,
        sheet,
    };
    info!(
        filename = %artifact.filename,
        responses = survey.response_count(),
        bytes = artifact.bytes.len(),
        "export built"
    );
    Ok(artifact)
}

/// Export the survey with `id` from a loaded store.
pub fn export_from_store(
    store: &SurveyStore,
    id: &str,
    options: &ExportOptions,
) -> Result<ExportArtifact> {
    let survey = store
        .find(id)
        .ok_or_else(|| ExportError::SurveyNotFound { id: id.to_string() })?;
    export_survey(survey, options)
}

/// Save an artifact under `output_dir`, creating the directory if needed.
pub fn write_artifact(artifact: &ExportArtifact, output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir).map_err(io_error(output_dir))?;
    let path = output_dir.join(&artifact.filename);
    std::fs::write(&path, &artifact.bytes).map_err(io_error(&path))?;
    info!(path = %path.display(), bytes = artifact.bytes.len(), "export written");
    Ok(path)
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ExportError {
    let path = path.to_path_buf();
    move |source| ExportError::Io { path, source }
}
