//! Command pipeline: load the store, export, and map failures to exit codes.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, info_span, trace};

use survey_ingest::{SurveyDocument, SurveyStore};
use survey_model::{ExportOptions, FlattenStrategy, Sheet};
use survey_report::{ExportError, export_survey, survey_sheet, write_artifact};

use crate::logging::redact_value;
use crate::types::{ExportOutcome, ExportRequest};

/// Exit code for a survey id that is not in the store.
pub const EXIT_SURVEY_NOT_FOUND: i32 = 2;
/// Exit code for a survey without responses.
pub const EXIT_NO_RESPONSES: i32 = 3;

pub fn load_store(path: &Path) -> Result<SurveyStore> {
    SurveyStore::load(path).with_context(|| format!("load survey store {}", path.display()))
}

/// Look a survey up, reporting a missing id as [`ExportError::SurveyNotFound`].
pub fn find_survey<'a>(store: &'a SurveyStore, survey_id: &str) -> Result<&'a SurveyDocument> {
    store.find(survey_id).ok_or_else(|| {
        anyhow!(ExportError::SurveyNotFound {
            id: survey_id.to_string(),
        })
    })
}

/// Parse a `YYYY-MM-DD` export date as midnight UTC.
pub fn parse_export_date(text: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .with_context(|| format!("invalid export date '{text}', expected YYYY-MM-DD"))?;
    Ok(date.and_time(chrono::NaiveTime::MIN).and_utc())
}

/// Build one export and write it to the output directory.
pub fn run_export(request: &ExportRequest) -> Result<ExportOutcome> {
    let span = info_span!("export", survey_id = %request.survey_id, kind = ?request.kind);
    let _guard = span.enter();

    let store = load_store(&request.store)?;
    let survey = find_survey(&store, &request.survey_id)?;
    let options = ExportOptions::new(request.kind).with_export_date(request.export_date);
    let artifact = export_survey(survey, &options)?;
    if let Some(sheet) = &artifact.sheet {
        trace_rows(sheet);
    }
    let path = write_artifact(&artifact, &request.output_dir)?;
    info!(path = %path.display(), "export complete");

    Ok(ExportOutcome {
        survey_id: survey.id.clone(),
        survey_title: survey.title.clone(),
        kind: artifact.kind,
        path,
        bytes: artifact.bytes.len(),
        responses: survey.response_count(),
        sheet: artifact.sheet,
    })
}

/// The response table of one survey, without writing anything.
pub fn build_codebook(store_path: &Path, survey_id: &str, strategy: FlattenStrategy) -> Result<Sheet> {
    let store = load_store(store_path)?;
    let survey = find_survey(&store, survey_id)?;
    Ok(survey_sheet(survey, strategy))
}

fn trace_rows(sheet: &Sheet) {
    for row in &sheet.rows {
        let cells = row.cells.join(" | ");
        trace!(cells = %redact_value(&cells), "exported row");
    }
}

/// Process exit code for a failed command.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    match error
        .chain()
        .find_map(|cause| cause.downcast_ref::<ExportError>())
    {
        Some(ExportError::SurveyNotFound { .. }) => EXIT_SURVEY_NOT_FOUND,
        Some(ExportError::NoResponses { .. }) => EXIT_NO_RESPONSES,
        _ => 1,
    }
}
