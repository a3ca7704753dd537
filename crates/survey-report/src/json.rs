//! JSON export and summary report.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use survey_ingest::{StoredResponse, SurveyDocument};
use survey_model::format_timestamp;
use survey_transform::{SummaryStatistics, summarize_responses};

use crate::error::Result;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportedSurvey<'a> {
    id: &'a str,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    export_date: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportedResponse<'a> {
    id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    submitted_at: Option<String>,
    data: &'a Value,
}

impl<'a> From<&'a StoredResponse> for ExportedResponse<'a> {
    fn from(response: &'a StoredResponse) -> Self {
        Self {
            id: &response.response_id,
            submitted_at: response.submitted_at.as_ref().map(format_timestamp),
            data: &response.data,
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonExport<'a> {
    survey: ExportedSurvey<'a>,
    responses: Vec<ExportedResponse<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportedSurvey<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    total_responses: usize,
    export_date: String,
}

#[derive(Debug, Serialize)]
struct SummaryReport<'a> {
    survey: ReportedSurvey<'a>,
    statistics: SummaryStatistics,
    responses: Vec<ExportedResponse<'a>>,
}

fn exported_responses(survey: &SurveyDocument) -> Vec<ExportedResponse<'_>> {
    survey.responses.iter().map(ExportedResponse::from).collect()
}

/// Survey metadata and stored responses, pretty-printed.
pub fn write_json_export(survey: &SurveyDocument, export_date: &DateTime<Utc>) -> Result<Vec<u8>> {
    let export = JsonExport {
        survey: ExportedSurvey {
            id: &survey.id,
            title: &survey.title,
            description: survey.description.as_deref(),
            export_date: format_timestamp(export_date),
        },
        responses: exported_responses(survey),
    };
    Ok(serde_json::to_vec_pretty(&export)?)
}

/// Per-question statistics followed by the stored responses, pretty-printed.
pub fn write_summary_report(
    survey: &SurveyDocument,
    export_date: &DateTime<Utc>,
) -> Result<Vec<u8>> {
    let statistics = summarize_responses(&survey.response_records());
    let report = SummaryReport {
        survey: ReportedSurvey {
            title: &survey.title,
            description: survey.description.as_deref(),
            total_responses: survey.response_count(),
            export_date: format_timestamp(export_date),
        },
        statistics,
        responses: exported_responses(survey),
    };
    Ok(serde_json::to_vec_pretty(&report)?)
}
