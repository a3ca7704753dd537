//! Integration tests for the command pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use survey_cli::pipeline::{
    EXIT_NO_RESPONSES, EXIT_SURVEY_NOT_FOUND, build_codebook, exit_code, parse_export_date,
    run_export,
};
use survey_cli::types::ExportRequest;
use survey_model::{ExportKind, FlattenStrategy};

const STORE: &str = r#"{
    "surveys": [
        {
            "id": "s1",
            "title": "Team Pulse",
            "json": {
                "elements": [
                    { "type": "text", "name": "mood", "title": "Mood today" },
                    { "type": "checkbox", "name": "topics",
                      "choices": [{ "value": "a", "text": "Alpha" }, { "value": "b", "text": "Beta" }] }
                ]
            },
            "responses": [
                { "responseId": "r1", "data": { "mood": "good", "topics": ["a", "b"] } },
                { "responseId": "r2", "data": { "mood": "tired", "extra": 7 } }
            ]
        },
        { "id": "s2", "title": "Unanswered", "json": { "elements": [] } }
    ]
}"#;

fn write_store(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("store.json");
    fs::write(&path, STORE).unwrap();
    path
}

fn request(store: &Path, survey_id: &str, kind: ExportKind, output_dir: &Path) -> ExportRequest {
    ExportRequest {
        store: store.to_path_buf(),
        survey_id: survey_id.to_string(),
        kind,
        output_dir: output_dir.to_path_buf(),
        export_date: parse_export_date("2024-03-09").unwrap(),
    }
}

#[test]
fn test_parse_export_date() {
    let date = parse_export_date("2024-03-09").unwrap();
    assert_eq!(date.to_rfc3339(), "2024-03-09T00:00:00+00:00");
    assert!(parse_export_date("09/03/2024").is_err());
}

#[test]
fn test_run_export_writes_workbook() {
    let dir = TempDir::new().unwrap();
    let store = write_store(&dir);
    let out = dir.path().join("out");

    let outcome = run_export(&request(&store, "s1", ExportKind::Workbook, &out)).unwrap();

    assert_eq!(outcome.path, out.join("Team_Pulse_responses_2024-03-09.xlsx"));
    assert_eq!(outcome.responses, 2);
    assert_eq!(fs::metadata(&outcome.path).unwrap().len() as usize, outcome.bytes);
    let sheet = outcome.sheet.unwrap();
    assert_eq!(sheet.row_count(), 2);
    assert_eq!(sheet.dynamic_headers(), ["mood - Mood today", "topics - topics"]);
}

#[test]
fn test_run_export_writes_legacy_csv() {
    let dir = TempDir::new().unwrap();
    let store = write_store(&dir);

    let outcome = run_export(&request(&store, "s1", ExportKind::LegacyCsv, dir.path())).unwrap();

    assert!(outcome.sheet.is_none());
    let text = fs::read_to_string(&outcome.path).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(
        lines,
        ["\"Mood today\",\"topics\"", "\"good\",\"a, b\"", "\"tired\",\"\""]
    );
}

#[test]
fn test_missing_survey_exit_code() {
    let dir = TempDir::new().unwrap();
    let store = write_store(&dir);

    let error = run_export(&request(&store, "nope", ExportKind::Json, dir.path())).unwrap_err();

    assert_eq!(exit_code(&error), EXIT_SURVEY_NOT_FOUND);
    assert_eq!(error.to_string(), "Survey not found: nope");
}

#[test]
fn test_no_responses_exit_code() {
    let dir = TempDir::new().unwrap();
    let store = write_store(&dir);

    let error = run_export(&request(&store, "s2", ExportKind::Workbook, dir.path())).unwrap_err();

    assert_eq!(exit_code(&error), EXIT_NO_RESPONSES);
}

#[test]
fn test_missing_store_is_general_failure() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.json");

    let error = run_export(&request(&missing, "s1", ExportKind::Workbook, dir.path())).unwrap_err();

    assert_eq!(exit_code(&error), 1);
}

#[test]
fn test_codebook_strategies() {
    let dir = TempDir::new().unwrap();
    let store = write_store(&dir);

    let sheet = build_codebook(&store, "s1", FlattenStrategy::Definition).unwrap();
    let paths: Vec<_> = sheet.codebook.iter().map(|entry| entry.path.as_str()).collect();
    assert_eq!(paths, ["mood", "topics"]);

    let raw = build_codebook(&store, "s1", FlattenStrategy::Raw).unwrap();
    let paths: Vec<_> = raw.codebook.iter().map(|entry| entry.path.as_str()).collect();
    assert_eq!(paths, ["mood", "topics", "extra"]);
}
