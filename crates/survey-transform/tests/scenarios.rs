//! End-to-end tests for building response sheets.

use chrono::{TimeZone, Utc};
use serde_json::{Value, json};
use survey_model::{FlattenStrategy, ResponseRecord, Sheet, SurveyDefinition};
use survey_transform::{
    LegacyColumn, build_response_sheet, legacy_columns, legacy_rows, serialize_value,
};

fn sheet(definition: Value, data: Vec<Value>, strategy: FlattenStrategy) -> Sheet {
    let definition = SurveyDefinition::from_value(&definition);
    let responses: Vec<_> = data
        .into_iter()
        .enumerate()
        .map(|(position, data)| ResponseRecord::new(format!("r{}", position + 1), data))
        .collect();
    build_response_sheet(&definition, &responses, strategy)
}

#[test]
fn test_single_text_question() {
    let definition = json!({
        "pages": [{
            "name": "page1",
            "elements": [{ "type": "text", "name": "q1", "title": "Your name" }]
        }]
    });
    let data = vec![json!({ "q1": "Ann" })];

    for strategy in [FlattenStrategy::Definition, FlattenStrategy::Raw] {
        let sheet = sheet(definition.clone(), data.clone(), strategy);
        assert_eq!(sheet.headers, vec!["Response ID", "Submitted At", "q1 - Your name"]);
        assert_eq!(sheet.row_count(), 1);
        assert_eq!(sheet.value(0, "q1 - Your name"), Some("Ann"));
        assert_eq!(sheet.value(0, "Response ID"), Some("r1"));
    }
}

#[test]
fn test_primitive_array_is_one_column() {
    let sheet = sheet(
        json!({}),
        vec![json!({ "choices": ["a", "b", "c"] })],
        FlattenStrategy::Raw,
    );
    assert_eq!(sheet.dynamic_headers(), ["choices"]);
    assert_eq!(sheet.value(0, "choices"), Some("a, b, c"));
}

#[test]
fn test_object_array_is_indexed() {
    let sheet = sheet(
        json!({}),
        vec![json!({ "panel": [{ "x": 1 }, { "x": 2 }] })],
        FlattenStrategy::Raw,
    );
    assert_eq!(sheet.dynamic_headers(), ["panel[1] - x", "panel[2] - x"]);
    assert_eq!(sheet.value(0, "panel[1] - x"), Some("1"));
    assert_eq!(sheet.value(0, "panel[2] - x"), Some("2"));
}

#[test]
fn test_colliding_labels_get_counters() {
    let definition = json!({
        "elements": [{ "type": "comment", "name": "q2", "title": "Comment" }]
    });
    let sheet = sheet(
        definition,
        vec![json!({ "q2": "top", "extra": 1 }), json!({ "q2": { "Comment": "nested" } })],
        FlattenStrategy::Raw,
    );
    assert_eq!(
        sheet.dynamic_headers(),
        ["q2 - Comment", "q2 - Comment (2)", "extra"]
    );
    assert_eq!(sheet.value(0, "q2 - Comment"), Some("top"));
    assert_eq!(sheet.value(1, "q2 - Comment (2)"), Some("nested"));
    assert_eq!(sheet.codebook[1].path, "q2 - Comment");
    assert_eq!(sheet.codebook[1].identifier, "Comment");
    assert_eq!(sheet.codebook[1].title, "");
}

#[test]
fn test_blank_choice_text_uses_value() {
    assert_eq!(serialize_value(&json!({ "text": "", "value": "fallback" })), "fallback");
}

#[test]
fn test_definition_strategy_shows_choice_labels() {
    let definition = json!({
        "elements": [{
            "type": "radiogroup",
            "name": "color",
            "title": "Favourite colour",
            "choices": [{ "value": "r", "text": "Red" }, { "value": "g", "text": "Green" }]
        }]
    });
    let data = vec![json!({ "color": "g" })];

    let labeled = sheet(definition.clone(), data.clone(), FlattenStrategy::Definition);
    assert_eq!(labeled.value(0, "color - Favourite colour"), Some("Green"));

    let raw = sheet(definition, data, FlattenStrategy::Raw);
    assert_eq!(raw.value(0, "color - Favourite colour"), Some("g"));
}

#[test]
fn test_dynamic_panels_match_across_strategies() {
    let definition = json!({
        "elements": [{
            "type": "paneldynamic",
            "name": "panel",
            "title": "Members",
            "templateElements": [{ "type": "text", "name": "x", "title": "Name" }]
        }]
    });
    let data = vec![json!({ "panel": [{ "x": "Ann" }, { "x": "Bob" }] })];

    let labeled = sheet(definition.clone(), data.clone(), FlattenStrategy::Definition);
    let raw = sheet(definition, data, FlattenStrategy::Raw);
    assert_eq!(labeled.headers, raw.headers);
    assert_eq!(
        labeled.dynamic_headers(),
        ["panel[1] - x - Name", "panel[2] - x - Name"]
    );
    assert_eq!(labeled.rows, raw.rows);
}

#[test]
fn test_non_object_response_falls_back_to_raw() {
    let definition = json!({
        "elements": [{ "type": "text", "name": "q1", "title": "Name" }]
    });
    let sheet = sheet(
        definition,
        vec![json!({ "q1": "Ann" }), json!("garbage"), json!([{ "q1": "Bob" }])],
        FlattenStrategy::Definition,
    );
    assert_eq!(sheet.row_count(), 3);
    assert_eq!(sheet.value(0, "q1 - Name"), Some("Ann"));
    assert_eq!(sheet.value(1, "q1 - Name"), Some(""));
    assert_eq!(sheet.value(2, "[1] - q1 - Name"), Some("Bob"));
}

#[test]
fn test_root_primitive_array_is_one_unnamed_column() {
    let sheet = sheet(
        json!({ "elements": [] }),
        vec![json!(["a", "b"]), json!({ "q1": "Ann" })],
        FlattenStrategy::Raw,
    );
    assert_eq!(sheet.dynamic_headers(), ["", "q1"]);
    assert_eq!(sheet.value(0, ""), Some("a, b"));
    assert_eq!(sheet.value(1, ""), Some(""));
}

#[test]
fn test_definition_without_questions_uses_raw_paths() {
    let sheet = sheet(
        json!("{not valid"),
        vec![json!({ "q1": "Ann", "nested": { "a": true } })],
        FlattenStrategy::Definition,
    );
    assert_eq!(sheet.dynamic_headers(), ["nested - a", "q1"]);
    assert_eq!(sheet.value(0, "nested - a"), Some("Yes"));
}

#[test]
fn test_rows_follow_response_order_with_timestamps() {
    let definition = SurveyDefinition::from_value(&json!({
        "elements": [{ "type": "text", "name": "q1" }]
    }));
    let responses = vec![
        ResponseRecord::new("b", json!({ "q1": "second" })),
        ResponseRecord::new("a", json!({}))
            .with_submitted_at(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()),
    ];
    let sheet = build_response_sheet(&definition, &responses, FlattenStrategy::Definition);
    assert_eq!(sheet.rows[0].cells, vec!["b", "", "second"]);
    assert_eq!(sheet.rows[1].cells, vec!["a", "2024-05-01T10:00:00.000Z", ""]);
    assert_eq!(sheet.headers[2], "q1 - q1");
}

#[test]
fn test_legacy_matrix_rows() {
    let definition = SurveyDefinition::from_value(&json!({
        "pages": [{
            "name": "page1",
            "elements": [{
                "type": "matrix",
                "name": "quality",
                "title": "Quality",
                "rows": [{ "value": "food", "text": "Food" }, { "value": "service", "text": "Service" }]
            }]
        }]
    }));
    let columns = legacy_columns(&definition);
    let names: Vec<_> = columns.iter().map(LegacyColumn::name).collect();
    assert_eq!(names, vec!["quality.food", "quality.service"]);

    let responses = vec![ResponseRecord::new(
        "r1",
        json!({ "quality": { "food": 5, "service": "ok" } }),
    )];
    let (headers, rows) = legacy_rows(&columns, &responses);
    assert_eq!(headers, vec!["Quality [Food]", "Quality [Service]"]);
    assert_eq!(rows, vec![vec!["5".to_string(), "ok".to_string()]]);
}

#[test]
fn test_codebook_describes_generated_columns() {
    let sheet = sheet(
        json!({ "elements": [{ "type": "text", "name": "q1", "title": "Your name" }] }),
        vec![json!({ "q1": "Ann", "extra": [{ "x": 1 }] })],
        FlattenStrategy::Raw,
    );
    insta::assert_json_snapshot!(sheet.codebook, @r#"
    [
      {
        "header": "q1 - Your name",
        "path": "q1",
        "identifier": "q1",
        "title": "Your name"
      },
      {
        "header": "extra[1] - x",
        "path": "extra[1] - x",
        "identifier": "x",
        "title": ""
      }
    ]
    "#);
}
