//! Legacy one-column-per-question table.
//!
//! An older, simpler export format kept alongside the path-based sheet. It
//! has one column per question (and one per row of a matrix question),
//! headed by question titles, and looks answers up only at the top level of
//! the response data. It does not share header logic with [`crate::labels`].

use serde_json::Value;

use survey_model::{Element, Question, ResponseRecord, SurveyDefinition};

use crate::serialize::{number_text, yes_no};

/// Where a legacy column reads its answer from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegacyKey {
    /// `data[question]`
    Question(String),
    /// `data[question][row]`
    MatrixRow { question: String, row: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyColumn {
    pub key: LegacyKey,
    /// Header cell text.
    pub title: String,
}

impl LegacyColumn {
    /// Column name: the question name, or `question.row` for matrix rows.
    pub fn name(&self) -> String {
        match &self.key {
            LegacyKey::Question(question) => question.clone(),
            LegacyKey::MatrixRow { question, row } => format!("{question}.{row}"),
        }
    }
}

/// Columns in definition order. Containers only contribute their children.
pub fn legacy_columns(definition: &SurveyDefinition) -> Vec<LegacyColumn> {
    let mut columns = Vec::new();
    collect_columns(&definition.elements, &mut columns);
    columns
}

fn collect_columns(elements: &[Element], columns: &mut Vec<LegacyColumn>) {
    for element in elements {
        match element {
            Element::Container(container) => collect_columns(&container.children, columns),
            Element::Question(question) => question_columns(question, columns),
        }
    }
}

fn question_columns(question: &Question, columns: &mut Vec<LegacyColumn>) {
    let Some(name) = question.name.as_deref() else {
        return;
    };
    let title = question.title.as_deref().unwrap_or(name);
    if !question.is_matrix() {
        columns.push(LegacyColumn {
            key: LegacyKey::Question(name.to_string()),
            title: title.to_string(),
        });
        return;
    }
    columns.extend(question.rows.iter().map(|row| LegacyColumn {
        key: LegacyKey::MatrixRow {
            question: name.to_string(),
            row: row.value_text(),
        },
        title: format!("{title} [{}]", row.text),
    }));
}

/// The raw answer a column shows for one response, if any.
pub fn legacy_value<'a>(column: &LegacyColumn, data: &'a Value) -> Option<&'a Value> {
    match &column.key {
        LegacyKey::Question(question) => data.get(question),
        LegacyKey::MatrixRow { question, row } => data
            .get(question)
            .filter(|answer| answer.is_object())
            .and_then(|answer| answer.get(row)),
    }
}

/// Legacy cell text: arrays joined with `", "`, objects as JSON, booleans
/// as Yes/No.
///
/// ```
/// use serde_json::json;
/// use survey_transform::legacy::legacy_serialize;
///
/// assert_eq!(legacy_serialize(&json!([1, true, null])), "1, Yes, ");
/// assert_eq!(legacy_serialize(&json!({"a": 1})), r#"{"a":1}"#);
/// ```
pub fn legacy_serialize(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => yes_no(*flag).to_string(),
        Value::Number(number) => number_text(number),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(legacy_serialize)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    }
}

/// Header cells followed by one row of cells per response.
pub fn legacy_rows(
    columns: &[LegacyColumn],
    responses: &[ResponseRecord],
) -> (Vec<String>, Vec<Vec<String>>) {
    let headers = columns.iter().map(|column| column.title.clone()).collect();
    let rows = responses
        .iter()
        .map(|response| {
            columns
                .iter()
                .map(|column| {
                    legacy_value(column, &response.data)
                        .map(legacy_serialize)
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();
    (headers, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn definition() -> SurveyDefinition {
        SurveyDefinition::from_value(&json!({
            "pages": [{
                "name": "page1",
                "elements": [
                    { "type": "text", "name": "q1", "title": "Name" },
                    { "type": "matrix", "name": "grid", "title": "Rate",
                      "rows": [{ "value": "speed", "text": "Speed" }, "price"] },
                    { "type": "panel", "name": "box", "elements": [{ "type": "text", "name": "inner" }] },
                    { "type": "dropdown", "title": "unnamed" }
                ]
            }]
        }))
    }

    #[test]
    fn matrix_rows_become_columns() {
        let columns = legacy_columns(&definition());
        let names: Vec<_> = columns.iter().map(LegacyColumn::name).collect();
        assert_eq!(names, vec!["q1", "grid.speed", "grid.price", "inner"]);
        let titles: Vec<_> = columns.iter().map(|column| column.title.as_str()).collect();
        assert_eq!(titles, vec!["Name", "Rate [Speed]", "Rate [price]", "inner"]);
    }

    #[test]
    fn rows_read_top_level_answers() {
        let columns = legacy_columns(&definition());
        let responses = vec![
            ResponseRecord::new("r1", json!({ "q1": "Ann", "grid": { "speed": 5 }, "inner": ["a", "b"] })),
            ResponseRecord::new("r2", json!({ "grid": "not a matrix" })),
        ];
        let (headers, rows) = legacy_rows(&columns, &responses);
        assert_eq!(headers.len(), 4);
        assert_eq!(rows[0], vec!["Ann", "5", "", "a, b"]);
        assert_eq!(rows[1], vec!["", "", "", ""]);
    }

    #[test]
    fn non_matrix_types_with_rows_stay_single() {
        let definition = SurveyDefinition::from_value(&json!({
            "elements": [{ "type": "matrixdropdown", "name": "md", "rows": ["a"] }]
        }));
        let columns = legacy_columns(&definition);
        assert_eq!(columns.len(), 1);
        assert_eq!(columns[0].key, LegacyKey::Question("md".to_string()));
    }
}
