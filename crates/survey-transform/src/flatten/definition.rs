//! Definition-guided flattening.
//!
//! Walks the definition tree against a response object: pages and panels
//! only group questions, dynamic panels repeat their template once per
//! answer item, and choice answers are shown by their labels.

use serde_json::{Map, Value};
use tracing::trace;

use survey_model::{Container, Element, FlatRecord, Question, SurveyDefinition};

use super::raw::{flatten_into, is_primitive};
use super::{FlattenError, Flattener, json_kind};
use crate::path::{index_path, join_path};
use crate::serialize::serialize_value;

/// Flattens responses by walking the survey definition.
#[derive(Debug, Clone, Copy)]
pub struct DefinitionFlattener<'a> {
    definition: &'a SurveyDefinition,
}

impl<'a> DefinitionFlattener<'a> {
    pub fn new(definition: &'a SurveyDefinition) -> Self {
        Self { definition }
    }

    fn walk(&self, elements: &[Element], scope: &Map<String, Value>, path: &str, out: &mut FlatRecord) {
        for element in elements {
            match element {
                Element::Container(container) if container.repeating => {
                    self.walk_repeating(container, scope, path, out);
                }
                Element::Container(container) => self.walk(&container.children, scope, path, out),
                Element::Question(question) => emit_question(question, scope, path, out),
            }
        }
    }

    fn walk_repeating(
        &self,
        container: &Container,
        scope: &Map<String, Value>,
        path: &str,
        out: &mut FlatRecord,
    ) {
        let Some(name) = container.name.as_deref() else {
            return;
        };
        let Some(answer) = scope.get(name).filter(|answer| !is_empty_answer(answer)) else {
            return;
        };
        let panel_path = join_path(path, name);
        let Value::Array(items) = answer else {
            trace!(panel = name, kind = json_kind(answer), "dynamic panel answer is not an array");
            flatten_into(answer, &panel_path, out);
            return;
        };
        for (position, item) in items.iter().enumerate() {
            let item_path = index_path(&panel_path, position);
            match item {
                Value::Object(item_scope) => self.walk(&container.children, item_scope, &item_path, out),
                other => flatten_into(other, &item_path, out),
            }
        }
    }
}

impl Flattener for DefinitionFlattener<'_> {
    fn name(&self) -> &'static str {
        "definition"
    }

    fn flatten(&self, data: &Value) -> Result<FlatRecord, FlattenError> {
        let Value::Object(scope) = data else {
            return Err(FlattenError::NotAnObject {
                kind: json_kind(data),
            });
        };
        if self.definition.questions().next().is_none() {
            return Err(FlattenError::EmptyDefinition);
        }
        let mut out = FlatRecord::new();
        self.walk(&self.definition.elements, scope, "", &mut out);
        Ok(out)
    }
}

fn emit_question(question: &Question, scope: &Map<String, Value>, path: &str, out: &mut FlatRecord) {
    let Some(name) = question.name.as_deref() else {
        return;
    };
    let Some(answer) = scope.get(name).filter(|answer| !is_empty_answer(answer)) else {
        return;
    };
    let question_path = join_path(path, name);
    match answer {
        Value::Object(_) => flatten_into(answer, &question_path, out),
        Value::Array(items) if !items.iter().all(is_primitive) => {
            flatten_into(answer, &question_path, out);
        }
        Value::Array(items) => {
            let labels = items.iter().map(|item| display_value(question, item)).collect();
            out.insert(question_path, serialize_value(&Value::Array(labels)));
        }
        scalar => {
            out.insert(question_path, serialize_value(&display_value(question, scalar)));
        }
    }
}

/// The choice label for a stored value, or the value itself.
fn display_value(question: &Question, value: &Value) -> Value {
    question
        .choice_text(value)
        .map_or_else(|| value.clone(), |text| Value::String(text.to_string()))
}

fn is_empty_answer(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(object) => object.is_empty(),
        _ => false,
    }
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
                    { "type": "radiogroup", "name": "color", "choices": [
                        { "value": 1, "text": "Red" }, { "value": 2, "text": "Blue" }
                    ]},
                    { "type": "checkbox", "name": "pets", "choices": [
                        { "value": "cat", "text": "Cat" }, "dog"
                    ]},
                    { "type": "panel", "name": "details", "elements": [
                        { "type": "boolean", "name": "agree" }
                    ]},
                    { "type": "paneldynamic", "name": "family", "templateElements": [
                        { "type": "text", "name": "age" }
                    ]}
                ]
            }]
        }))
    }

    #[test]
    fn choice_values_become_labels() {
        let definition = definition();
        let record = DefinitionFlattener::new(&definition)
            .flatten(&json!({ "color": 2, "pets": ["cat", "dog", "fish"], "agree": true }))
            .unwrap();
        assert_eq!(record["color"], "Blue");
        assert_eq!(record["pets"], "Cat, dog, fish");
        assert_eq!(record["agree"], "Yes");
    }

    #[test]
    fn dynamic_panels_repeat_their_template() {
        let definition = definition();
        let record = DefinitionFlattener::new(&definition)
            .flatten(&json!({ "family": [{ "age": 30 }, { "age": 4, "extra": "x" }] }))
            .unwrap();
        let paths: Vec<_> = record.keys().map(String::as_str).collect();
        assert_eq!(paths, vec!["family[1] - age", "family[2] - age"]);
    }

    #[test]
    fn unknown_keys_and_empty_answers_are_not_emitted() {
        let definition = definition();
        let record = DefinitionFlattener::new(&definition)
            .flatten(&json!({ "color": "", "pets": [], "stray": "value" }))
            .unwrap();
        assert!(record.is_empty());
    }

    #[test]
    fn object_answers_use_raw_paths() {
        let definition = SurveyDefinition::from_value(&json!({
            "elements": [{ "type": "matrix", "name": "grid", "rows": ["r1", "r2"] }]
        }));
        let record = DefinitionFlattener::new(&definition)
            .flatten(&json!({ "grid": { "r1": "good", "r2": "bad" } }))
            .unwrap();
        assert_eq!(record["grid - r1"], "good");
        assert_eq!(record["grid - r2"], "bad");
    }

    #[test]
    fn rejects_non_object_data_and_empty_definitions() {
        let definition = definition();
        assert_eq!(
            DefinitionFlattener::new(&definition).flatten(&json!([1])),
            Err(FlattenError::NotAnObject { kind: "an array" })
        );
        let empty = SurveyDefinition::default();
        assert_eq!(
            DefinitionFlattener::new(&empty).flatten(&json!({ "q": 1 })),
            Err(FlattenError::EmptyDefinition)
        );
    }
}
