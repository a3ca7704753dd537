//! Question index construction from a survey definition.

use serde_json::Value;
use tracing::debug;

use survey_model::{QuestionIndex, SurveyDefinition};

/// Index every named element of a definition by first occurrence.
///
/// Elements are visited depth-first in pre-order, so orders follow the
/// order questions appear in the survey. Later duplicates of a name are
/// ignored. The title is the element's display title, or its name.
pub fn build_question_index(definition: &SurveyDefinition) -> QuestionIndex {
    let index = definition
        .iter()
        .fold(QuestionIndex::new(), |mut index, element| {
            if let Some(name) = element.name() {
                index.insert_first(name, element.display_title().unwrap_or(name));
            }
            index
        });
    debug!(question_count = index.len(), "question index built");
    index
}

/// Index a definition given as raw JSON; malformed input yields an empty index.
pub fn build_question_index_from_value(value: &Value) -> QuestionIndex {
    build_question_index(&SurveyDefinition::from_value(value))
}
