//! Per-question response statistics.

use std::collections::BTreeSet;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use survey_model::ResponseRecord;

/// Answer counts for one top-level response key.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionStatistics {
    /// Responses with a non-empty answer.
    pub response_count: usize,
    /// `response_count` as a share of all responses, e.g. `"66.7%"`.
    pub response_rate: String,
    /// Distinct non-empty answers.
    pub unique_values: usize,
}

/// Statistics keyed by question, in the order keys first appear.
///
/// Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryStatistics {
    entries: Vec<(String, QuestionStatistics)>,
}

impl SummaryStatistics {
    pub fn get(&self, key: &str) -> Option<&QuestionStatistics> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, statistics)| statistics)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QuestionStatistics)> {
        self.entries
            .iter()
            .map(|(key, statistics)| (key.as_str(), statistics))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for SummaryStatistics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, statistics) in &self.entries {
            map.serialize_entry(key, statistics)?;
        }
        map.end()
    }
}

/// Count answers for every top-level key seen in any response.
///
/// Null and empty-string answers do not count; distinct answers are
/// compared by their JSON text.
pub fn summarize_responses(responses: &[ResponseRecord]) -> SummaryStatistics {
    let mut keys: Vec<&str> = Vec::new();
    for response in responses {
        if let Value::Object(data) = &response.data {
            for key in data.keys() {
                if !keys.contains(&key.as_str()) {
                    keys.push(key);
                }
            }
        }
    }

    let total = responses.len();
    let entries = keys
        .into_iter()
        .map(|key| {
            let answers: Vec<&Value> = responses
                .iter()
                .filter_map(|response| response.data.get(key))
                .filter(|answer| !is_blank(answer))
                .collect();
            let unique_values = answers
                .iter()
                .map(ToString::to_string)
                .collect::<BTreeSet<_>>()
                .len();
            let statistics = QuestionStatistics {
                response_count: answers.len(),
                response_rate: response_rate(answers.len(), total),
                unique_values,
            };
            (key.to_string(), statistics)
        })
        .collect();
    SummaryStatistics { entries }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}

fn response_rate(count: usize, total: usize) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", count as f64 / total as f64 * 100.0)
}
