//! Stored survey documents.
//!
//! The store mirrors the shape surveys are persisted in: one document per
//! survey with its definition under `json` and its responses embedded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

use survey_model::{ResponseRecord, SurveyDefinition};

/// A survey as stored, including its embedded responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyDocument {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Definition as an object, or as JSON-encoded text.
    #[serde(default)]
    pub json: Value,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub responses: Vec<StoredResponse>,
}

/// One embedded response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredResponse {
    #[serde(default)]
    pub response_id: String,
    #[serde(default)]
    pub data: Value,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_active() -> bool {
    true
}

impl SurveyDocument {
    /// Normalized definition of this survey.
    ///
    /// Definitions stored as text are parsed first; text that is not valid
    /// JSON yields an empty definition so exports still run without titles.
    pub fn definition(&self) -> SurveyDefinition {
        match &self.json {
            Value::String(text) => SurveyDefinition::from_json_str(text).unwrap_or_else(|error| {
                warn!(survey_id = %self.id, %error, "survey definition is not valid JSON");
                SurveyDefinition::default()
            }),
            value => SurveyDefinition::from_value(value),
        }
    }

    /// Responses in stored order, as pipeline input records.
    pub fn response_records(&self) -> Vec<ResponseRecord> {
        self.responses
            .iter()
            .map(StoredResponse::to_record)
            .collect()
    }

    pub fn response_count(&self) -> usize {
        self.responses.len()
    }
}

impl StoredResponse {
    pub fn to_record(&self) -> ResponseRecord {
        ResponseRecord {
            response_id: self.response_id.clone(),
            data: self.data.clone(),
            submitted_at: self.submitted_at,
        }
    }
}

/// Accept RFC 3339 text, `{"$date": ...}` wrappers and epoch milliseconds.
///
/// Unrecognized values become `None` instead of failing the whole store.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(timestamp_from_value(&value))
}

fn timestamp_from_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) => DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|timestamp| timestamp.with_timezone(&Utc)),
        Value::Number(number) => number
            .as_i64()
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        Value::Object(object) => object.get("$date").and_then(timestamp_from_value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_extended_json_dates() {
        let response: StoredResponse = serde_json::from_value(json!({
            "responseId": "r1",
            "data": {},
            "submittedAt": { "$date": "2024-05-01T10:00:00Z" }
        }))
        .unwrap();
        assert_eq!(
            response.submitted_at.map(|t| t.to_rfc3339()),
            Some("2024-05-01T10:00:00+00:00".to_string())
        );
    }

    #[test]
    fn parses_epoch_millis() {
        assert_eq!(
            timestamp_from_value(&json!(0)).map(|t| t.timestamp()),
            Some(0)
        );
    }

    #[test]
    fn unknown_timestamps_become_none() {
        assert_eq!(timestamp_from_value(&json!("yesterday")), None);
        assert_eq!(timestamp_from_value(&json!(true)), None);
    }

    #[test]
    fn definition_parses_text_json() {
        let document: SurveyDocument = serde_json::from_value(json!({
            "id": "s1",
            "title": "Survey",
            "json": "{\"elements\":[{\"name\":\"q1\"}]}"
        }))
        .unwrap();
        assert_eq!(document.definition().elements.len(), 1);
        assert!(document.is_active);
    }

    #[test]
    fn invalid_definition_text_is_empty() {
        let document: SurveyDocument = serde_json::from_value(json!({
            "id": "s1",
            "title": "Survey",
            "json": "{broken"
        }))
        .unwrap();
        assert!(document.definition().is_empty());
    }
}
