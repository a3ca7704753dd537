use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One submitted response as handed to the export pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    #[serde(default)]
    pub response_id: String,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl ResponseRecord {
    pub fn new(response_id: impl Into<String>, data: Value) -> Self {
        Self {
            response_id: response_id.into(),
            data,
            submitted_at: None,
        }
    }

    #[must_use]
    pub fn with_submitted_at(mut self, submitted_at: DateTime<Utc>) -> Self {
        self.submitted_at = Some(submitted_at);
        self
    }
}

/// Structural path to serialized cell text for one response.
pub type FlatRecord = BTreeMap<String, String>;

/// A response after flattening, ready for sheet assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct FlattenedResponse {
    pub response_id: String,
    pub submitted_at: Option<DateTime<Utc>>,
    pub values: FlatRecord,
}

impl FlattenedResponse {
    pub fn new(record: &ResponseRecord, values: FlatRecord) -> Self {
        Self {
            response_id: record.response_id.clone(),
            submitted_at: record.submitted_at,
            values,
        }
    }

    /// ISO-8601 submission time, or an empty string when unknown.
    pub fn submitted_at_text(&self) -> String {
        self.submitted_at
            .as_ref()
            .map(format_timestamp)
            .unwrap_or_default()
    }
}

/// Render a timestamp as UTC ISO-8601 with millisecond precision.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
