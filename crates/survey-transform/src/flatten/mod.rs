//! Response flattening strategies.
//!
//! A [`Flattener`] turns one response's data into a `path -> cell text` map.
//! Two strategies exist:
//!
//! - [`RawFlattener`] walks the stored JSON directly and never fails.
//! - [`DefinitionFlattener`] walks the survey definition against the data,
//!   mapping choice values to their labels. It fails for data it cannot
//!   describe, so it is normally composed with a fallback:
//!
//! ```
//! use serde_json::json;
//! use survey_model::SurveyDefinition;
//! use survey_transform::flatten::{DefinitionFlattener, Flattener, RawFlattener};
//!
//! let definition = SurveyDefinition::from_value(&json!({
//!     "elements": [{ "type": "text", "name": "q1" }]
//! }));
//! let flattener = DefinitionFlattener::new(&definition).with_fallback(RawFlattener);
//!
//! let record = flattener.flatten(&json!("not an object")).unwrap();
//! assert!(record.is_empty());
//! ```

mod definition;
mod raw;

pub use definition::DefinitionFlattener;
pub use raw::{RawFlattener, flatten_into, flatten_value};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info_span, warn};

use survey_model::{FlatRecord, FlattenedResponse, ResponseRecord};

/// Why a strategy could not flatten a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlattenError {
    /// The response data is not a JSON object.
    #[error("response data is {kind}, expected an object")]
    NotAnObject { kind: &'static str },

    /// The definition has no named questions to look answers up by.
    #[error("survey definition has no named questions")]
    EmptyDefinition,
}

/// A strategy turning response data into a flat path map.
pub trait Flattener {
    /// Short strategy name used in logs.
    fn name(&self) -> &'static str;

    fn flatten(&self, data: &Value) -> Result<FlatRecord, FlattenError>;

    /// Run `fallback` for responses this strategy fails on.
    fn with_fallback<F>(self, fallback: F) -> WithFallback<Self, F>
    where
        Self: Sized,
        F: Flattener,
    {
        WithFallback {
            primary: self,
            fallback,
        }
    }
}

impl<T: Flattener + ?Sized> Flattener for &T {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn flatten(&self, data: &Value) -> Result<FlatRecord, FlattenError> {
        (**self).flatten(data)
    }
}

impl<T: Flattener + ?Sized> Flattener for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn flatten(&self, data: &Value) -> Result<FlatRecord, FlattenError> {
        (**self).flatten(data)
    }
}

/// Two strategies where the second handles whatever the first rejects.
#[derive(Debug, Clone)]
pub struct WithFallback<P, F> {
    primary: P,
    fallback: F,
}

impl<P: Flattener, F: Flattener> Flattener for WithFallback<P, F> {
    fn name(&self) -> &'static str {
        self.primary.name()
    }

    fn flatten(&self, data: &Value) -> Result<FlatRecord, FlattenError> {
        self.primary.flatten(data).or_else(|error| {
            warn!(
                primary = self.primary.name(),
                fallback = self.fallback.name(),
                %error,
                "flattening failed, using fallback strategy"
            );
            self.fallback.flatten(data)
        })
    }
}

/// Flatten every response with one strategy.
///
/// A response the strategy still fails on contributes an empty record, so
/// one malformed response never aborts an export.
pub fn flatten_responses(
    records: &[ResponseRecord],
    flattener: &dyn Flattener,
) -> Vec<FlattenedResponse> {
    records
        .iter()
        .map(|record| {
            let span = info_span!("flatten_response", response_id = %record.response_id);
            let _guard = span.enter();
            let values = match flattener.flatten(&record.data) {
                Ok(values) => values,
                Err(error) => {
                    warn!(strategy = flattener.name(), %error, "response skipped");
                    FlatRecord::new()
                }
            };
            debug!(path_count = values.len(), "response flattened");
            FlattenedResponse::new(record, values)
        })
        .collect()
}

/// JSON type name of a value, for error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
