//! Structural flattening of stored response data.

use serde_json::Value;

use survey_model::FlatRecord;

use super::{FlattenError, Flattener};
use crate::path::{index_path, join_path};
use crate::serialize::serialize_value;

/// Flattens stored response JSON without consulting the definition.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawFlattener;

impl Flattener for RawFlattener {
    fn name(&self) -> &'static str {
        "raw"
    }

    fn flatten(&self, data: &Value) -> Result<FlatRecord, FlattenError> {
        Ok(flatten_value(data))
    }
}

/// Flatten a whole response value from the root.
///
/// ```
/// use serde_json::json;
/// use survey_transform::flatten::flatten_value;
///
/// let record = flatten_value(&json!({
///     "q1": "Ann",
///     "colors": ["red", "blue"],
///     "family": [{ "age": 30 }, { "age": 4 }]
/// }));
/// assert_eq!(record["q1"], "Ann");
/// assert_eq!(record["colors"], "red, blue");
/// assert_eq!(record["family[2] - age"], "4");
/// ```
pub fn flatten_value(value: &Value) -> FlatRecord {
    let mut out = FlatRecord::new();
    flatten_into(value, "", &mut out);
    out
}

/// Flatten `value` found at `path` into `out`.
///
/// Nulls and empty arrays contribute nothing. Arrays holding only
/// primitives become one joined cell at `path`, even the empty root path;
/// any other array is indexed per element. A bare scalar at the root is
/// dropped.
pub fn flatten_into(value: &Value, path: &str, out: &mut FlatRecord) {
    match value {
        Value::Null => {}
        Value::Array(items) if items.is_empty() => {}
        Value::Array(items) if items.iter().all(is_primitive) => {
            out.insert(path.to_string(), serialize_value(value));
        }
        Value::Array(items) => {
            for (position, item) in items.iter().enumerate() {
                flatten_into(item, &index_path(path, position), out);
            }
        }
        Value::Object(object) => {
            for (key, child) in object {
                flatten_into(child, &join_path(path, key), out);
            }
        }
        primitive => store(primitive, path, out),
    }
}

fn store(value: &Value, path: &str, out: &mut FlatRecord) {
    if !path.is_empty() {
        out.insert(path.to_string(), serialize_value(value));
    }
}

pub(crate) fn is_primitive(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}
