//! Cell text serialization for answer values.
//!
//! Every answer, however nested, ends up as one spreadsheet cell. Arrays are
//! joined, labeled choices collapse to their label, other objects become
//! `key: value` lists, and the result is clipped to the spreadsheet cell
//! limit.

use serde_json::{Map, Number, Value};

/// Maximum number of characters a spreadsheet cell can hold.
pub const CELL_TEXT_LIMIT: usize = 32_767;

/// Appended to clipped cell text; included in [`CELL_TEXT_LIMIT`].
pub const TRUNCATION_MARKER: &str = " …[truncated]";

/// Objects nested deeper than this are rendered as JSON instead of
/// `key: value` lists.
const MAX_ENTRY_DEPTH: usize = 64;

/// Serialize an answer value into cell text.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use survey_transform::serialize_value;
///
/// assert_eq!(serialize_value(&json!(["a", "b", "c"])), "a, b, c");
/// assert_eq!(serialize_value(&json!(true)), "Yes");
/// assert_eq!(serialize_value(&json!({"text": "", "value": "fallback"})), "fallback");
/// assert_eq!(serialize_value(&json!({"w": 1, "h": 2})), "w: 1; h: 2");
/// assert_eq!(serialize_value(&json!(null)), "");
/// ```
pub fn serialize_value(value: &Value) -> String {
    serialize_at_depth(value, 0)
}

fn serialize_at_depth(value: &Value, depth: usize) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => yes_no(*flag).to_string(),
        Value::Number(number) => clip_cell_text(number_text(number)),
        Value::String(text) => clip_cell_text(text.clone()),
        Value::Array(items) => {
            let joined = items
                .iter()
                .map(|item| serialize_at_depth(item, depth))
                .collect::<Vec<_>>()
                .join(", ");
            clip_cell_text(joined)
        }
        Value::Object(object) => serialize_object(object, depth),
    }
}

fn serialize_object(object: &Map<String, Value>, depth: usize) -> String {
    if let Some(label) = labeled_choice_text(object) {
        return clip_cell_text(label);
    }
    if object.is_empty() {
        return String::new();
    }
    match entries_text(object, depth) {
        Some(text) => clip_cell_text(text),
        None => serde_json::to_string(object)
            .map(clip_cell_text)
            .unwrap_or_else(|_| clip_cell_text(coerce_to_string(&Value::Object(object.clone())))),
    }
}

/// `key: value` pairs joined by `"; "`, or `None` past the nesting limit.
fn entries_text(object: &Map<String, Value>, depth: usize) -> Option<String> {
    if depth >= MAX_ENTRY_DEPTH {
        return None;
    }
    let entries: Vec<String> = object
        .iter()
        .map(|(key, value)| format!("{key}: {}", serialize_at_depth(value, depth + 1)))
        .collect();
    Some(entries.join("; "))
}

/// Label of a `{text, value}` choice: non-blank `text`, else non-null `value`.
fn labeled_choice_text(object: &Map<String, Value>) -> Option<String> {
    if !object.contains_key("text") && !object.contains_key("value") {
        return None;
    }
    let text = object
        .get("text")
        .filter(|text| !text.is_null())
        .map(coerce_to_string)
        .filter(|text| !text.trim().is_empty());
    text.or_else(|| {
        object
            .get("value")
            .filter(|value| !value.is_null())
            .map(coerce_to_string)
    })
}

/// Whether a `{text, value}` object collapses to a single label.
pub fn is_labeled_choice(object: &Map<String, Value>) -> bool {
    labeled_choice_text(object).is_some()
}

/// Clip text to [`CELL_TEXT_LIMIT`] characters, marker included.
///
/// ```
/// use survey_transform::serialize::{CELL_TEXT_LIMIT, TRUNCATION_MARKER, clip_cell_text};
///
/// let clipped = clip_cell_text("x".repeat(CELL_TEXT_LIMIT + 1));
/// assert_eq!(clipped.chars().count(), CELL_TEXT_LIMIT);
/// assert!(clipped.ends_with(TRUNCATION_MARKER));
/// ```
pub fn clip_cell_text(text: String) -> String {
    if text.len() <= CELL_TEXT_LIMIT || text.chars().count() <= CELL_TEXT_LIMIT {
        return text;
    }
    let keep = CELL_TEXT_LIMIT - TRUNCATION_MARKER.chars().count();
    let mut clipped: String = text.chars().take(keep).collect();
    clipped.push_str(TRUNCATION_MARKER);
    clipped
}

pub(crate) fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

/// Numbers as people write them: integral values without a fraction.
pub(crate) fn number_text(number: &Number) -> String {
    if let Some(integer) = number.as_i64() {
        return integer.to_string();
    }
    if let Some(integer) = number.as_u64() {
        return integer.to_string();
    }
    match number.as_f64() {
        Some(float) if float == 0.0 => "0".to_string(),
        Some(float) if float.is_finite() && float.fract() == 0.0 && float.abs() < 1e21 => {
            format!("{float:.0}")
        }
        Some(float) => float.to_string(),
        None => number.to_string(),
    }
}

/// Plain string coercion: scalars as text, arrays comma-joined, objects as
/// an opaque placeholder.
pub fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number_text(number),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => coerce_to_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
