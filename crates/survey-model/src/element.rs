//! Survey definition tree.
//!
//! Stored definitions are loosely shaped JSON: every field is optional and
//! container nodes are only recognizable by their child collections. The
//! adapter in this module normalizes that JSON once into a tagged tree so
//! the traversals downstream never have to probe for missing fields.

use serde_json::{Map, Value};

use crate::error::Result;

/// A normalized survey definition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurveyDefinition {
    /// Top-level elements: pages when the definition is paged, otherwise
    /// the bare element list.
    pub elements: Vec<Element>,
}

/// One node of the definition tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A question that holds an answer.
    Question(Question),
    /// A page, panel or dynamic panel holding other elements.
    Container(Container),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Question {
    pub name: Option<String>,
    /// Display title (`title`, then `titleExpanded`); `None` when neither is set.
    pub title: Option<String>,
    /// SurveyJS element type such as `text`, `checkbox` or `matrix`.
    pub kind: Option<String>,
    pub choices: Vec<Choice>,
    /// Matrix row labels.
    pub rows: Vec<Choice>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Container {
    pub name: Option<String>,
    pub title: Option<String>,
    pub kind: Option<String>,
    /// `elements` followed by `templateElements`.
    pub children: Vec<Element>,
    /// True for dynamic panels, whose answers are arrays of panel objects.
    pub repeating: bool,
}

/// A `{value, text}` pair used by choice lists and matrix rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub value: Value,
    pub text: String,
}

impl SurveyDefinition {
    /// Normalize a definition from its stored JSON form.
    ///
    /// Anything that is not an object, or has neither `pages` nor
    /// `elements`, yields an empty definition.
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };
        if let Some(pages) = object.get("pages").and_then(Value::as_array) {
            let elements = pages
                .iter()
                .filter_map(Value::as_object)
                .map(|page| Element::Container(Container::from_object(page)))
                .collect();
            return Self { elements };
        }
        Self {
            elements: elements_of(object, "elements"),
        }
    }

    /// Parse and normalize a definition stored as JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&value))
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate over all elements in depth-first pre-order.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder {
            stack: self.elements.iter().rev().collect(),
        }
    }

    /// Iterate over every named question in the tree.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.iter().filter_map(|element| match element {
            Element::Question(question) if question.name.is_some() => Some(question),
            _ => None,
        })
    }
}

/// Depth-first pre-order traversal over a definition tree.
pub struct PreOrder<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children().iter().rev());
        Some(element)
    }
}

impl Element {
    fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let has_children = ["elements", "templateElements"]
            .iter()
            .any(|key| object.get(*key).is_some_and(Value::is_array));
        if has_children {
            Some(Self::Container(Container::from_object(object)))
        } else {
            Some(Self::Question(Question::from_object(object)))
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Question(question) => question.name.as_deref(),
            Self::Container(container) => container.name.as_deref(),
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Question(question) => question.title.as_deref(),
            Self::Container(container) => container.title.as_deref(),
        }
    }

    /// The title shown to people: the display title, else the name.
    pub fn display_title(&self) -> Option<&str> {
        self.title().or_else(|| self.name())
    }

    pub fn children(&self) -> &[Element] {
        match self {
            Self::Question(_) => &[],
            Self::Container(container) => &container.children,
        }
    }
}

impl Container {
    fn from_object(object: &Map<String, Value>) -> Self {
        let mut children = elements_of(object, "elements");
        children.extend(elements_of(object, "templateElements"));
        Self {
            name: name_of(object),
            title: title_of(object),
            kind: string_field(object, "type"),
            children,
            repeating: object.get("templateElements").is_some_and(Value::is_array),
        }
    }
}

impl Question {
    fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            name: name_of(object),
            title: title_of(object),
            kind: string_field(object, "type"),
            choices: choices_of(object, "choices"),
            rows: choices_of(object, "rows"),
        }
    }

    /// Display text for a stored answer value, when it matches a choice.
    pub fn choice_text(&self, value: &Value) -> Option<&str> {
        self.choices
            .iter()
            .find(|choice| choice.value == *value)
            .map(|choice| choice.text.as_str())
    }

    /// A single-choice matrix whose answers are keyed by row value.
    pub fn is_matrix(&self) -> bool {
        self.kind.as_deref() == Some("matrix") && !self.rows.is_empty()
    }
}

impl Choice {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null | Value::Array(_) => None,
            Value::Object(object) => {
                let value = object.get("value").cloned().unwrap_or(Value::Null);
                let text = object
                    .get("text")
                    .and_then(localized_text)
                    .unwrap_or_else(|| plain_text(&value));
                Some(Self { value, text })
            }
            scalar => Some(Self {
                value: scalar.clone(),
                text: plain_text(scalar),
            }),
        }
    }

    /// The stored value rendered as text (used for matrix row keys).
    pub fn value_text(&self) -> String {
        plain_text(&self.value)
    }
}

fn elements_of(object: &Map<String, Value>, key: &str) -> Vec<Element> {
    object
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Element::from_value).collect())
        .unwrap_or_default()
}

fn choices_of(object: &Map<String, Value>, key: &str) -> Vec<Choice> {
    object
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Choice::from_value).collect())
        .unwrap_or_default()
}

fn name_of(object: &Map<String, Value>) -> Option<String> {
    match object.get("name")? {
        Value::String(name) if !name.is_empty() => Some(name.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn title_of(object: &Map<String, Value>) -> Option<String> {
    object
        .get("title")
        .and_then(localized_text)
        .or_else(|| object.get("titleExpanded").and_then(localized_text))
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Resolve a possibly localized string (`"text"` or `{"default": "text", ...}`).
fn localized_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Object(locales) => locales
            .get("default")
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .or_else(|| {
                locales
                    .values()
                    .filter_map(Value::as_str)
                    .find(|text| !text.is_empty())
            })
            .map(str::to_string),
        _ => None,
    }
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
