use std::collections::BTreeMap;

/// Order assigned to identifiers the definition does not know about.
pub const UNKNOWN_ORDER: usize = 999_999;

/// Title and first-occurrence position of one question identifier.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct QuestionMeta {
    pub title: String,
    pub order: usize,
}

/// Question identifier to title/order lookup built from a definition.
///
/// Orders are dense and start at 0; the next order is always the number of
/// entries already indexed.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct QuestionIndex {
    entries: BTreeMap<String, QuestionMeta>,
}

impl QuestionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an identifier unless it is already indexed.
    ///
    /// Returns `true` when the identifier was new.
    pub fn insert_first(&mut self, name: &str, title: &str) -> bool {
        if self.entries.contains_key(name) {
            return false;
        }
        let order = self.entries.len();
        self.entries.insert(
            name.to_string(),
            QuestionMeta {
                title: title.to_string(),
                order,
            },
        );
        true
    }

    pub fn get(&self, name: &str) -> Option<&QuestionMeta> {
        self.entries.get(name)
    }

    pub fn title_of(&self, name: &str) -> Option<&str> {
        self.entries
            .get(name)
            .map(|meta| meta.title.as_str())
            .filter(|title| !title.is_empty())
    }

    pub fn order_of(&self, name: &str) -> usize {
        self.entries
            .get(name)
            .map_or(UNKNOWN_ORDER, |meta| meta.order)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in definition order.
    pub fn in_order(&self) -> Vec<(&str, &QuestionMeta)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(name, meta)| (name.as_str(), meta))
            .collect();
        entries.sort_by_key(|(_, meta)| meta.order);
        entries
    }
}
