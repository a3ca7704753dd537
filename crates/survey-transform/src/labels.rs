//! Column labels for flattened paths.
//!
//! Every path found in any response becomes one column. Its label is the
//! path followed by the title of the question the path ends in, columns are
//! ordered by the definition order of each path segment, and repeated
//! labels get a ` (N)` suffix.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use survey_model::{QuestionIndex, UNKNOWN_ORDER};

use crate::path::{PATH_SEPARATOR, identifier_of, segments, strip_index_suffix};

/// One output column derived from a flattened path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumn {
    pub path: String,
    /// Unique header text.
    pub label: String,
    /// Question identifier the path ends in.
    pub identifier: String,
    /// Title of that question, when the definition knows it.
    pub title: Option<String>,
}

/// Columns in output order with a path to label lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedColumns {
    columns: Vec<ResolvedColumn>,
    by_path: BTreeMap<String, usize>,
}

impl ResolvedColumns {
    pub fn iter(&self) -> std::slice::Iter<'_, ResolvedColumn> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Header assigned to a path.
    pub fn label(&self, path: &str) -> Option<&str> {
        self.by_path
            .get(path)
            .map(|&position| self.columns[position].label.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.label.as_str())
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.path.as_str())
    }
}

impl<'a> IntoIterator for &'a ResolvedColumns {
    type Item = &'a ResolvedColumn;
    type IntoIter = std::slice::Iter<'a, ResolvedColumn>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Label before deduplication: `path - title` when the identifier is known.
///
/// ```
/// use survey_model::QuestionIndex;
/// use survey_transform::labels::base_label;
///
/// let mut index = QuestionIndex::new();
/// index.insert_first("age", "Age in years");
/// assert_eq!(base_label("family[2] - age", &index), "family[2] - age - Age in years");
/// assert_eq!(base_label("stray", &index), "stray");
/// ```
pub fn base_label(path: &str, index: &QuestionIndex) -> String {
    match index.title_of(identifier_of(path)) {
        Some(title) => format!("{path}{PATH_SEPARATOR}{title}"),
        None => path.to_string(),
    }
}

fn order_key(path: &str, index: &QuestionIndex) -> Vec<usize> {
    segments(path)
        .map(|segment| index.order_of(strip_index_suffix(segment)))
        .collect()
}

fn compare_keys(a: &[usize], b: &[usize]) -> Ordering {
    let length = a.len().max(b.len());
    (0..length)
        .map(|position| {
            let left = a.get(position).copied().unwrap_or(UNKNOWN_ORDER);
            let right = b.get(position).copied().unwrap_or(UNKNOWN_ORDER);
            left.cmp(&right)
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Column order of two paths: segment orders first, then the paths themselves.
pub fn compare_paths(a: &str, b: &str, index: &QuestionIndex) -> Ordering {
    compare_keys(&order_key(a, index), &order_key(b, index)).then_with(|| a.cmp(b))
}

/// Sort paths into column order.
pub fn sort_paths<'a>(paths: impl IntoIterator<Item = &'a str>, index: &QuestionIndex) -> Vec<&'a str> {
    let mut keyed: Vec<(Vec<usize>, &str)> = paths
        .into_iter()
        .map(|path| (order_key(path, index), path))
        .collect();
    keyed.sort_by(|(a_key, a), (b_key, b)| compare_keys(a_key, b_key).then_with(|| a.cmp(b)));
    keyed.into_iter().map(|(_, path)| path).collect()
}

/// Assign ordered, unique labels to every path.
///
/// `reserved` holds headers already placed ahead of the generated columns;
/// a path whose label matches one of them is suffixed like any collision.
pub fn resolve_labels(
    paths: &BTreeSet<String>,
    reserved: &[&str],
    index: &QuestionIndex,
) -> ResolvedColumns {
    let mut assigned: BTreeSet<String> = reserved.iter().map(|label| label.to_string()).collect();
    let mut next_suffix: BTreeMap<String, usize> = BTreeMap::new();
    let mut resolved = ResolvedColumns::default();

    for path in sort_paths(paths.iter().map(String::as_str), index) {
        let base = base_label(path, index);
        let label = if assigned.contains(&base) {
            let mut suffix = next_suffix.get(&base).copied().unwrap_or(2);
            let mut candidate = format!("{base} ({suffix})");
            while assigned.contains(&candidate) {
                suffix += 1;
                candidate = format!("{base} ({suffix})");
            }
            next_suffix.insert(base, suffix + 1);
            candidate
        } else {
            base
        };
        assigned.insert(label.clone());

        let identifier = identifier_of(path);
        resolved
            .by_path
            .insert(path.to_string(), resolved.columns.len());
        resolved.columns.push(ResolvedColumn {
            path: path.to_string(),
            label,
            identifier: identifier.to_string(),
            title: index.title_of(identifier).map(str::to_string),
        });
    }

    debug!(column_count = resolved.len(), "column labels resolved");
    resolved
}
