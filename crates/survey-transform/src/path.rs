//! Structural paths into response data.
//!
//! A path joins object keys with `" - "`; array elements add a 1-based
//! `[n]` suffix to their parent segment, e.g. `family[2] - age`.

/// Separator between path segments.
pub const PATH_SEPARATOR: &str = " - ";

/// Path of `key` below `parent`.
pub fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}{PATH_SEPARATOR}{key}")
    }
}

/// Path of the array element at zero-based `position` below `parent`.
pub fn index_path(parent: &str, position: usize) -> String {
    format!("{parent}[{}]", position + 1)
}

pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(PATH_SEPARATOR)
}

/// Remove one trailing `[...]` group from a segment.
///
/// ```
/// use survey_transform::path::strip_index_suffix;
///
/// assert_eq!(strip_index_suffix("panel[3]"), "panel");
/// assert_eq!(strip_index_suffix("panel"), "panel");
/// assert_eq!(strip_index_suffix("panel[]"), "panel[]");
/// ```
pub fn strip_index_suffix(segment: &str) -> &str {
    let Some(body) = segment.strip_suffix(']') else {
        return segment;
    };
    let search_from = body.rfind(']').map_or(0, |close| close + 1);
    match body[search_from..].find('[') {
        Some(offset) if search_from + offset + 1 < body.len() => &segment[..search_from + offset],
        _ => segment,
    }
}

/// Question identifier a path ends in: its last segment without index.
pub fn identifier_of(path: &str) -> &str {
    let last = path.rsplit(PATH_SEPARATOR).next().unwrap_or(path);
    strip_index_suffix(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_from_empty_root() {
        assert_eq!(join_path("", "q1"), "q1");
        assert_eq!(join_path("panel[1]", "x"), "panel[1] - x");
        assert_eq!(index_path("", 0), "[1]");
        assert_eq!(index_path("panel", 1), "panel[2]");
    }

    #[test]
    fn strips_only_the_last_group() {
        assert_eq!(strip_index_suffix("grid[1][2]"), "grid[1]");
        assert_eq!(strip_index_suffix("a[[1]"), "a");
        assert_eq!(strip_index_suffix("[1]"), "");
        assert_eq!(strip_index_suffix("name[row a]"), "name");
    }

    #[test]
    fn identifier_is_last_segment() {
        assert_eq!(identifier_of("family[2] - age"), "age");
        assert_eq!(identifier_of("choices"), "choices");
        assert_eq!(identifier_of("matrix - row[4]"), "row");
        let parts: Vec<_> = segments("a - b[1] - c").collect();
        assert_eq!(parts, vec!["a", "b[1]", "c"]);
    }
}
