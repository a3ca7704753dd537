//! Export file naming.

use chrono::{DateTime, Utc};

use survey_model::ExportKind;

/// Replace every character outside `[A-Za-z0-9]` with `_`.
///
/// ```
/// use survey_report::sanitize_title;
///
/// assert_eq!(sanitize_title("Customer Feedback 2024!"), "Customer_Feedback_2024_");
/// assert_eq!(sanitize_title("Café"), "Caf_");
/// ```
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '_' })
        .collect()
}

/// `<sanitized title>_<kind suffix>_<YYYY-MM-DD>.<extension>`
pub fn export_filename(title: &str, kind: ExportKind, export_date: &DateTime<Utc>) -> String {
    format!(
        "{}_{}_{}.{}",
        sanitize_title(title),
        kind.file_stem_suffix(),
        export_date.format("%Y-%m-%d"),
        kind.extension()
    )
}
