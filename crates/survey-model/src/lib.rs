//! Survey export data model.
//!
//! - **element**: normalized survey definition tree
//! - **index**: question identifier to title/order lookup
//! - **response**: stored responses and their flattened form
//! - **sheet**: assembled rows, headers and codebook
//! - **options**: export kinds and flattening strategies

pub mod element;
pub mod error;
pub mod index;
pub mod options;
pub mod response;
pub mod sheet;

pub use element::{Choice, Container, Element, Question, SurveyDefinition};
pub use error::{ModelError, Result};
pub use index::{QuestionIndex, QuestionMeta, UNKNOWN_ORDER};
pub use options::{ExportKind, ExportOptions, FlattenStrategy};
pub use response::{FlatRecord, FlattenedResponse, ResponseRecord, format_timestamp};
pub use sheet::{
    CODEBOOK_HEADERS, CODEBOOK_SHEET_NAME, CodebookEntry, FIXED_COLUMN_COUNT,
    RESPONSE_ID_HEADER, RESPONSES_SHEET_NAME, SUBMITTED_AT_HEADER, Sheet, SheetRow,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_keeps_first_occurrence() {
        let mut index = QuestionIndex::new();
        assert!(index.insert_first("q1", "First"));
        assert!(!index.insert_first("q1", "Second"));
        assert!(index.insert_first("q2", "Other"));
        assert_eq!(index.title_of("q1"), Some("First"));
        assert_eq!(index.order_of("q2"), 1);
        assert_eq!(index.order_of("missing"), UNKNOWN_ORDER);
    }

    #[test]
    fn export_kind_file_parts() {
        assert_eq!(ExportKind::RawWorkbook.file_stem_suffix(), "responses_raw");
        assert_eq!(ExportKind::SummaryReport.extension(), "json");
        assert_eq!(ExportKind::RawWorkbook.flatten_strategy(), FlattenStrategy::Raw);
        assert_eq!(
            ExportKind::Workbook.flatten_strategy(),
            FlattenStrategy::Definition
        );
    }
}
