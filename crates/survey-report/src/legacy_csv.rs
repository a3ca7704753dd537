//! Legacy CSV export.

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::debug;

use survey_model::{ResponseRecord, SurveyDefinition};
use survey_transform::{legacy_columns, legacy_rows};

use crate::error::Result;

/// Encode responses in the legacy one-column-per-question layout.
///
/// Every field is quoted and every record ends with CRLF.
pub fn write_legacy_csv(
    definition: &SurveyDefinition,
    responses: &[ResponseRecord],
) -> Result<Vec<u8>> {
    let columns = legacy_columns(definition);
    let (headers, rows) = legacy_rows(&columns, responses);

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());
    writer.write_record(&headers)?;
    for row in &rows {
        writer.write_record(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|error| csv::Error::from(error.into_error()))?;

    debug!(
        columns = columns.len(),
        rows = rows.len(),
        bytes = bytes.len(),
        "legacy CSV written"
    );
    Ok(bytes)
}
