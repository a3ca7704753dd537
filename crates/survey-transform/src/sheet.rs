//! Sheet assembly from flattened responses.

use std::collections::BTreeSet;

use tracing::debug;

use survey_model::{
    CodebookEntry, FlattenedResponse, QuestionIndex, RESPONSE_ID_HEADER, SUBMITTED_AT_HEADER,
    Sheet, SheetRow,
};

use crate::labels::resolve_labels;

/// Build the response table and codebook for a set of flattened responses.
///
/// Columns are the union of all paths; a response without a value for a
/// path gets an empty cell. Generated labels never repeat the fixed id and
/// timestamp headers. The codebook describes the generated columns only.
pub fn assemble_sheet(responses: &[FlattenedResponse], index: &QuestionIndex) -> Sheet {
    let paths: BTreeSet<String> = responses
        .iter()
        .flat_map(|response| response.values.keys().cloned())
        .collect();
    let columns = resolve_labels(&paths, &[RESPONSE_ID_HEADER, SUBMITTED_AT_HEADER], index);

    let mut headers = vec![RESPONSE_ID_HEADER.to_string(), SUBMITTED_AT_HEADER.to_string()];
    headers.extend(columns.labels().map(str::to_string));

    let rows = responses
        .iter()
        .map(|response| {
            let mut cells = Vec::with_capacity(headers.len());
            cells.push(response.response_id.clone());
            cells.push(response.submitted_at_text());
            cells.extend(
                columns
                    .paths()
                    .map(|path| response.values.get(path).cloned().unwrap_or_default()),
            );
            SheetRow { cells }
        })
        .collect();

    let codebook = columns
        .iter()
        .map(|column| CodebookEntry {
            header: column.label.clone(),
            path: column.path.clone(),
            identifier: column.identifier.clone(),
            title: column.title.clone().unwrap_or_default(),
        })
        .collect();

    debug!(
        column_count = headers.len(),
        row_count = responses.len(),
        "sheet assembled"
    );
    Sheet {
        headers,
        rows,
        codebook,
    }
}
