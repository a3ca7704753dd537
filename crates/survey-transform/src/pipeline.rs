//! End-to-end sheet construction for one export request.

use tracing::{info, info_span};

use survey_model::{FlattenStrategy, ResponseRecord, Sheet, SurveyDefinition};

use crate::flatten::{DefinitionFlattener, Flattener, RawFlattener, flatten_responses};
use crate::sheet::assemble_sheet;
use crate::walker::build_question_index;

/// The flattener used for a strategy.
///
/// The definition strategy falls back to raw flattening per response.
pub fn flattener_for<'a>(
    strategy: FlattenStrategy,
    definition: &'a SurveyDefinition,
) -> Box<dyn Flattener + 'a> {
    match strategy {
        FlattenStrategy::Definition => {
            Box::new(DefinitionFlattener::new(definition).with_fallback(RawFlattener))
        }
        FlattenStrategy::Raw => Box::new(RawFlattener),
    }
}

/// Run walker, flattener, label resolver and assembler over one survey.
pub fn build_response_sheet(
    definition: &SurveyDefinition,
    responses: &[ResponseRecord],
    strategy: FlattenStrategy,
) -> Sheet {
    let span = info_span!(
        "build_response_sheet",
        ?strategy,
        response_count = responses.len()
    );
    let _guard = span.enter();

    let index = build_question_index(definition);
    let flattener = flattener_for(strategy, definition);
    let flattened = flatten_responses(responses, flattener.as_ref());
    let sheet = assemble_sheet(&flattened, &index);

    info!(
        strategy = flattener.name(),
        indexed_questions = index.len(),
        column_count = sheet.headers.len(),
        row_count = sheet.row_count(),
        "response sheet built"
    );
    sheet
}
