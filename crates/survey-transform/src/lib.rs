//! Survey response transformation.
//!
//! This crate turns a survey definition and its stored responses into a flat,
//! labeled table:
//!
//! - **walker**: question identifier to title and definition order
//! - **flatten**: one response's data to `path -> cell text`
//! - **labels**: ordered, unique headers for the union of paths
//! - **sheet**: response rows and codebook
//! - **pipeline**: the four stages run together for one export
//!
//! Alongside the path-based table it provides the legacy one-column-per-question
//! layout (**legacy**) and per-question statistics (**summary**).
//!
//! Every stage is a pure function of its inputs; nothing is cached between
//! exports.

pub mod flatten;
pub mod labels;
pub mod legacy;
pub mod path;
pub mod pipeline;
pub mod serialize;
pub mod sheet;
pub mod summary;
pub mod walker;

pub use flatten::{
    DefinitionFlattener, FlattenError, Flattener, RawFlattener, WithFallback, flatten_responses,
};
pub use labels::{ResolvedColumn, ResolvedColumns, resolve_labels};
pub use legacy::{LegacyColumn, LegacyKey, legacy_columns, legacy_rows};
pub use pipeline::{build_response_sheet, flattener_for};
pub use serialize::serialize_value;
pub use sheet::assemble_sheet;
pub use summary::{QuestionStatistics, SummaryStatistics, summarize_responses};
pub use walker::build_question_index;
