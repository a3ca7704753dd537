//! Survey store ingestion.
//!
//! Reads stored survey documents from JSON, looks surveys up by id and
//! converts them into the definitions and response records the export
//! pipeline consumes.

pub mod document;
pub mod error;
pub mod store;

pub use document::{StoredResponse, SurveyDocument};
pub use error::{IngestError, Result};
pub use store::SurveyStore;
