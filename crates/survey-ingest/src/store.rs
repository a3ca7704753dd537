//! Survey store loading and lookup.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use crate::document::SurveyDocument;
use crate::error::{IngestError, Result};

/// All survey documents read from one store file.
#[derive(Debug, Clone, Default)]
pub struct SurveyStore {
    path: PathBuf,
    surveys: Vec<SurveyDocument>,
}

impl SurveyStore {
    /// Load a store file.
    ///
    /// The file may hold an array of documents, an object with a `surveys`
    /// array, or a single document.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(IngestError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_json_str(&text, path)?;
        info!(
            path = %path.display(),
            survey_count = store.surveys.len(),
            "survey store loaded"
        );
        Ok(store)
    }

    /// Parse store content; `path` is only used for error reporting.
    pub fn from_json_str(text: &str, path: &Path) -> Result<Self> {
        let parse_error = |source| IngestError::StoreParse {
            path: path.to_path_buf(),
            source,
        };
        let value: Value = serde_json::from_str(text).map_err(parse_error)?;
        let documents: Vec<SurveyDocument> = match value {
            Value::Array(items) => serde_json::from_value(Value::Array(items)),
            Value::Object(mut object) if object.contains_key("surveys") => {
                serde_json::from_value(object.remove("surveys").unwrap_or_default())
            }
            other => serde_json::from_value::<SurveyDocument>(other).map(|document| vec![document]),
        }
        .map_err(parse_error)?;
        Self::from_documents(documents, path)
    }

    /// Build a store from documents already in memory.
    pub fn from_documents(surveys: Vec<SurveyDocument>, path: &Path) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for survey in &surveys {
            if !seen.insert(survey.id.as_str()) {
                return Err(IngestError::DuplicateSurvey {
                    id: survey.id.clone(),
                    path: path.to_path_buf(),
                });
            }
        }
        debug!(survey_count = surveys.len(), "survey documents validated");
        Ok(Self {
            path: path.to_path_buf(),
            surveys,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn find(&self, id: &str) -> Option<&SurveyDocument> {
        self.surveys.iter().find(|survey| survey.id == id)
    }

    pub fn surveys(&self) -> &[SurveyDocument] {
        &self.surveys
    }

    /// Surveys ordered by creation time, newest first; undated ones last.
    pub fn newest_first(&self) -> Vec<&SurveyDocument> {
        let mut surveys: Vec<_> = self.surveys.iter().collect();
        surveys.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        surveys
    }

    pub fn len(&self) -> usize {
        self.surveys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surveys.is_empty()
    }
}
