use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid survey definition JSON: {0}")]
    InvalidDefinition(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
