//! Assignment error types.
//!
//! Heuristic shortfalls (an uncoverable block, an instructor left under
//! quota, an unknown priority name) are output states, not errors. Only a
//! malformed call contract or configuration fails a run.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that can occur while preparing or running an assignment.
#[derive(Debug, Error)]
pub enum AssignError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("toml serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<Vec<ValidationError>> for AssignError {
    fn from(errors: Vec<ValidationError>) -> Self {
        let message = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        AssignError::InvalidInput(message)
    }
}

pub type AssignResult<T> = Result<T, AssignError>;
