//! Model validation errors

use thiserror::Error;

/// Errors raised while validating wire models before they are sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Party size must be a positive integer
    #[error("Invalid party size: {0}")]
    InvalidPartySize(i32),

    /// Table identifier is empty
    #[error("Table id must not be empty")]
    EmptyTableId,
}

/// Result type for model validation
pub type ModelResult<T> = Result<T, ModelError>;
