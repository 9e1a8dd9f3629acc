//! Engine error types

use shared::ModelError;
use thiserror::Error;

/// Failures the floor plan surfaces to its caller.
///
/// None of them leave the engine unusable: the last good layout stays in
/// place and a status message is set.
#[derive(Debug, Error)]
pub enum FloorError {
    /// Availability could not be loaded (network, status or decode failure)
    #[error("Failed to load availability: {0}")]
    Fetch(String),

    /// Layout could not be saved
    #[error("Failed to save layout: {0}")]
    Persist(String),

    /// Query rejected before it was sent
    #[error("Invalid query: {0}")]
    InvalidQuery(#[from] ModelError),
}

/// Result type for floor plan operations
pub type FloorResult<T> = Result<T, FloorError>;
