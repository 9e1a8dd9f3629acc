//! Shared types for the floor plan workspace
//!
//! Wire types exchanged with the reservation backend. Field names follow
//! the backend's camelCase JSON so the same structs serve the engine,
//! the HTTP client and test fixtures.

pub mod error;
pub mod models;

// Re-exports
pub use error::{ModelError, ModelResult};
pub use models::*;
pub use serde::{Deserialize, Serialize};
