//! Table Layout Model

use crate::error::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};

/// One persisted table position (`PUT /api/admin/layout` body element)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLayoutUpdate {
    pub id: String,
    pub x: i32,
    pub y: i32,
}

impl TableLayoutUpdate {
    /// Build an update from canvas coordinates, rounding to whole pixels
    pub fn from_position(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x: x.round() as i32,
            y: y.round() as i32,
        }
    }

    /// Reject updates the backend cannot match to a table
    pub fn validate(&self) -> ModelResult<()> {
        if self.id.trim().is_empty() {
            return Err(ModelError::EmptyTableId);
        }
        Ok(())
    }
}
