//! Table Recommendation Model

use super::TableInfo;
use serde::{Deserialize, Serialize};

/// A table plus its presentation state for one availability query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRecommendation {
    pub table: TableInfo,
    pub occupied: bool,
    /// Only meaningful when the table is not occupied
    pub recommended: bool,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub reason: String,
    /// Virtual card combining several physical tables (id like "T1+T2")
    #[serde(default)]
    pub merged: bool,
    #[serde(default)]
    pub merged_table_ids: Vec<String>,
}

/// How a card should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayState {
    Available,
    Occupied,
    Recommended,
}

impl TableRecommendation {
    pub fn id(&self) -> &str {
        &self.table.id
    }

    /// Occupied wins over recommended
    pub fn display_state(&self) -> DisplayState {
        if self.occupied {
            DisplayState::Occupied
        } else if self.recommended {
            DisplayState::Recommended
        } else {
            DisplayState::Available
        }
    }
}
