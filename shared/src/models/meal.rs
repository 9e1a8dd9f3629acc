//! Meal Suggestion Model

use serde::{Deserialize, Serialize};

/// Meal suggestion attached to an availability response.
///
/// Pass-through data; nothing in the workspace interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSuggestion {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub fallback: bool,
}
