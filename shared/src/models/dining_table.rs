//! Dining Table Model

use super::Zone;
use serde::{Deserialize, Serialize};

/// Dining table entity (桌台) with its suggested floor position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableInfo {
    pub id: String,
    pub seats: i32,
    pub zone: Zone,
    pub x: i32,
    pub y: i32,
    #[serde(default)]
    pub privacy: bool,
    #[serde(default)]
    pub window: bool,
    #[serde(default)]
    pub accessibility: bool,
    #[serde(default)]
    pub kids_area: bool,
}

/// Independent table feature flags, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableFeature {
    Window,
    Privacy,
    Accessibility,
    KidsArea,
}

impl TableInfo {
    /// Feature flags set on this table, window first
    pub fn features(&self) -> Vec<TableFeature> {
        [
            (self.window, TableFeature::Window),
            (self.privacy, TableFeature::Privacy),
            (self.accessibility, TableFeature::Accessibility),
            (self.kids_area, TableFeature::KidsArea),
        ]
        .into_iter()
        .filter_map(|(set, feature)| set.then_some(feature))
        .collect()
    }
}
