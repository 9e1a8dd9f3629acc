//! Zone Model

use serde::{Deserialize, Serialize};

/// Dining zone (大厅、露台、包厢等)
///
/// Unknown zone names coming from newer backends decode to [`Zone::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Zone {
    Indoor,
    Terrace,
    PrivateRoom,
    #[serde(other)]
    Other,
}

impl Zone {
    /// Wire name, as used in query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Indoor => "INDOOR",
            Self::Terrace => "TERRACE",
            Self::PrivateRoom => "PRIVATE_ROOM",
            Self::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
