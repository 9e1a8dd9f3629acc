//! Data models
//!
//! Mirrors the reservation backend's JSON payloads.
//! Coordinates are canvas pixels, top-left anchored.

pub mod availability;
pub mod dining_table;
pub mod layout;
pub mod meal;
pub mod recommendation;
pub mod zone;

// Re-exports
pub use availability::*;
pub use dining_table::*;
pub use layout::*;
pub use meal::*;
pub use recommendation::*;
pub use zone::*;
