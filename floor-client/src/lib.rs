//! Floor Client - HTTP client for the reservation backend
//!
//! Provides network-based calls to the availability and layout API and
//! implements [`floor_engine::FloorService`] on top of them.

pub mod config;
pub mod error;
pub mod http;
mod service;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::{AvailabilityQuery, AvailabilityResponse, TableInfo, TableLayoutUpdate};
