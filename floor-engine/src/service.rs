//! Backend collaborator used by the floor plan

use crate::error::FloorResult;
use async_trait::async_trait;
use shared::{AvailabilityQuery, AvailabilityResponse, TableInfo, TableLayoutUpdate};

/// Reservation backend as seen by the layout engine.
///
/// Implementations map their transport errors into
/// [`FloorError::Fetch`](crate::FloorError::Fetch) or
/// [`FloorError::Persist`](crate::FloorError::Persist).
#[async_trait]
pub trait FloorService: Send + Sync {
    /// Tables with presentation state for one query
    async fn fetch_availability(&self, query: &AvailabilityQuery) -> FloorResult<AvailabilityResponse>;

    /// Currently persisted table list
    async fn fetch_layout(&self) -> FloorResult<Vec<TableInfo>>;

    /// Persist positions. All-or-nothing.
    async fn save_layout(&self, updates: &[TableLayoutUpdate]) -> FloorResult<()>;
}
