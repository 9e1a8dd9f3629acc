//! [`FloorService`] backed by the HTTP API

use crate::HttpClient;
use async_trait::async_trait;
use floor_engine::{FloorError, FloorResult, FloorService};
use shared::{AvailabilityQuery, AvailabilityResponse, TableInfo, TableLayoutUpdate};
use tracing::info;

#[async_trait]
impl FloorService for HttpClient {
    async fn fetch_availability(&self, query: &AvailabilityQuery) -> FloorResult<AvailabilityResponse> {
        self.availability(query)
            .await
            .map_err(|e| FloorError::Fetch(e.to_string()))
    }

    async fn fetch_layout(&self) -> FloorResult<Vec<TableInfo>> {
        self.layout().await.map_err(|e| FloorError::Fetch(e.to_string()))
    }

    async fn save_layout(&self, updates: &[TableLayoutUpdate]) -> FloorResult<()> {
        let tables = self
            .update_layout(updates)
            .await
            .map_err(|e| FloorError::Persist(e.to_string()))?;
        info!(sent = updates.len(), stored = tables.len(), "Layout accepted by backend");
        Ok(())
    }
}
