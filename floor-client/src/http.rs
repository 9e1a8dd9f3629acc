//! HTTP client for network-based API calls

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::{AvailabilityQuery, AvailabilityResponse, TableInfo, TableLayoutUpdate};
use tracing::{debug, instrument};

const AVAILABILITY_PATH: &str = "api/availability";
const LAYOUT_PATH: &str = "api/admin/layout";

/// HTTP client for the reservation backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Make a GET request with query parameters
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        let request = self.authorize(self.client.get(self.url(path)).query(query));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorize(self.client.get(self.url(path)));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> ClientResult<T> {
        let request = self.authorize(self.client.put(self.url(path)).json(body));
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                StatusCode::FORBIDDEN => Err(ClientError::Forbidden(text)),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(text)),
                _ => Err(ClientError::Server {
                    status: status.as_u16(),
                    message: text,
                }),
            };
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(Into::into)
    }

    // ========== Floor API ==========

    /// Tables with presentation state for one query
    #[instrument(skip(self, query), fields(party_size = query.party_size, zone = ?query.zone))]
    pub async fn availability(&self, query: &AvailabilityQuery) -> ClientResult<AvailabilityResponse> {
        query
            .validate()
            .map_err(|e| ClientError::Validation(e.to_string()))?;
        let response: AvailabilityResponse = self.get_with_query(AVAILABILITY_PATH, query).await?;
        debug!(tables = response.tables.len(), "Availability received");
        Ok(response)
    }

    /// Currently persisted table layout
    #[instrument(skip(self))]
    pub async fn layout(&self) -> ClientResult<Vec<TableInfo>> {
        self.get(LAYOUT_PATH).await
    }

    /// Persist table positions, returning the backend's updated layout
    #[instrument(skip(self, updates), fields(tables = updates.len()))]
    pub async fn update_layout(&self, updates: &[TableLayoutUpdate]) -> ClientResult<Vec<TableInfo>> {
        for update in updates {
            update
                .validate()
                .map_err(|e| ClientError::Validation(e.to_string()))?;
        }
        self.put(LAYOUT_PATH, updates).await
    }
}
