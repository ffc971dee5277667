//! HTTP client for the tabular store.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::{StoreConfig, TableRef};
use crate::error::StoreError;
use crate::store::RecordStore;
use crate::types::{CreateRecords, CreatedRecords, ListQuery, Record, RecordPage};

/// Client for the tabular store REST API.
#[derive(Clone)]
pub struct TableClient {
    http: Client,
    config: StoreConfig,
}

impl TableClient {
    /// Create a new client.
    ///
    /// No request timeout is configured; a slow call blocks its caller until
    /// the store or the network gives up.
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        let http = Client::builder().build().map_err(StoreError::Http)?;
        Ok(Self { http, config })
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(http: Client, config: StoreConfig) -> Self {
        Self { http, config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Get the underlying HTTP client.
    pub fn http_client(&self) -> &Client {
        &self.http
    }

    /// Check the status and decode the JSON body, or turn the body into an
    /// API error.
    async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::from_response(status.as_u16(), &body));
        }

        let body = response.bytes().await.map_err(StoreError::Http)?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl RecordStore for TableClient {
    async fn list_page(
        &self,
        table: &TableRef,
        query: &ListQuery,
    ) -> Result<RecordPage, StoreError> {
        let url = self.config.records_url(table);
        debug!(table = %table.table, offset = ?query.offset, "List records");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&table.api_key)
            .query(&query.to_query_pairs())
            .send()
            .await
            .map_err(StoreError::Http)?;

        Self::parse_response(response).await
    }

    async fn create_records(
        &self,
        table: &TableRef,
        request: CreateRecords,
    ) -> Result<Vec<Record>, StoreError> {
        let url = self.config.records_url(table);
        debug!(
            table = %table.table,
            count = request.records.len(),
            typecast = request.typecast,
            "Create records"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&table.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(StoreError::Http)?;

        let created: CreatedRecords = Self::parse_response(response).await?;
        Ok(created.records)
    }
}

impl std::fmt::Debug for TableClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableClient")
            .field("config", &self.config)
            .finish()
    }
}
