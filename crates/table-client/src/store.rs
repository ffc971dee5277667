//! The RecordStore trait definition.

use async_trait::async_trait;

use crate::config::TableRef;
use crate::error::StoreError;
use crate::types::{CreateRecords, ListQuery, Record, RecordPage};

/// Access to a remote record store.
///
/// [`TableClient`](crate::TableClient) implements this over HTTP; tests use
/// in-process implementations. This trait is object-safe and can be used
/// as `&dyn RecordStore`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch a single page of records.
    ///
    /// The returned page carries an `offset` when more records follow.
    async fn list_page(
        &self,
        table: &TableRef,
        query: &ListQuery,
    ) -> Result<RecordPage, StoreError>;

    /// Create records and return them as stored.
    async fn create_records(
        &self,
        table: &TableRef,
        request: CreateRecords,
    ) -> Result<Vec<Record>, StoreError>;
}
