//! Mock record stores for lead synchronization tests.
//!
//! This crate provides in-process implementations of the `RecordStore`
//! trait:
//! - `MemoryStore` - In-memory tables with paging, sorting and a small
//!   formula evaluator
//! - `ScriptedStore` - Replays queued responses in order
//!
//! Both record every request they receive so tests can assert on what
//! would have gone over the wire. For production use, connect a
//! `table_client::TableClient` instead.
//!
//! # Example
//!
//! ```rust
//! use mock_store::{MemoryStore, Record, RecordStore, ListQuery, TableRef};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), table_client::StoreError> {
//!     let store = MemoryStore::new();
//!     store.insert(
//!         "Leads",
//!         Record::new("rec1", "2024-01-01T00:00:00.000Z").with_field("Name", "Acme"),
//!     );
//!
//!     let table = TableRef::new("key", "appTest", "Leads");
//!     let page = store.list_page(&table, &ListQuery::new()).await?;
//!     assert_eq!(page.records.len(), 1);
//!     Ok(())
//! }
//! ```

mod formula;
mod memory;
mod request;
mod scripted;

// Re-export table-client types for convenience
pub use table_client::{
    async_trait, CreateRecords, Fields, ListQuery, Record, RecordPage, RecordStore, StoreError,
    TableRef,
};

pub use memory::MemoryStore;
pub use request::RecordedRequest;
pub use scripted::ScriptedStore;
