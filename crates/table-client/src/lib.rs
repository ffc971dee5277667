//! Hosted tabular-database client library.
//!
//! This crate provides a Rust client for a record-oriented REST API where
//! every table row is a generic record (`id`, `createdTime`, `fields`). It
//! supports:
//!
//! - Listing records with sort and formula filters
//! - Following `offset` continuation tokens across pages
//! - Creating records with server-side typecasting
//!
//! The [`RecordStore`] trait is the seam between the HTTP client and the
//! code that consumes records, so tests can swap in an in-process store.
//!
//! # Example
//!
//! ```no_run
//! use table_client::{fetch_all, ListQuery, StoreConfig, TableClient, TableRef};
//!
//! # async fn example() -> Result<(), table_client::StoreError> {
//! let client = TableClient::new(StoreConfig::default())?;
//! let table = TableRef::new("key...", "appXXXXXXXXXXXXXX", "Leads");
//!
//! let query = ListQuery::new().sort_desc("Last Updated");
//! let records = fetch_all(&client, &table, &query).await?;
//! println!("Fetched {} records", records.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod paginate;
pub mod store;
pub mod types;

pub use client::TableClient;
pub use config::{StoreConfig, TableRef};
pub use error::StoreError;
pub use paginate::fetch_all;
pub use store::RecordStore;
pub use types::*;

// Re-export async_trait for store implementations
pub use async_trait::async_trait;
