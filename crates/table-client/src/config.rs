//! Configuration types for table-client.

use std::fmt;

/// Default API root of the hosted store.
pub const DEFAULT_API_URL: &str = "https://api.airtable.com";

/// Configuration for connecting to the tabular store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// API root (e.g., "https://api.airtable.com").
    pub api_url: String,
}

impl StoreConfig {
    /// Create a new configuration with the given API root.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
        }
    }

    /// Get the collection URL for a table.
    pub fn records_url(&self, table: &TableRef) -> String {
        format!(
            "{}/v0/{}/{}",
            self.api_url.trim_end_matches('/'),
            urlencoding::encode(&table.base_id),
            urlencoding::encode(&table.table)
        )
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

/// A fully resolved table target: credential, base and table.
#[derive(Clone, PartialEq, Eq)]
pub struct TableRef {
    /// Bearer credential.
    pub api_key: String,
    /// Base (database) identifier.
    pub base_id: String,
    /// Table identifier or name.
    pub table: String,
}

impl TableRef {
    /// Create a new table reference.
    pub fn new(
        api_key: impl Into<String>,
        base_id: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_id: base_id.into(),
            table: table.into(),
        }
    }
}

impl fmt::Debug for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableRef")
            .field("api_key", &"<redacted>")
            .field("base_id", &self.base_id)
            .field("table", &self.table)
            .finish()
    }
}
