//! Application state shared across handlers.

use std::sync::Arc;

use lead_sync::SyncConfig;
use table_client::RecordStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Remote record store.
    pub store: Arc<dyn RecordStore>,
    /// Store settings, read once at startup.
    pub config: Arc<SyncConfig>,
}

impl AppState {
    /// Create new application state.
    pub fn new(store: Arc<dyn RecordStore>, config: SyncConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
