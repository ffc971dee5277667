//! Synchronization error types.

use table_client::StoreError;
use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that can occur during lead and comment operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// One or more required settings are absent.
    #[error("missing required configuration: {}", .0.join(", "))]
    MissingConfig(Vec<&'static str>),

    /// Transport failure or non-success response from the store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Input rejected before any request was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The store accepted a create request but returned no record.
    #[error("store did not return created lead")]
    NotCreated,
}

/// Result type for synchronization operations.
pub type Result<T> = std::result::Result<T, SyncError>;
