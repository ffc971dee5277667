//! Error types for the dashboard backend.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lead_sync::SyncError;
use table_client::StoreError;
use thiserror::Error;

/// Errors returned by dashboard handlers.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Lead or thread operation failed.
    #[error(transparent)]
    Sync(#[from] SyncError),
}

impl DashboardError {
    fn status(&self) -> StatusCode {
        match self {
            DashboardError::Sync(SyncError::Validation(_)) => StatusCode::BAD_REQUEST,
            DashboardError::Sync(SyncError::MissingConfig(_)) => StatusCode::SERVICE_UNAVAILABLE,
            DashboardError::Sync(SyncError::Store(StoreError::Api { .. })) => {
                StatusCode::BAD_GATEWAY
            }
            DashboardError::Sync(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = %status, "Request failed: {}", message);
        } else {
            tracing::debug!(status = %status, "Request rejected: {}", message);
        }

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for dashboard handlers.
pub type Result<T> = std::result::Result<T, DashboardError>;
