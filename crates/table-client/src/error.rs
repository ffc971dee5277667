//! Error types for table-client.

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when talking to the tabular store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed (network, DNS, TLS, body decoding).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The store answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },
}

impl StoreError {
    /// Build an API error from a response status and raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        StoreError::Api {
            status,
            message: api_error_message(status, body),
        }
    }

    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::Api { status, .. } => Some(*status),
            StoreError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Error body returned by the store.
///
/// The store uses two shapes: `{"error": {"type": .., "message": ..}}` and
/// `{"error": "NOT_FOUND"}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Object {
        #[serde(rename = "type")]
        kind: Option<String>,
        message: Option<String>,
    },
    Code(String),
}

/// Extract a human-readable message from an error response body.
///
/// Falls back to a generic message naming the status when the body carries
/// no usable message.
pub fn api_error_message(status: u16, body: &str) -> String {
    let detail = serde_json::from_str::<ErrorBody>(body).ok().map(|b| b.error);

    let message = match detail {
        Some(ErrorDetail::Object {
            message: Some(message),
            ..
        }) if !message.trim().is_empty() => Some(message),
        Some(ErrorDetail::Object {
            kind: Some(kind), ..
        }) if !kind.trim().is_empty() => Some(kind),
        Some(ErrorDetail::Code(code)) if !code.trim().is_empty() => Some(code),
        _ => None,
    };

    message.unwrap_or_else(|| format!("Request failed with status {}", status))
}
