//! Route handlers for the dashboard backend.

pub mod comments;
pub mod health;
pub mod leads;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // API endpoints
        .route("/api/leads", get(leads::list_api).post(leads::create_api))
        .route(
            "/api/leads/:id/comments",
            get(comments::thread_api).post(comments::send_api),
        )
        .route("/api/messaging", get(comments::messaging_api))
}
