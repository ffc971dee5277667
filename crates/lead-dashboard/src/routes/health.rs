//! Liveness and store readiness.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    /// Lead table settings are complete.
    pub store_configured: bool,
    pub messaging_configured: bool,
}

/// Always 200; the flags say which operations can succeed.
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        store_configured: state.config.leads_table().is_ok(),
        messaging_configured: state.config.is_messaging_configured(),
    })
}
