//! Lead routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use lead_sync::{Lead, NewLeadInput};

use crate::error::Result;
use crate::state::AppState;

/// List all leads, most recently updated first.
pub async fn list_api(State(state): State<AppState>) -> Result<Json<Vec<Lead>>> {
    let leads = lead_sync::list_leads(state.store.as_ref(), &state.config).await?;
    Ok(Json(leads))
}

/// Create a lead from form input.
pub async fn create_api(
    State(state): State<AppState>,
    Json(input): Json<NewLeadInput>,
) -> Result<(StatusCode, Json<Lead>)> {
    let input = input.trimmed();
    let lead = lead_sync::create_lead(state.store.as_ref(), &state.config, &input).await?;
    Ok((StatusCode::CREATED, Json(lead)))
}
