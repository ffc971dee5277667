//! JSON backend for the affiliate lead dashboard.
//!
//! Lists and creates leads and carries each lead's comment thread,
//! backed by the hosted table store configured through `AIRTABLE_*`.

mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use lead_sync::SyncConfig;
use table_client::TableClient;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    let sync = SyncConfig::from_env();
    info!(addr = %config.addr, "Starting lead dashboard");

    // Missing store settings surface per request; the server still starts
    if let Err(e) = sync.leads_table() {
        warn!("Lead store is not usable: {}", e);
    }
    if !sync.is_messaging_configured() {
        info!("Comment threads disabled");
    }

    let client = TableClient::new(sync.store_config())?;

    // Build application state
    let state = AppState::new(Arc::new(client), sync);

    // Build router
    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    info!(addr = %config.addr, "Lead dashboard listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
