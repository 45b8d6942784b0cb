// SPDX-License-Identifier: MIT

//! MeetSync API Server
//!
//! Serves the account lifecycle and event management endpoints, with all
//! persistence and identity delegated to an external Supabase project.

use meetsync_api::{config::Config, db::SupabaseDb, services::StorageService, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting MeetSync API");

    // Clients for the external service (one HTTP pool each)
    let db = SupabaseDb::new(&config.supabase_url, &config.supabase_service_key);
    let storage = StorageService::new(&config.supabase_url, &config.supabase_service_key);
    tracing::info!(url = %config.supabase_url, "External service clients initialized");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        storage,
    });

    // Build router
    let app = meetsync_api::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("meetsync_api=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
