//! weindampfer-api server entry point.
//!
//! Starts the Axum HTTP server for the reservation REST API.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use weindampfer_api::api;
use weindampfer_api::app_state::AppState;
use weindampfer_api::config::AppConfig;
use weindampfer_api::mailer::Mailer;
use weindampfer_api::persistence::PgStore;
use weindampfer_api::service::{EventService, ReservationService};
use weindampfer_api::storage::InvoiceStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting weindampfer-api");

    // Connect to PostgreSQL and run migrations
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!().run(&pool).await?;

    // Build collaborators
    let store = PgStore::new(pool);
    let mailer = Mailer::from_config(&config);
    let invoices = InvoiceStore::new(config.invoice_dir.clone());

    // Build service layer
    let events = Arc::new(EventService::new(store.clone()));
    let reservations = Arc::new(ReservationService::new(
        store,
        mailer,
        invoices,
        config.public_url.clone(),
    ));

    let app_state = AppState {
        events,
        reservations,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
