//! # Sartor API
//!
//! HTTP server for the tailoring workshop backend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Sartor API Server                             │
//! │                                                                         │
//! │  Dashboard / public site ───► HTTP (8080) ───► Handlers ───► SQLite    │
//! │                                                    │                    │
//! │  Paystack webhook ────────────────────────────────►│                    │
//! │                                                    ▼                    │
//! │                                      Paystack / Resend / Hugging Face   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod ai;
mod config;
mod error;
mod gateway;
mod handlers;
mod media;
mod notify;
mod routes;
mod signature;
mod state;
#[cfg(test)]
mod testutil;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::config::ApiConfig;
use crate::state::AppState;
use sartor_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .init();

    info!("Starting Sartor API server...");

    // Load configuration
    let config = ApiConfig::load()?;
    info!(
        port = config.http_port,
        database = %config.database_path,
        email_configured = config.resend_api_key.is_some(),
        image_gen_configured = config.huggingface_api_token.is_some(),
        "Configuration loaded"
    );

    // Connect to database (runs migrations)
    let db = Database::new(DbConfig::new(&config.database_path)).await?;
    info!("Database ready");

    // Create shared state and the route table
    let state = Arc::new(AppState::new(db, config.clone()));
    let app = routes::router(state.clone());

    // Start server
    let addr: SocketAddr = format!("0.0.0.0:{}", config.http_port).parse()?;
    info!(%addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
