//! Application entry point and server initialization
//!
//! This module contains the main function that:
//! - Loads environment configuration
//! - Opens the database and restores every store
//! - Starts the HTTP server with graceful shutdown support

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use storefront::config::Config;
use storefront::context::{AppContext, AppState};
use storefront::database::init_db;
use storefront::route::create_app;

#[tokio::main]
async fn main() {
    // Loads .env before the filter reads RUST_LOG
    let config = Config::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront=debug,tower_http=debug".into()),
        )
        .init();

    // Without a database the stores still run, just without persistence
    let ctx = match init_db(&config.database_url) {
        Ok(db) => AppContext::open(Arc::new(db), config.admin.clone()),
        Err(e) => {
            error!(path = %config.database_url, error = %e, "Failed to open database, running in memory only");
            AppContext::in_memory(config.admin.clone())
        }
    };
    let state = AppState::new(ctx);

    let app = create_app(state).layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "Failed to bind");
            return;
        }
    };

    info!(port = config.port, database = %config.database_url, "Storefront running");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "Server error");
    }
}

/// Resolves on SIGINT (Ctrl+C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server");
}
