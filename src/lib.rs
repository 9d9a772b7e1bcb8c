//! Dealership inventory service
//!
//! Read-only inventory API over a realtime record store: sorted, filtered
//! and paginated listings, facet metadata, text search, placeholder
//! recommendations, a syndication CSV feed and lead capture by email.
//!
//! The query engine (`services::inventory_query_engine`) is pure and
//! synchronous; everything around it is I/O glue.

pub mod cache;
pub mod clients;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use std::net::SocketAddr;

use anyhow::Result;
use tokio::signal;
use tracing::{error, info};

use crate::state::AppState;

/// Bind and serve until Ctrl+C or SIGTERM
pub async fn start_server(state: AppState) -> Result<()> {
    let addr: SocketAddr = state.config.server_url().parse()?;
    let app = routes::create_app(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("   GET  /api/v1/inventory");
    info!("   GET  /api/v1/inventory/metadata");
    info!("   GET  /api/v1/inventory/search?q=");
    info!("   GET  /api/v1/inventory/:stocknum");
    info!("   GET  /api/v1/inventory/:stocknum/recommendations");
    info!("   GET  /api/v1/feed.csv");
    info!("   POST /api/v1/interest");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| {
        error!("❌ Error del servidor: {}", e);
        e
    })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ Failed to install Ctrl+C handler: {}", e);
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
                error!("❌ Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal SIGTERM recibida, apagando servidor...");
        },
    }
}
