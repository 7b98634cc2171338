//! Main HTTP Gateway Server.
//!
//! Mounts every channel adapter's webhook router next to the health endpoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use axum::{Router, routing::get};
use pricefeed_channels::ChannelAdapter;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument};

use crate::health_api;

/// Application state shared across gateway routes.
#[derive(Clone)]
pub struct GatewayState {
    pub started_at: Instant,
    pub channels: Vec<String>,
}

impl GatewayState {
    pub fn new(channels: Vec<String>) -> Self {
        Self {
            started_at: Instant::now(),
            channels,
        }
    }
}

/// Build the full router: adapter webhooks plus `/api/health`.
pub fn build_router(adapters: &[Arc<dyn ChannelAdapter>]) -> Router {
    let state = GatewayState::new(adapters.iter().map(|a| a.name().to_string()).collect());
    let mut app = Router::new()
        .route("/api/health", get(health_api::get_health))
        .with_state(state);

    for adapter in adapters {
        app = app.merge(adapter.build_router());
    }

    app.layer(TraceLayer::new_for_http())
}

/// Starts the adapters and serves HTTP until ctrl-c.
#[instrument(skip(adapters))]
pub async fn start_server(addr: SocketAddr, adapters: Vec<Arc<dyn ChannelAdapter>>) -> Result<()> {
    for adapter in &adapters {
        if let Err(e) = adapter.start().await {
            error!(channel = adapter.name(), error = %e, "Channel adapter failed to start");
            return Err(e);
        }
    }

    let app = build_router(&adapters);

    info!("Gateway HTTP server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for ctrl-c");
    }
}
