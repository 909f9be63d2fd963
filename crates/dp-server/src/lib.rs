//! Doppel HTTP API server (Axum).
//!
//! Provides REST endpoints for near-duplicate detection over a submitted
//! corpus: health/status, detection with per-method results, and a rendered
//! markdown report.

pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use dp_core::DoppelConfig;
use state::AppState;

/// Build the application router with default state.
pub fn app() -> Router {
    app_with_state(AppState::default())
}

/// Build the application router with a custom state.
pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::detect_routes())
        .with_state(state)
}

/// Bind the configured address and serve until shutdown.
pub async fn serve(config: DoppelConfig) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("doppel server listening on {addr}");
    axum::serve(listener, app_with_state(state)).await?;
    Ok(())
}

#[cfg(test)]
mod tests;
