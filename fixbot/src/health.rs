//! Liveness endpoint for the hosting platform. Shares no state with the processors.

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tracing::info;

async fn ok() -> &'static str {
    "ok"
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(ok))
        .route("/health", get(ok))
}

/// Serves the liveness routes on an already bound listener until the server fails.
pub async fn serve(listener: TcpListener) -> Result<()> {
    let addr = listener.local_addr()?;
    info!(%addr, "step: healthcheck listening");
    axum::serve(listener, router())
        .await
        .context("healthcheck server failed")
}

/// Binds `0.0.0.0:{port}`.
pub async fn bind(port: u16) -> Result<TcpListener> {
    let bind_addr = format!("0.0.0.0:{port}");
    TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind healthcheck at {bind_addr}"))
}
