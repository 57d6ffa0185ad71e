//! In-process stand-in for the alerting REST API's condition endpoints.

pub mod config;
pub mod rest;
pub mod store;

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Binds `addr`, serves the API in a background task, and returns the bound
/// address with the task handle.
pub async fn spawn(
    addr: SocketAddr,
    state: rest::AppState,
) -> std::io::Result<(SocketAddr, JoinHandle<()>)> {
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    let app = rest::router(state);

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "mock API server failed");
        }
    });

    tracing::info!(addr = %local, "mock alerting API listening");
    Ok((local, handle))
}
