//! HTTP entrypoint.
//!
//! Every request path is treated as an unwrap request against the host named
//! by `X-Forwarded-Host` (or `Host`), so the service can sit behind a proxy
//! that answers for many shortener domains. One reserved path is served
//! directly:
//! - `/_unwrapper/healthz` - liveness and registry size
//!
//! Responses are JSON.

mod handlers;
mod types;

use axum::routing::get;
use axum::Router;
use log::info;
use tokio::net::TcpListener;

use crate::config::SERVICE_PATH_PREFIX;
use handlers::{health_handler, unwrap_handler};
pub use types::{AppState, ErrorBody, HealthResponse, UnwrapResponse};

/// Builds the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            &format!("{}/healthz", SERVICE_PATH_PREFIX),
            get(health_handler),
        )
        .fallback(unwrap_handler)
        .with_state(state)
}

/// Binds `addr` and serves until Ctrl-C.
pub async fn start_server(addr: &str, state: AppState) -> Result<(), anyhow::Error> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind unwrapper service to {}: {}", addr, e))?;

    info!("Unwrapper service listening on http://{}/", addr);
    serve(listener, state).await
}

/// Serves on an already bound listener until Ctrl-C.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), anyhow::Error> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Unwrapper service error: {}", e))?;

    info!("Unwrapper service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler, serve until the process is killed
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, finishing in-flight requests");
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::unwrap::Registry;

    #[tokio::test]
    async fn test_start_server_reports_bind_failure() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = taken.local_addr().unwrap().to_string();
        let state = AppState::new(Arc::new(Registry::default()), 10);

        let err = start_server(&addr, state).await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Failed to bind unwrapper service"));
        assert!(msg.contains(&addr));
    }
}
