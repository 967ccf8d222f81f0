use crate::handlers::{self, ProxyState};
use axum::{routing::get, Router};
use std::future::Future;
use tracing::{error, info};

pub fn router(state: ProxyState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::health))
        .fallback(handlers::forward)
        .with_state(state)
}

/// Resolves once `signal` fires. If the listener itself fails, the server
/// keeps running instead of treating the error as a shutdown request.
pub async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("shutting down"),
        Err(err) => {
            error!("failed to listen for shutdown signal: {err}");
            std::future::pending::<()>().await;
        }
    }
}
