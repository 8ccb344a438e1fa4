use axum::{routing::get, Router};
use sc_core::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

pub mod handlers;
pub mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/scrap", get(handlers::scrap))
        .route("/api/purge", get(handlers::purge))
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Serves until ctrl-c, then closes the manager's storage.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let manager = state.manager.clone();
    let listener = TcpListener::bind(addr).await?;
    info!("🌐 Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown_signal(tokio::signal::ctrl_c()))
        .await?;

    manager.shutdown().await
}

/// Resolves once `signal` fires. If the handler could not be installed the
/// server keeps running until the process is killed.
async fn shutdown_signal<F>(signal: F)
where
    F: std::future::Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("🛑 Shutdown signal received"),
        Err(e) => {
            warn!("⚠️ Could not install ctrl-c handler, graceful shutdown disabled: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

pub mod prelude {
    pub use sc_core::{Error, Result};
    pub use crate::AppState;
}
