//! HTTP surface of the mood analysis proxy.

mod error;
mod handlers;
mod routes;
mod state;

pub use error::{ApiError, ErrorBody};
pub use handlers::DONE_MARKER;
pub use routes::router;
pub use state::AppState;

use tokio::net::TcpListener;
use tracing::{info, warn};

/// Serves `state` on `listener` until Ctrl-C.
///
/// # Errors
/// Returns error if the server fails.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Listening");
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
