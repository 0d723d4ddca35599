//! Thin HTTP surface over the session manager.
//!
//! ```text
//! GET    /health               liveness
//! POST   /sessions             start a session, returns id + first message
//! POST   /sessions/{id}/cycle  parameter map in, message out
//! DELETE /sessions/{id}        end a session
//! ```

mod error;
mod handlers;

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use tokio::net::TcpListener;

use crate::session::SessionManager;

pub use error::ServerError;
pub use handlers::{HealthStatus, StartResponse};

pub fn build_router(sessions: Arc<SessionManager>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/sessions", post(handlers::start_session))
        .route("/sessions/{id}", delete(handlers::end_session))
        .route("/sessions/{id}/cycle", post(handlers::run_cycle))
        .with_state(sessions)
}

/// Serve until ctrl-c or SIGTERM.
pub async fn serve(listener: TcpListener, sessions: Arc<SessionManager>) -> std::io::Result<()> {
    let addr: Option<SocketAddr> = listener.local_addr().ok();
    tracing::info!(addr = ?addr, "Server listening");

    axum::serve(listener, build_router(sessions))
        .with_graceful_shutdown(shutdown_signal())
        .into_future()
        .await?;

    tracing::info!("Shutting down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = sigterm.recv() => {},
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "Cannot install SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
