use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use super::error::ServerError;
use crate::lifecycle::CycleOutcome;
use crate::protocol::{Message, RequestParams};
use crate::session::{SessionError, SessionManager};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub sessions: usize,
}

#[derive(Debug, Serialize)]
pub struct StartResponse {
    pub session: String,
    pub message: Message,
}

pub(super) async fn health(State(sessions): State<Arc<SessionManager>>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy",
        service: "remote-ui",
        sessions: sessions.len(),
    })
}

pub(super) async fn start_session(
    State(sessions): State<Arc<SessionManager>>,
) -> Result<(StatusCode, Json<StartResponse>), ServerError> {
    let (session, outcome) = blocking(move || sessions.start()).await?;
    Ok((
        StatusCode::CREATED,
        Json(StartResponse {
            session,
            message: outcome.message,
        }),
    ))
}

pub(super) async fn run_cycle(
    State(sessions): State<Arc<SessionManager>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Message>, ServerError> {
    let params: RequestParams = if body.is_empty() {
        RequestParams::new()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ServerError::InvalidRequest(format!("Malformed parameter map: {e}")))?
    };

    let outcome: CycleOutcome = blocking(move || sessions.cycle(&id, &params)).await?;
    Ok(Json(outcome.message))
}

pub(super) async fn end_session(
    State(sessions): State<Arc<SessionManager>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    sessions.end(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Cycles hold a blocking per-session lock, so they run off the async workers.
async fn blocking<T, F>(work: F) -> Result<T, ServerError>
where
    F: FnOnce() -> Result<T, SessionError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ServerError::Internal(format!("Cycle task failed: {e}")))?
        .map_err(ServerError::from)
}
