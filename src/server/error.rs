//! Error types and JSON error responses for the HTTP surface.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::lifecycle::CycleError;
use crate::session::SessionError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Session '{0}' not found")]
    SessionNotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Session limit of {max} reached")]
    SessionLimit { max: usize },

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SessionError> for ServerError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotFound(id) => ServerError::SessionNotFound(id),
            SessionError::LimitReached { max } => ServerError::SessionLimit { max },
            SessionError::Cycle(err @ CycleError::DisplayMismatch { .. }) => {
                ServerError::InvalidRequest(err.to_string())
            }
            SessionError::Cycle(err @ CycleError::Protocol(_)) => {
                ServerError::Protocol(err.to_string())
            }
            SessionError::Setup(err) => ServerError::Internal(err.to_string()),
        }
    }
}

impl ServerError {
    /// Map error variant to HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::SessionLimit { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ServerError::Protocol(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Error type string for JSON responses
    pub fn error_type(&self) -> &'static str {
        match self {
            ServerError::SessionNotFound(_) => "session_not_found",
            ServerError::InvalidRequest(_) => "invalid_request",
            ServerError::SessionLimit { .. } => "session_limit",
            ServerError::Protocol(_) => "protocol_error",
            ServerError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }
        let body = serde_json::json!({
            "error": {
                "type": self.error_type(),
                "message": self.to_string(),
            }
        });
        (status, Json(body)).into_response()
    }
}
