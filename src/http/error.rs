//! Connection-level error hook.
//!
//! A transport failure noticed while handling a request is logged and
//! answered with a fixed 500 instead of tearing down the task.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    BoxError,
};

/// Body sent for every connection-level failure.
pub const CONNECTION_ERROR_BODY: &str = "Connection Error";

/// The underlying transport failed to establish or complete.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Transport(BoxError),
}

impl From<axum::Error> for ConnectionError {
    fn from(err: axum::Error) -> Self {
        ConnectionError::Transport(err.into_inner())
    }
}

impl IntoResponse for ConnectionError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "connection error");
        (StatusCode::INTERNAL_SERVER_ERROR, CONNECTION_ERROR_BODY).into_response()
    }
}
