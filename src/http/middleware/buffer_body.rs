//! Body buffering middleware.
//!
//! Reads the whole request body before the handler runs, so a transport
//! failure surfaces here and goes through the connection-error hook.

use std::error::Error as StdError;

use axum::{
    body::Body,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::LengthLimitError;

use crate::http::error::ConnectionError;
use crate::http::server::AppState;

pub async fn buffer_body(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();

    let bytes = match axum::body::to_bytes(body, state.max_body_bytes).await {
        Ok(bytes) => bytes,
        Err(e) if is_length_limit(&e) => {
            tracing::debug!(limit = state.max_body_bytes, "Request body too large");
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
        Err(e) => return ConnectionError::from(e).into_response(),
    };

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

/// Walk the source chain looking for the body limit marker.
fn is_length_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}
