//! Route table and handlers.
//!
//! Unknown paths fall through to the router's 404, unknown methods on a
//! known path to the method router's 405.

use axum::{http::HeaderMap, routing::get, Json, Router};

use crate::http::reflect::{reflect_headers, Reflection};

pub async fn hello() -> &'static str {
    "Hello!"
}

pub async fn goaway() -> &'static str {
    "Go!"
}

pub async fn reflect(headers: HeaderMap) -> Json<Reflection> {
    Json(reflect_headers(&headers))
}

/// The immutable route table.
pub fn routes() -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/goaway", get(goaway))
        .route("/reflect", get(reflect))
}
