//! Greeter service library.
//!
//! A small HTTP service exposing a greeting (`/`), an easter egg
//! (`/goaway`) and a request header reflector (`/reflect`).

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
