//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (hyper auto connection, accept loop, shutdown)
//!     → middleware (buffer body, map transport failures)
//!     → handlers.rs (route table)
//!     → reflect.rs (header echo policy)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod reflect;
pub mod server;

pub use error::ConnectionError;
pub use reflect::{reflect_headers, Reflection};
pub use server::{AppState, HttpServer, ServerError};
