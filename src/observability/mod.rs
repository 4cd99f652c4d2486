//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!
//! Consumers:
//!     → stdout (fmt layer)
//! ```
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the configured level
//! - Connection-level errors are always logged at `error`

pub mod logging;

pub use logging::init_logging;
