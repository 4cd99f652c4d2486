//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     trigger → accept loop stops → connections drain → exit
//! ```
//!
//! # Design Decisions
//! - Shutdown has timeout: forced exit after the drain deadline

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::wait_for_signal;
