//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Every field has a default; without a file the service binds 0.0.0.0:80
//! - Config is immutable once loaded
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{LimitsConfig, ListenerConfig, ObservabilityConfig, ServiceConfig, ShutdownConfig};
pub use validation::{validate_config, ValidationError};
