//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the global `tracing` subscriber
//! - Resolve the log filter from the environment or configuration

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Build the filter: `RUST_LOG` if set and valid, otherwise the configured level.
pub fn build_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(format!(
            "greeter_service={level},tower_http={level}",
            level = config.log_level
        ))
        .unwrap_or_else(|_| EnvFilter::new("info"))
    })
}

/// Install the global subscriber. Safe to call more than once; later calls are no-ops.
pub fn init_logging(config: &ObservabilityConfig) {
    let _ = tracing_subscriber::registry()
        .with(build_filter(config))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
