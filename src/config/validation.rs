//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (limits > 0, address parses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function: ServiceConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use crate::config::schema::ServiceConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    InvalidBindAddress(String),
    #[error("listener.max_connections must be greater than zero")]
    ZeroConnections,
    #[error("limits.max_body_bytes must be greater than zero")]
    ZeroBodyLimit,
    #[error("observability.log_level `{0}` is not a valid filter directive")]
    InvalidLogLevel(String),
}

pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.listener.max_connections == 0 {
        errors.push(ValidationError::ZeroConnections);
    }
    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }
    if EnvFilter::try_new(&config.observability.log_level).is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&ServiceConfig::default()), Ok(()));
    }

    #[test]
    fn zero_limits_rejected() {
        let mut config = ServiceConfig::default();
        config.listener.max_connections = 0;
        config.limits.max_body_bytes = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::ZeroConnections, ValidationError::ZeroBodyLimit]
        );
    }

    #[test]
    fn bad_log_level_rejected() {
        let mut config = ServiceConfig::default();
        config.observability.log_level = "greeter=loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidLogLevel(_)));
    }
}
