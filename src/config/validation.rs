//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, paths and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system
//! - Remap and media type problems are reported by startup, which owns those tables

use std::net::SocketAddr;

use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;

use crate::config::schema::ServerConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error(
        "listener.health_path must be a static path starting with '/' \
         (letters, digits, '-', '.', '_', '~', '/'), got {0:?}"
    )]
    InvalidHealthPath(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error(
        "observability.log_level must be one of trace, debug, info, warn, error, off, got {0:?}"
    )]
    InvalidLogLevel(String),

    #[error("observability.log_format must be \"text\" or \"json\", got {0:?}")]
    InvalidLogFormat(String),
}

/// Validate a merged configuration.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if !is_static_route(&config.listener.health_path) {
        errors.push(ValidationError::InvalidHealthPath(
            config.listener.health_path.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let observability = &config.observability;
    if observability.log_level.parse::<LevelFilter>().is_err() {
        errors.push(ValidationError::InvalidLogLevel(
            observability.log_level.clone(),
        ));
    }

    if !matches!(observability.log_format.as_str(), "text" | "json") {
        errors.push(ValidationError::InvalidLogFormat(
            observability.log_format.clone(),
        ));
    }

    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A path the router accepts as a literal route: no captures, no wildcards.
fn is_static_route(path: &str) -> bool {
    path.starts_with('/')
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~' | '/'))
}
