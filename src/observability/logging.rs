//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Pick the default filter from debug mode and the configured level
//!
//! # Design Decisions
//! - `RUST_LOG` always wins over configuration
//! - JSON format for log shippers, text format for terminals

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Filter directives used when `RUST_LOG` is not set.
pub fn default_directives(config: &ObservabilityConfig, debug: bool) -> String {
    if debug {
        "custom_error_pages=debug,tower_http=debug".to_string()
    } else {
        format!("custom_error_pages={0},tower_http={0}", config.log_level)
    }
}

/// Install the global subscriber.
pub fn init(config: &ObservabilityConfig, debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directives(config, debug).into());

    let json = config.log_format == "json";
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .init();
}
