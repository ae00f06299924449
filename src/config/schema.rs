//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the error
//! page server. All types derive Serde traits for deserialization from config
//! files.

use serde::{Deserialize, Serialize};

/// Media type used when none is configured.
pub const DEFAULT_RESPONSE_FORMAT: &str = "text/html";

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address, liveness path).
    pub listener: ListenerConfig,

    /// Error page resolution settings.
    pub responses: ResponseConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Echo diagnostic headers and log every fallback decision.
    pub debug: bool,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Liveness endpoint path.
    pub health_path: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            health_path: "/healthz".to_string(),
        }
    }
}

/// Error page resolution configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResponseConfig {
    /// Media type served when the request names none or an unknown one.
    pub default_format: String,

    /// Status remap specification (e.g., "494:400,529:503").
    pub status_code_mapping: String,

    /// Media type registry file.
    pub mime_types_path: String,

    /// Directory holding the error pages.
    pub pages_dir: String,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            default_format: DEFAULT_RESPONSE_FORMAT.to_string(),
            status_code_mapping: String::new(),
            mime_types_path: "etc/mime.types".to_string(),
            pages_dir: "www".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format ("text" or "json").
    pub log_format: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.listener.health_path, "/healthz");
        assert_eq!(config.responses.default_format, "text/html");
        assert!(config.responses.status_code_mapping.is_empty());
        assert!(!config.debug);
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_partial_toml() {
        let config: ServerConfig = toml::from_str(
            r#"
            debug = true

            [responses]
            default_format = "application/json"
            "#,
        )
        .unwrap();
        assert!(config.debug);
        assert_eq!(config.responses.default_format, "application/json");
        assert_eq!(config.responses.pages_dir, "www");
        assert_eq!(config.timeouts.request_secs, 30);
    }
}
