//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{ServerConfig, DEFAULT_RESPONSE_FORMAT};
use crate::config::validation::{validate_config, ValidationError};

/// Default media type of the error responses.
pub const DEFAULT_FORMAT_VAR: &str = "DEFAULT_RESPONSE_FORMAT";
/// Status code remap, e.g. `494:400,529:503`.
pub const STATUS_CODE_MAPPING_VAR: &str = "STATUS_CODE_MAPPING";
/// Any non-empty value turns on debug headers and logging.
pub const DEBUG_VAR: &str = "DEBUG";
pub const LISTEN_ADDRESS_VAR: &str = "LISTEN_ADDRESS";
pub const MIME_TYPES_PATH_VAR: &str = "MIME_TYPES_PATH";
pub const ERROR_PAGES_DIR_VAR: &str = "ERROR_PAGES_DIR";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file and the process environment.
pub fn load_config(path: Option<&Path>) -> Result<ServerConfig, ConfigError> {
    load_config_with(path, |name| std::env::var(name).ok())
}

/// Load configuration, reading environment variables through `env`.
pub fn load_config_with<F>(path: Option<&Path>, env: F) -> Result<ServerConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => ServerConfig::default(),
    };

    apply_env_overrides(&mut config, env);
    if config.responses.default_format.is_empty() {
        config.responses.default_format = DEFAULT_RESPONSE_FORMAT.to_string();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Overlay non-empty environment variables onto `config`.
pub fn apply_env_overrides<F>(config: &mut ServerConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| env(name).filter(|value| !value.is_empty());

    if let Some(format) = var(DEFAULT_FORMAT_VAR) {
        config.responses.default_format = format;
    }
    if let Some(mapping) = var(STATUS_CODE_MAPPING_VAR) {
        config.responses.status_code_mapping = mapping;
    }
    if var(DEBUG_VAR).is_some() {
        config.debug = true;
    }
    if let Some(address) = var(LISTEN_ADDRESS_VAR) {
        config.listener.bind_address = address;
    }
    if let Some(path) = var(MIME_TYPES_PATH_VAR) {
        config.responses.mime_types_path = path;
    }
    if let Some(dir) = var(ERROR_PAGES_DIR_VAR) {
        config.responses.pages_dir = dir;
    }
}
