//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! built-in defaults
//!     → optional TOML file (loader.rs)
//!     → environment overrides (DEFAULT_RESPONSE_FORMAT, STATUS_CODE_MAPPING, DEBUG, ...)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → lifecycle::startup builds the resolution tables from it
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup and never reloaded
//! - All fields have defaults so the server runs with no config file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_with, ConfigError};
pub use schema::{ListenerConfig, ObservabilityConfig, ResponseConfig, ServerConfig, TimeoutConfig};
pub use validation::{validate_config, ValidationError};
