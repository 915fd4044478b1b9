//! Lanyard presence configuration.
//!
//! TOML-based configuration for the presence client and its front-end.
//! Every section uses defaults, so an empty or partial file is valid.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use lanyard_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{LanyardConfig, LogLevel, LoggingConfig, PresenceConfig, CONFIG_SCHEMA_VERSION};

use lanyard_common::ConfigError;

/// Load config from the platform default path and validate it.
pub fn load_config() -> Result<LanyardConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &LanyardConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
