//! Configuration schema.
//!
//! `LanyardConfig` is the root; each section lives in its own submodule
//! and carries `#[serde(default)]` so partial files deserialize.

mod logging;
mod presence;

pub use logging::{LogLevel, LoggingConfig};
pub use presence::PresenceConfig;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LanyardConfig {
    pub presence: PresenceConfig,
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_presence_section() {
        let config = LanyardConfig::default();
        assert!(config.presence.user_id.is_empty());
        assert_eq!(config.presence.api_base, "https://api.lanyard.rest");
        assert_eq!(config.presence.socket_url, "wss://api.lanyard.rest/socket");
        assert_eq!(config.presence.request_timeout_secs, 10);
        assert_eq!(config.presence.connect_timeout_secs, 15);
        assert!(!config.presence.reconnect);
        assert_eq!(config.presence.reconnect_delay_ms, 1_000);
        assert_eq!(config.presence.max_reconnect_delay_ms, 30_000);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: LanyardConfig = toml::from_str(
            r#"
[presence]
user_id = "94490510688792576"
reconnect = true
"#,
        )
        .unwrap();
        assert_eq!(config.presence.user_id, "94490510688792576");
        assert!(config.presence.reconnect);
        assert_eq!(config.presence.api_base, "https://api.lanyard.rest");
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn log_level_parses_lowercase() {
        let config: LanyardConfig = toml::from_str("[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let result: Result<LanyardConfig, _> = toml::from_str("[logging]\nlevel = \"loud\"\n");
        assert!(result.is_err());
    }
}
