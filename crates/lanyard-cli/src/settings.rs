//! Mapping from file config and CLI flags to runtime settings.

use std::time::Duration;

use lanyard_config::{LanyardConfig, PresenceConfig};
use lanyard_presence::ClientConfig;

use crate::cli::Args;

pub fn client_config(presence: &PresenceConfig, force_reconnect: bool) -> ClientConfig {
    ClientConfig {
        api_base: presence.api_base.clone(),
        socket_url: presence.socket_url.clone(),
        request_timeout: Duration::from_secs(presence.request_timeout_secs.into()),
        connect_timeout: Duration::from_secs(presence.connect_timeout_secs.into()),
        reconnect: presence.reconnect || force_reconnect,
        reconnect_delay: Duration::from_millis(presence.reconnect_delay_ms.into()),
        max_reconnect_delay: Duration::from_millis(presence.max_reconnect_delay_ms.into()),
    }
}

/// The user id to watch: the CLI argument wins over the config.
pub fn user_id(args: &Args, config: &LanyardConfig) -> Option<String> {
    args.user_id
        .clone()
        .or_else(|| Some(config.presence.user_id.clone()))
        .filter(|id| !id.trim().is_empty())
}

/// Default `tracing` directive: the CLI flag wins over the config.
pub fn log_directive(args: &Args, config: &LanyardConfig) -> String {
    match &args.log_level {
        Some(level) => format!("lanyard={level}"),
        None => format!("lanyard={}", config.logging.level.as_directive()),
    }
}
