//! Presence client configuration types.

use serde::{Deserialize, Serialize};

/// Settings for the Lanyard presence connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenceConfig {
    /// Discord user id to watch. Can be overridden on the command line.
    pub user_id: String,
    /// Base URL of the REST API (no trailing slash).
    pub api_base: String,
    /// WebSocket endpoint for live updates.
    pub socket_url: String,
    pub request_timeout_secs: u32,
    pub connect_timeout_secs: u32,
    /// Reconnect automatically when the socket drops.
    pub reconnect: bool,
    /// Base reconnect delay, doubled after each failed attempt.
    pub reconnect_delay_ms: u32,
    pub max_reconnect_delay_ms: u32,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            api_base: "https://api.lanyard.rest".into(),
            socket_url: "wss://api.lanyard.rest/socket".into(),
            request_timeout_secs: 10,
            connect_timeout_secs: 15,
            reconnect: false,
            reconnect_delay_ms: 1_000,
            max_reconnect_delay_ms: 30_000,
        }
    }
}
