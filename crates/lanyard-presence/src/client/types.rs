//! Configuration, state, and event types for the presence client.

use std::time::Duration;

use lanyard_common::PresenceError;

use crate::model::PresenceRecord;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the presence client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// REST API base, e.g. `https://api.lanyard.rest`.
    pub api_base: String,
    /// Live socket endpoint.
    pub socket_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    /// Reconnect when the socket drops. Off by default: a drop surfaces as
    /// an error and retrying is left to the caller.
    pub reconnect: bool,
    /// Base reconnect delay, doubled after each failed attempt.
    pub reconnect_delay: Duration,
    pub max_reconnect_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.lanyard.rest".into(),
            socket_url: "wss://api.lanyard.rest/socket".into(),
            request_timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(15),
            reconnect: false,
            reconnect_delay: Duration::from_secs(1),
            max_reconnect_delay: Duration::from_secs(30),
        }
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Lifecycle of one activation.
///
/// Starts in `Loading`; never returns to it once a record or an error has
/// been seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ClientState {
    #[default]
    Loading,
    Ready,
    /// Display-ready failure reason. A later subscription record moves the
    /// state back to `Ready`.
    Error(String),
}

/// What the rendering layer sees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresenceSnapshot {
    pub state: ClientState,
    /// Latest record, kept across errors.
    pub record: Option<PresenceRecord>,
}

impl PresenceSnapshot {
    pub fn is_loading(&self) -> bool {
        self.state == ClientState::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ClientState::Error(reason) => Some(reason),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Events emitted by an active client, in the order they happened.
#[derive(Debug, Clone, PartialEq)]
pub enum PresenceEvent {
    /// The socket is open and the subscribe envelope is being sent.
    Connected,
    /// A new record replaced the current one.
    Record(PresenceRecord),
    /// The socket dropped; only emitted when reconnecting.
    Disconnected,
    Error(PresenceError),
}
