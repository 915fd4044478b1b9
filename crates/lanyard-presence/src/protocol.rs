//! Envelopes exchanged over the Lanyard socket.
//!
//! Every frame is a JSON text message `{ "op": u8, "d": ..., "t": ..., "seq": ... }`.
//! The client sends `Initialize` (subscribe) and `Heartbeat`; the service
//! sends `Hello` followed by `Event` frames carrying presence records.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use lanyard_common::PresenceError;

use crate::model::PresenceRecord;

/// Operation codes.
pub mod opcodes {
    /// Service → client: an event, named by `t`.
    pub const EVENT: u8 = 0;
    /// Service → client: carries the heartbeat interval.
    pub const HELLO: u8 = 1;
    /// Client → service: subscribe to a user.
    pub const INITIALIZE: u8 = 2;
    /// Client → service: keep-alive.
    pub const HEARTBEAT: u8 = 3;
}

/// Event names carried in `t` for `op = 0`.
pub mod events {
    pub const INIT_STATE: &str = "INIT_STATE";
    pub const PRESENCE_UPDATE: &str = "PRESENCE_UPDATE";
}

/// Raw socket envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub op: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seq: Option<u64>,
}

impl Envelope {
    pub fn subscribe(user_id: &str) -> Self {
        Self {
            op: opcodes::INITIALIZE,
            d: Some(serde_json::json!({ "subscribe_to_id": user_id })),
            t: None,
            seq: None,
        }
    }

    pub fn heartbeat() -> Self {
        Self {
            op: opcodes::HEARTBEAT,
            d: None,
            t: None,
            seq: None,
        }
    }

    pub fn to_json(&self) -> Result<String, PresenceError> {
        serde_json::to_string(self)
            .map_err(|e| PresenceError::Protocol(format!("failed to encode envelope: {e}")))
    }
}

/// A decoded service → client message.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    Hello {
        heartbeat_interval: Duration,
    },
    InitState(PresenceRecord),
    PresenceUpdate(PresenceRecord),
    /// Anything this client does not act on.
    Other {
        op: u8,
        t: Option<String>,
    },
}

#[derive(Deserialize)]
struct HelloPayload {
    heartbeat_interval: u64,
}

/// Decode a text frame from the service.
pub fn parse_server_message(text: &str) -> Result<ServerMessage, PresenceError> {
    let envelope: Envelope = serde_json::from_str(text)
        .map_err(|e| PresenceError::Protocol(format!("malformed envelope: {e}")))?;

    match (envelope.op, envelope.t.as_deref()) {
        (opcodes::HELLO, _) => {
            let payload = envelope
                .d
                .ok_or_else(|| PresenceError::Protocol("hello without payload".into()))?;
            let hello: HelloPayload = serde_json::from_value(payload)
                .map_err(|e| PresenceError::Protocol(format!("invalid hello payload: {e}")))?;
            if hello.heartbeat_interval == 0 {
                return Err(PresenceError::Protocol(
                    "hello with zero heartbeat interval".into(),
                ));
            }
            Ok(ServerMessage::Hello {
                heartbeat_interval: Duration::from_millis(hello.heartbeat_interval),
            })
        }
        (opcodes::EVENT, Some(events::INIT_STATE)) => {
            Ok(ServerMessage::InitState(event_record(envelope.d)?))
        }
        (opcodes::EVENT, Some(events::PRESENCE_UPDATE)) => {
            Ok(ServerMessage::PresenceUpdate(event_record(envelope.d)?))
        }
        (op, t) => Ok(ServerMessage::Other {
            op,
            t: t.map(str::to_owned),
        }),
    }
}

fn event_record(payload: Option<serde_json::Value>) -> Result<PresenceRecord, PresenceError> {
    let payload = payload.ok_or_else(|| PresenceError::Protocol("event without payload".into()))?;
    PresenceRecord::from_value(payload)
}
