//! Live Discord presence from the Lanyard service.
//!
//! A [`PresenceClient`] watches one user: it fetches a snapshot over HTTP
//! and, at the same time, subscribes over a WebSocket that pushes every
//! presence change. The latest record and a loading/ready/error state are
//! published for a rendering layer to consume.

pub mod assets;
pub mod client;
pub mod fetch;
pub mod model;
pub mod protocol;
pub mod transport;

pub use client::{ClientConfig, ClientState, PresenceClient, PresenceEvent, PresenceSnapshot};
pub use fetch::{HttpFetcher, SnapshotFetcher};
pub use lanyard_common::PresenceError;
pub use model::{Activity, DiscordUser, MusicActivity, PresenceRecord, Status, Timestamps};
pub use transport::{Connector, WsConnector};

#[cfg(test)]
pub(crate) mod fixtures;
