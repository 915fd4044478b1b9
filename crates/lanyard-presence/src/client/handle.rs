//! Public handle owning an activation's lifetime.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use lanyard_common::PresenceError;

use crate::fetch::{HttpFetcher, SnapshotFetcher};
use crate::transport::{Connector, WsConnector};

use super::session::Session;
use super::types::{ClientConfig, PresenceEvent, PresenceSnapshot};

/// Capacity of the event channel returned by `activate`. Events that find
/// it full are dropped.
pub(super) const EVENT_BUFFER: usize = 256;

struct Activation {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

/// Watches one user's presence.
///
/// Nothing happens until [`activate`](Self::activate), which must be called
/// inside a Tokio runtime.
pub struct PresenceClient {
    user_id: String,
    config: ClientConfig,
    fetcher: Arc<dyn SnapshotFetcher>,
    connector: Arc<dyn Connector>,
    state_tx: Arc<watch::Sender<PresenceSnapshot>>,
    activation: Option<Activation>,
}

impl PresenceClient {
    /// Client backed by the real REST API and socket.
    pub fn new(user_id: impl Into<String>, config: ClientConfig) -> Result<Self, PresenceError> {
        let fetcher = HttpFetcher::new(config.api_base.clone(), config.request_timeout)?;
        let connector = WsConnector::new(config.socket_url.clone(), config.connect_timeout);
        Self::with_transport(user_id, config, Arc::new(fetcher), Arc::new(connector))
    }

    /// Client with caller-supplied fetch and socket implementations.
    pub fn with_transport(
        user_id: impl Into<String>,
        config: ClientConfig,
        fetcher: Arc<dyn SnapshotFetcher>,
        connector: Arc<dyn Connector>,
    ) -> Result<Self, PresenceError> {
        let user_id = user_id.into();
        if user_id.trim().is_empty() {
            return Err(PresenceError::InvalidUserId(user_id));
        }
        let (state_tx, _) = watch::channel(PresenceSnapshot::default());
        Ok(Self {
            user_id,
            config,
            fetcher,
            connector,
            state_tx: Arc::new(state_tx),
            activation: None,
        })
    }

    /// Start fetching and subscribing. Returns the event stream for this
    /// activation.
    ///
    /// An already active client is deactivated first; the snapshot is
    /// reset to `Loading`.
    pub fn activate(&mut self) -> mpsc::Receiver<PresenceEvent> {
        self.deactivate();

        let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
        self.state_tx.send_replace(PresenceSnapshot::default());

        let cancel = CancellationToken::new();
        let session = Session {
            user_id: self.user_id.clone(),
            config: self.config.clone(),
            fetcher: Arc::clone(&self.fetcher),
            connector: Arc::clone(&self.connector),
            cancel: cancel.clone(),
            state_tx: Arc::clone(&self.state_tx),
            event_tx,
        };
        let task = tokio::spawn(session.run());

        info!(user_id = %self.user_id, "Presence client activated");
        self.activation = Some(Activation { cancel, task });
        event_rx
    }

    /// Stop the activation.
    ///
    /// Does not wait for the session task: the socket and heartbeat timer
    /// are dropped when the runtime drops the aborted task. The snapshot and
    /// the event channel are final as soon as this returns. Calling it on an
    /// inactive client does nothing.
    pub fn deactivate(&mut self) {
        let Some(activation) = self.activation.take() else {
            return;
        };
        activation.cancel.cancel();
        activation.task.abort();
        // Waits out an update or event that checked the token before it was
        // cancelled.
        self.state_tx.send_if_modified(|_| false);
        info!(user_id = %self.user_id, "Presence client deactivated");
    }

    pub fn is_active(&self) -> bool {
        self.activation.is_some()
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// The current state and record.
    pub fn snapshot(&self) -> PresenceSnapshot {
        self.state_tx.borrow().clone()
    }

    /// Receiver notified on every snapshot change.
    pub fn watch(&self) -> watch::Receiver<PresenceSnapshot> {
        self.state_tx.subscribe()
    }
}

impl Drop for PresenceClient {
    fn drop(&mut self) {
        self.deactivate();
    }
}
