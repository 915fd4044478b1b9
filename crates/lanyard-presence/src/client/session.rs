//! The task behind one activation.
//!
//! Fetch completion, socket frames, heartbeat ticks, and cancellation are
//! all handled in one `select!` loop, so state updates are applied one at a
//! time in arrival order.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use lanyard_common::PresenceError;

use crate::fetch::SnapshotFetcher;
use crate::model::PresenceRecord;
use crate::protocol::{parse_server_message, Envelope, ServerMessage};
use crate::transport::{Connector, FrameSink, FrameStream};

use super::types::{ClientConfig, ClientState, PresenceEvent, PresenceSnapshot};

type FetchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<PresenceRecord, PresenceError>> + Send + 'a>>;

/// How a connection ended.
enum ConnectionEnd {
    Cancelled,
    Dropped(PresenceError),
}

pub(crate) struct Session {
    pub(crate) user_id: String,
    pub(crate) config: ClientConfig,
    pub(crate) fetcher: Arc<dyn SnapshotFetcher>,
    pub(crate) connector: Arc<dyn Connector>,
    pub(crate) cancel: CancellationToken,
    pub(crate) state_tx: Arc<watch::Sender<PresenceSnapshot>>,
    pub(crate) event_tx: mpsc::Sender<PresenceEvent>,
}

impl Session {
    pub(crate) async fn run(self) {
        let mut fetch: Option<FetchFuture<'_>> = Some(self.fetcher.fetch(&self.user_id));
        let mut reconnect_delay = self.config.reconnect_delay;

        loop {
            let connected = {
                let mut connect = self.connector.connect();
                loop {
                    tokio::select! {
                        biased;
                        _ = self.cancel.cancelled() => return,
                        result = pending_fetch(&mut fetch) => {
                            fetch = None;
                            self.on_fetch(result);
                        }
                        result = &mut connect => break result,
                    }
                }
            };

            let was_connected = connected.is_ok();
            let error = match connected {
                Ok((sink, stream)) => {
                    reconnect_delay = self.config.reconnect_delay;
                    match self.drive(sink, stream, &mut fetch).await {
                        ConnectionEnd::Cancelled => return,
                        ConnectionEnd::Dropped(e) => e,
                    }
                }
                Err(e) => e,
            };

            if !self.config.reconnect {
                warn!(user_id = %self.user_id, error = %error, "Presence connection lost");
                self.fail(error);
                break;
            }

            if was_connected {
                self.emit(PresenceEvent::Disconnected);
            } else {
                self.emit(PresenceEvent::Error(error.clone()));
            }
            info!(
                error = %error,
                delay_ms = reconnect_delay.as_millis() as u64,
                "Reconnecting to Lanyard socket"
            );

            let sleep = tokio::time::sleep(reconnect_delay);
            tokio::pin!(sleep);
            loop {
                tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => return,
                    result = pending_fetch(&mut fetch) => {
                        fetch = None;
                        self.on_fetch(result);
                    }
                    _ = &mut sleep => break,
                }
            }
            reconnect_delay = (reconnect_delay * 2).min(self.config.max_reconnect_delay);
        }

        // No socket any more, but the one-shot fetch may still land.
        if fetch.is_some() {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => {}
                result = pending_fetch(&mut fetch) => self.on_fetch(result),
            }
        }
    }

    /// Subscribe on a fresh connection and pump it until it ends.
    async fn drive<'a>(
        &'a self,
        mut sink: FrameSink,
        mut stream: FrameStream,
        fetch: &mut Option<FetchFuture<'a>>,
    ) -> ConnectionEnd {
        self.emit(PresenceEvent::Connected);
        if let Err(e) = send_envelope(&mut sink, &Envelope::subscribe(&self.user_id)).await {
            return ConnectionEnd::Dropped(e);
        }
        info!(user_id = %self.user_id, "Subscribed to presence");

        let mut heartbeat: Option<Interval> = None;

        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return ConnectionEnd::Cancelled,
                result = pending_fetch(fetch) => {
                    *fetch = None;
                    self.on_fetch(result);
                }
                _ = next_heartbeat(&mut heartbeat) => {
                    if self.cancel.is_cancelled() {
                        return ConnectionEnd::Cancelled;
                    }
                    debug!("Sending heartbeat");
                    if let Err(e) = send_envelope(&mut sink, &Envelope::heartbeat()).await {
                        return ConnectionEnd::Dropped(e);
                    }
                }
                frame = stream.next() => match frame {
                    Some(Ok(WsMessage::Text(text))) => {
                        self.on_text(&text, &mut heartbeat);
                    }
                    Some(Ok(WsMessage::Close(frame))) => {
                        let reason = frame
                            .map(|f| {
                                format!(
                                    "closed by service ({}): {}",
                                    u16::from(f.code),
                                    f.reason.as_str()
                                )
                            })
                            .unwrap_or_else(|| "closed by service".into());
                        return ConnectionEnd::Dropped(PresenceError::Connection(reason));
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        return ConnectionEnd::Dropped(PresenceError::Connection(e.to_string()));
                    }
                    None => {
                        return ConnectionEnd::Dropped(PresenceError::Connection(
                            "connection closed".into(),
                        ));
                    }
                },
            }
        }
    }

    fn on_text(&self, text: &str, heartbeat: &mut Option<Interval>) {
        match parse_server_message(text) {
            Ok(ServerMessage::Hello { heartbeat_interval }) => {
                debug!(
                    interval_ms = heartbeat_interval.as_millis() as u64,
                    "Hello received, starting heartbeat"
                );
                let mut interval = tokio::time::interval_at(
                    Instant::now() + heartbeat_interval,
                    heartbeat_interval,
                );
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                // A repeated hello replaces the running timer.
                *heartbeat = Some(interval);
            }
            Ok(ServerMessage::InitState(record)) => {
                debug!(status = %record.status, "Initial state received");
                self.on_record(record);
            }
            Ok(ServerMessage::PresenceUpdate(record)) => {
                debug!(status = %record.status, "Presence update received");
                self.on_record(record);
            }
            Ok(ServerMessage::Other { op, t }) => {
                debug!(op, t = ?t, "Ignoring envelope");
            }
            Err(e) => {
                warn!(error = %e, "Dropping unreadable envelope");
            }
        }
    }

    fn on_fetch(&self, result: Result<PresenceRecord, PresenceError>) {
        match result {
            Ok(record) => {
                debug!(status = %record.status, "Snapshot fetched");
                self.on_record(record);
            }
            Err(e) => self.fail(e),
        }
    }

    fn on_record(&self, record: PresenceRecord) {
        let event = PresenceEvent::Record(record.clone());
        self.publish(
            |snapshot| {
                snapshot.state = ClientState::Ready;
                snapshot.record = Some(record);
            },
            event,
        );
    }

    fn fail(&self, error: PresenceError) {
        let reason = error.to_string();
        self.publish(
            |snapshot| snapshot.state = ClientState::Error(reason),
            PresenceEvent::Error(error),
        );
    }

    /// Apply `update` and queue `event` unless the session has been
    /// cancelled.
    ///
    /// Both happen under the watch lock, which `deactivate` also takes after
    /// cancelling.
    fn publish(&self, update: impl FnOnce(&mut PresenceSnapshot), event: PresenceEvent) {
        self.state_tx.send_if_modified(|snapshot| {
            if self.cancel.is_cancelled() {
                return false;
            }
            update(snapshot);
            self.queue(event);
            true
        });
    }

    /// Queue an event that carries no state change.
    fn emit(&self, event: PresenceEvent) {
        self.state_tx.send_if_modified(|_| {
            if !self.cancel.is_cancelled() {
                self.queue(event);
            }
            false
        });
    }

    /// Never waits on the consumer: a full channel drops the event.
    fn queue(&self, event: PresenceEvent) {
        match self.event_tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                debug!(event = ?event, "Event channel full, dropping event");
            }
            Err(TrySendError::Closed(_)) => {}
        }
    }
}

async fn pending_fetch(
    fetch: &mut Option<FetchFuture<'_>>,
) -> Result<PresenceRecord, PresenceError> {
    match fetch {
        Some(future) => future.await,
        None => std::future::pending().await,
    }
}

async fn next_heartbeat(heartbeat: &mut Option<Interval>) {
    match heartbeat {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

async fn send_envelope(sink: &mut FrameSink, envelope: &Envelope) -> Result<(), PresenceError> {
    let json = envelope.to_json()?;
    sink.send(WsMessage::Text(json.into()))
        .await
        .map_err(|e| PresenceError::Connection(format!("send failed: {e}")))
}
