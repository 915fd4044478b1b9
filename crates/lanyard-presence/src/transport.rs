//! Socket transport for the live subscription.

use std::pin::Pin;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::{Sink, Stream, StreamExt};
use tokio_tungstenite::tungstenite::{Error as WsError, Message as WsMessage};
use tracing::info;

use lanyard_common::PresenceError;

/// Outbound half of a connection.
pub type FrameSink = Pin<Box<dyn Sink<WsMessage, Error = WsError> + Send>>;
/// Inbound half of a connection.
pub type FrameStream = Pin<Box<dyn Stream<Item = Result<WsMessage, WsError>> + Send>>;

/// Opens full-duplex connections to the presence service.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> Result<(FrameSink, FrameStream), PresenceError>;
}

/// `tokio-tungstenite` connector with a connect timeout.
#[derive(Debug, Clone)]
pub struct WsConnector {
    url: String,
    connect_timeout: Duration,
}

impl WsConnector {
    pub fn new(url: impl Into<String>, connect_timeout: Duration) -> Self {
        Self {
            url: url.into(),
            connect_timeout,
        }
    }
}

#[async_trait]
impl Connector for WsConnector {
    async fn connect(&self) -> Result<(FrameSink, FrameStream), PresenceError> {
        info!(url = %self.url, "Connecting to Lanyard socket");

        match tokio::time::timeout(
            self.connect_timeout,
            tokio_tungstenite::connect_async(self.url.as_str()),
        )
        .await
        {
            Ok(Ok((ws_stream, _))) => {
                let (write, read) = ws_stream.split();
                Ok((Box::pin(write), Box::pin(read)))
            }
            Ok(Err(e)) => Err(PresenceError::Connection(format!("connect failed: {e}"))),
            Err(_elapsed) => Err(PresenceError::Connection(format!(
                "connect timed out after {}s",
                self.connect_timeout.as_secs()
            ))),
        }
    }
}
