//! Websocket transport client for the detection feed
//!
//! One long-lived connection, one read-loop task. Frames are envelopes
//! `{"event": <name>, "data": <payload>}`; each is dispatched to the handler
//! registered for its event name, on the read-loop task. This layer carries
//! no business logic: reconnection and delivery guarantees are the remote
//! service's problem, and a handler failure never tears the connection down.

use futures_util::StreamExt;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, error, info};

use crate::core::{DecodeError, EventDecoder, SubjectStore};
use crate::{DEFAULT_ENDPOINT, DETECTION_EVENT};

/// Transport-level failures surfaced from `connect`
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to connect to `{endpoint}`: {source}")]
    Connect {
        endpoint: String,
        source: tokio_tungstenite::tungstenite::Error,
    },
}

/// Connection target for the detection feed
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Remote address, with or without a `ws://` scheme
    pub endpoint: String,
}

impl ClientConfig {
    /// Create config for an endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// Endpoint as a websocket url
    fn url(&self) -> String {
        if self.endpoint.starts_with("ws://") || self.endpoint.starts_with("wss://") {
            self.endpoint.clone()
        } else {
            format!("ws://{}", self.endpoint)
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

type EventHandler = Box<dyn Fn(&Value) -> Result<(), DecodeError> + Send + Sync>;

/// Wire envelope around one named event
#[derive(Debug, Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    data: Value,
}

/// Handle to the live connection. The read loop runs until the transport
/// ends it; dropping the handle leaves the loop running for the process
/// lifetime.
#[derive(Debug)]
pub struct Connection {
    task: JoinHandle<()>,
}

impl Connection {
    /// True while the read loop is still running
    pub fn is_open(&self) -> bool {
        !self.task.is_finished()
    }

    /// Wait for the transport to end the connection
    pub async fn closed(self) {
        let _ = self.task.await;
    }
}

/// Event-stream client for the detection service
pub struct DetectionClient {
    config: ClientConfig,
    handlers: HashMap<String, EventHandler>,
}

impl DetectionClient {
    /// Create a client for the configured endpoint
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            handlers: HashMap::new(),
        }
    }

    /// Register a handler for a named event. Handlers run on the read-loop
    /// task, once per received frame; returned errors are logged and the
    /// connection continues.
    pub fn on_event<F>(&mut self, event: impl Into<String>, handler: F)
    where
        F: Fn(&Value) -> Result<(), DecodeError> + Send + Sync + 'static,
    {
        self.handlers.insert(event.into(), Box::new(handler));
    }

    /// Connect and spawn the read loop
    pub async fn connect(self) -> Result<Connection, ClientError> {
        let url = self.config.url();
        let (stream, _) = connect_async(url.as_str())
            .await
            .map_err(|source| ClientError::Connect {
                endpoint: url.clone(),
                source,
            })?;
        info!(endpoint = %url, "connected to detection feed");

        let handlers = self.handlers;
        let task = tokio::spawn(async move {
            let (_write, mut read) = stream.split();
            while let Some(frame) = read.next().await {
                match frame {
                    Ok(Message::Text(text)) => dispatch(&handlers, &text),
                    Ok(Message::Binary(bytes)) => {
                        if let Ok(text) = std::str::from_utf8(&bytes) {
                            dispatch(&handlers, text);
                        } else {
                            debug!("ignoring non-utf8 binary frame");
                        }
                    }
                    Ok(Message::Close(_)) => {
                        info!("detection feed closed by remote");
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!(error = %e, "detection feed transport error");
                        break;
                    }
                }
            }
            info!("detection feed read loop ended");
        });

        Ok(Connection { task })
    }
}

/// Route one raw frame to its handler
fn dispatch(handlers: &HashMap<String, EventHandler>, text: &str) {
    let envelope: Envelope = match serde_json::from_str(text) {
        Ok(envelope) => envelope,
        Err(e) => {
            debug!(error = %e, "ignoring frame that is not an event envelope");
            return;
        }
    };

    match handlers.get(&envelope.event) {
        Some(handler) => {
            if let Err(e) = handler(&envelope.data) {
                error!(event = %envelope.event, error = %e, "event handler failed");
            }
        }
        None => debug!(event = %envelope.event, "no handler for event"),
    }
}

/// Wire the full ingestion path: client → decoder → store.
/// Malformed payloads are dropped without touching the store; unparseable
/// text payloads fail only their own invocation.
pub async fn start_ingest(
    config: ClientConfig,
    store: SubjectStore,
) -> Result<Connection, ClientError> {
    let decoder = EventDecoder::new();
    let mut client = DetectionClient::new(config);

    client.on_event(DETECTION_EVENT, move |payload| {
        match decoder.decode(payload) {
            Ok(frame) => {
                store.apply(&frame);
                Ok(())
            }
            Err(e) if e.is_drop() => {
                debug!(reason = %e, "dropping partial detection frame");
                Ok(())
            }
            Err(e) => Err(e),
        }
    });

    client.connect().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_normalization_adds_scheme() {
        let config = ClientConfig::new("192.168.42.143:3000");
        assert_eq!(config.url(), "ws://192.168.42.143:3000");
    }

    #[test]
    fn test_url_normalization_keeps_scheme() {
        let config = ClientConfig::new("wss://tracker.local:3000/");
        assert_eq!(config.url(), "wss://tracker.local:3000/");
    }

    #[test]
    fn test_default_config_uses_default_endpoint() {
        assert_eq!(ClientConfig::default().endpoint, DEFAULT_ENDPOINT);
    }
}
