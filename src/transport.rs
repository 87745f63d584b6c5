//! WebSocket transport.
//!
//! Thin wrapper around `tokio-tungstenite` behind the [`Transport`] trait.
//! All WebSocket handling in the crate goes through this module rather than
//! `tokio-tungstenite` directly.
//!
//! # Architecture
//!
//! The connection core consumes transports as a stream of three
//! [`TransportEvent`]s: `Opened` once, then zero or more text `Frame`s, then
//! `Closed` exactly once. [`WsTransport`] produces that sequence from a real
//! socket; tests drive the same core with a scripted transport instead.
//!
//! Connection failures are not errors at this seam: they surface as
//! `Closed { error: Some(..) }` so the core has a single teardown path.

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite;

use crate::error::ProtocolError;

/// Concrete WebSocket stream type (avoids repeating the generic everywhere).
type WsStream = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

/// Lifecycle notification from a transport.
#[derive(Debug)]
pub enum TransportEvent {
    /// The connection is established and frames may be sent.
    Opened,
    /// A UTF-8 text frame arrived.
    Frame(String),
    /// The connection ended; `error` is set when it ended abnormally.
    Closed {
        /// Failure description, `None` for a clean close.
        error: Option<String>,
    },
}

/// Frame-oriented duplex transport consumed by the connection core.
#[async_trait]
pub trait Transport: Send {
    /// Wait for the next transport event.
    ///
    /// After `Closed` has been returned, every subsequent call returns
    /// `Closed` again.
    async fn next_event(&mut self) -> TransportEvent;

    /// Send a UTF-8 text frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport is not open or the send fails.
    async fn send_text(&mut self, text: &str) -> Result<(), ProtocolError>;
}

/// Connect to a WebSocket URL.
///
/// # Errors
///
/// Returns an error if the URL is invalid or the WebSocket handshake fails.
async fn connect(url: &str) -> Result<WsStream> {
    use tungstenite::client::IntoClientRequest;

    let request = url
        .into_client_request()
        .with_context(|| format!("invalid WebSocket URL: {url}"))?;

    let (ws_stream, _response) = tokio_tungstenite::connect_async(request)
        .await
        .context("WebSocket connect failed")?;

    Ok(ws_stream)
}

enum WsState {
    /// Not yet connected; holds the target URL.
    Pending(String),
    Open(WsStream),
    Finished,
}

/// [`Transport`] over a real WebSocket.
///
/// Construction is lazy: the socket is dialed on the first `next_event`
/// call, which yields `Opened` on success or `Closed` on failure.
pub struct WsTransport {
    state: WsState,
}

impl WsTransport {
    /// Create a transport that will dial `url` when polled.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            state: WsState::Pending(url.into()),
        }
    }
}

impl std::fmt::Debug for WsTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match &self.state {
            WsState::Pending(url) => format!("Pending({url})"),
            WsState::Open(_) => "Open".to_string(),
            WsState::Finished => "Finished".to_string(),
        };
        f.debug_struct("WsTransport").field("state", &state).finish()
    }
}

#[async_trait]
impl Transport for WsTransport {
    async fn next_event(&mut self) -> TransportEvent {
        loop {
            match &mut self.state {
                WsState::Pending(url) => {
                    let url = url.clone();
                    match connect(&url).await {
                        Ok(stream) => {
                            log::info!("WebSocket connected to {url}");
                            self.state = WsState::Open(stream);
                            return TransportEvent::Opened;
                        }
                        Err(e) => {
                            self.state = WsState::Finished;
                            return TransportEvent::Closed {
                                error: Some(format!("{e:#}")),
                            };
                        }
                    }
                }
                WsState::Open(stream) => match stream.next().await {
                    Some(Ok(tungstenite::Message::Text(text))) => {
                        return TransportEvent::Frame(text.to_string());
                    }
                    Some(Ok(tungstenite::Message::Ping(data))) => {
                        // tungstenite queues the pong; flushing keeps the
                        // host's keepalive happy while we are idle.
                        if let Err(e) = stream.send(tungstenite::Message::Pong(data)).await {
                            log::warn!("WebSocket pong failed: {e}");
                        }
                    }
                    Some(Ok(tungstenite::Message::Close(_))) | None => {
                        self.state = WsState::Finished;
                        return TransportEvent::Closed { error: None };
                    }
                    Some(Ok(_)) => {
                        // Binary, pong and raw frames: skip
                    }
                    Some(Err(e)) => {
                        self.state = WsState::Finished;
                        return TransportEvent::Closed {
                            error: Some(format!("WebSocket read error: {e}")),
                        };
                    }
                },
                WsState::Finished => return TransportEvent::Closed { error: None },
            }
        }
    }

    async fn send_text(&mut self, text: &str) -> Result<(), ProtocolError> {
        match &mut self.state {
            WsState::Open(stream) => stream
                .send(tungstenite::Message::Text(text.to_string()))
                .await
                .map_err(|e| ProtocolError::Transport(format!("WebSocket send failed: {e}"))),
            _ => Err(ProtocolError::NotConnected),
        }
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::sync::mpsc;

    /// Scripted transport for connection tests.
    ///
    /// Events are fed through a channel; sent frames are appended to a
    /// shared log so tests can assert both content and ordering.
    pub(crate) struct MockTransport {
        events: mpsc::UnboundedReceiver<TransportEvent>,
        pub(crate) sent: Arc<Mutex<Vec<String>>>,
    }

    impl MockTransport {
        pub(crate) fn new() -> (Self, mpsc::UnboundedSender<TransportEvent>) {
            let (tx, rx) = mpsc::unbounded_channel();
            let transport = Self {
                events: rx,
                sent: Arc::new(Mutex::new(Vec::new())),
            };
            (transport, tx)
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn next_event(&mut self) -> TransportEvent {
            match self.events.recv().await {
                Some(event) => event,
                None => TransportEvent::Closed { error: None },
            }
        }

        async fn send_text(&mut self, text: &str) -> Result<(), ProtocolError> {
            self.sent
                .lock()
                .expect("sent log lock poisoned")
                .push(text.to_string());
            Ok(())
        }
    }
}
