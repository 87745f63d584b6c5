//! Connection core shared by both roles.
//!
//! This module handles:
//! - Registration handshake with the host (first frame after open)
//! - Lifecycle tracking and send gating
//! - Decoding inbound frames into the role's event union
//! - Dispatching decoded events to registered listeners
//!
//! # Architecture
//!
//! ```text
//! Registration::connect(params)
//!        │ bind: store identity, Unregistered → AwaitingOpen
//!        ▼
//! Connection::run_transport ── tokio::select! ──┬── transport.next_event()
//!        │                                      │     Opened → handshake, → Ready
//!        │                                      │     Frame  → decode, emit
//!        │                                      │     Closed → teardown
//!        │                                      └── outbound queue (once Ready)
//!        ▼
//! Emitter<R::Event> → listeners
//! ```
//!
//! The transport is owned by a single task; `send` only queues. State and
//! listener locks are never held across an await point, so listeners and
//! senders on other tasks cannot deadlock the I/O loop.
//!
//! Rust guideline compliant 2026-02

use std::sync::{Arc, Mutex, RwLock};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::emitter::{Emitter, Listener};
use crate::error::ProtocolError;
use crate::events::{EventKind, Message};
use crate::registration::{ActionInfo, Info, RegisterEvent};
use crate::transport::{Transport, TransportEvent, WsTransport};

/// Connection lifecycle states.
///
/// Transitions only move forward: `Unregistered → AwaitingOpen → Ready →
/// Closed` (any state may jump straight to `Closed` on transport failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// No registration has happened; no transport exists.
    Unregistered,
    /// Registration parameters are stored; the transport is connecting and
    /// the handshake has not been sent yet.
    AwaitingOpen,
    /// The handshake was delivered; events flow and commands may be sent.
    Ready,
    /// The transport ended. Terminal.
    Closed,
}

/// What `send` does while the handshake is still pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendPolicy {
    /// Fail with [`ProtocolError::NotReady`].
    Reject,
    /// Queue the frame; it is flushed after the handshake, in send order.
    Buffer,
}

impl Default for SendPolicy {
    fn default() -> Self {
        Self::Reject
    }
}

/// What the I/O loop does with an inbound frame that fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePolicy {
    /// Tear the connection down and surface [`ProtocolError::MalformedFrame`].
    FailFast,
    /// Log the frame and keep the connection alive.
    Drop,
}

impl Default for FramePolicy {
    fn default() -> Self {
        Self::FailFast
    }
}

/// Tunables applied at connection construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectionOptions {
    /// Behavior of `send` before the handshake completes.
    pub send_policy: SendPolicy,
    /// Behavior on undecodable inbound frames.
    pub frame_policy: FramePolicy,
}

/// Values the host passes to the registration entry point.
#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationParams {
    /// Port of the host's WebSocket listener on loopback.
    pub port: u16,
    /// Instance UUID; echoed verbatim in the handshake.
    pub uuid: String,
    /// Handshake event name dictated by the host.
    pub register_event: String,
    /// Host environment descriptor.
    pub info: Info,
    /// Action instance descriptor; present for the inspector role only.
    pub action_info: Option<ActionInfo>,
}

/// A protocol role: the inbound vocabulary, outbound vocabulary, and name.
pub trait Role: Send + Sync + 'static {
    /// Inbound message union for this role.
    type Event: Message + DeserializeOwned + Send + Sync + 'static;
    /// Outbound command union for this role.
    type Command: Serialize + Send + Sync;
    /// Role name used in log output.
    const NAME: &'static str;
}

type ReadyCallback = Box<dyn FnOnce() + Send>;

struct Shared<R: Role> {
    options: ConnectionOptions,
    state: Mutex<Lifecycle>,
    emitter: Mutex<Emitter<R::Event>>,
    identity: RwLock<Option<RegistrationParams>>,
    outbound_tx: Mutex<Option<mpsc::UnboundedSender<String>>>,
    outbound_rx: Mutex<Option<mpsc::UnboundedReceiver<String>>>,
}

/// A registered client connection for the role `R`.
///
/// Cheap to clone; all clones share lifecycle state, listeners, and the
/// outbound queue. `send` and the listener API are callable from any task.
pub struct Connection<R: Role> {
    shared: Arc<Shared<R>>,
}

impl<R: Role> Clone for Connection<R> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<R: Role> std::fmt::Debug for Connection<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("role", &R::NAME)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl<R: Role> Default for Connection<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Role> Connection<R> {
    /// Create an unregistered connection with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(ConnectionOptions::default())
    }

    /// Create an unregistered connection with explicit options.
    #[must_use]
    pub fn with_options(options: ConnectionOptions) -> Self {
        Self {
            shared: Arc::new(Shared {
                options,
                state: Mutex::new(Lifecycle::Unregistered),
                emitter: Mutex::new(Emitter::new()),
                identity: RwLock::new(None),
                outbound_tx: Mutex::new(None),
                outbound_rx: Mutex::new(None),
            }),
        }
    }

    /// Wrap this connection in a single-use registration entry point.
    ///
    /// `on_ready` runs once, after the handshake has been handed to the
    /// transport.
    #[must_use]
    pub fn register<F: FnOnce() + Send + 'static>(&self, on_ready: F) -> Registration<R> {
        Registration {
            connection: self.clone(),
            on_ready: Mutex::new(Some(Box::new(on_ready))),
        }
    }

    /// Register a listener for the event kind `E`.
    ///
    /// Same-handle re-registration is a no-op.
    pub fn add_event_listener<E: EventKind<R::Event>>(&self, listener: Listener<E>) -> &Self {
        self.shared
            .emitter
            .lock()
            .expect("emitter lock poisoned")
            .add_event_listener(listener);
        self
    }

    /// Remove a previously registered listener for the event kind `E`.
    pub fn remove_event_listener<E: EventKind<R::Event>>(&self, listener: &Listener<E>) -> &Self {
        self.shared
            .emitter
            .lock()
            .expect("emitter lock poisoned")
            .remove_event_listener(listener);
        self
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> Lifecycle {
        *self.shared.state.lock().expect("state lock poisoned")
    }

    /// Total registered listeners across all event kinds.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.shared
            .emitter
            .lock()
            .expect("emitter lock poisoned")
            .listener_count()
    }

    /// Instance UUID, once registered.
    #[must_use]
    pub fn uuid(&self) -> Option<String> {
        self.with_identity(|params| params.uuid.clone())
    }

    /// Host WebSocket port, once registered.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.with_identity(|params| params.port)
    }

    /// Host environment descriptor, once registered.
    #[must_use]
    pub fn info(&self) -> Option<Info> {
        self.with_identity(|params| params.info.clone())
    }

    pub(crate) fn with_identity<T>(&self, f: impl FnOnce(&RegistrationParams) -> T) -> Option<T> {
        self.shared
            .identity
            .read()
            .expect("identity lock poisoned")
            .as_ref()
            .map(f)
    }

    /// Queue a command for the host.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::NotConnected`] before registration or after
    /// close, [`ProtocolError::NotReady`] while the handshake is pending
    /// under [`SendPolicy::Reject`], and [`ProtocolError::Serialize`] if the
    /// command fails to encode.
    pub fn send(&self, command: &R::Command) -> Result<(), ProtocolError> {
        let frame = serde_json::to_string(command).map_err(ProtocolError::Serialize)?;

        // Gate under the state lock so a concurrent teardown cannot let a
        // frame slip into a closed connection's queue.
        let state = self.shared.state.lock().expect("state lock poisoned");
        match *state {
            Lifecycle::Unregistered | Lifecycle::Closed => return Err(ProtocolError::NotConnected),
            Lifecycle::AwaitingOpen => {
                if self.shared.options.send_policy == SendPolicy::Reject {
                    return Err(ProtocolError::NotReady);
                }
            }
            Lifecycle::Ready => {}
        }

        let tx = self.shared.outbound_tx.lock().expect("outbound lock poisoned");
        match tx.as_ref() {
            Some(tx) => tx.send(frame).map_err(|_| ProtocolError::NotConnected),
            None => Err(ProtocolError::NotConnected),
        }
    }

    /// Accept registration parameters and move to `AwaitingOpen`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::AlreadyRegistered`] on any call after the
    /// first, regardless of current state.
    pub fn bind(&self, params: RegistrationParams) -> Result<(), ProtocolError> {
        {
            let mut identity = self.shared.identity.write().expect("identity lock poisoned");
            if identity.is_some() {
                return Err(ProtocolError::AlreadyRegistered);
            }
            log::info!(
                "{} registering: uuid={} port={}",
                R::NAME,
                params.uuid,
                params.port
            );
            *identity = Some(params);
        }

        let (tx, rx) = mpsc::unbounded_channel();
        *self.shared.outbound_tx.lock().expect("outbound lock poisoned") = Some(tx);
        *self.shared.outbound_rx.lock().expect("outbound lock poisoned") = Some(rx);
        *self.shared.state.lock().expect("state lock poisoned") = Lifecycle::AwaitingOpen;
        Ok(())
    }

    /// Drive the connection over `transport` until it closes.
    ///
    /// Must be called exactly once, after [`bind`](Self::bind). Returns when
    /// the transport closes: `Ok(())` on a clean close, the transport or
    /// decode failure otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::NotConnected`] if called before `bind` (or a
    /// second time), [`ProtocolError::MalformedFrame`] under
    /// [`FramePolicy::FailFast`], and [`ProtocolError::Transport`] when the
    /// transport ends abnormally.
    pub async fn run_transport<T: Transport>(
        &self,
        mut transport: T,
        mut on_ready: Option<ReadyCallback>,
    ) -> Result<(), ProtocolError> {
        let mut outbound_rx = self
            .shared
            .outbound_rx
            .lock()
            .expect("outbound lock poisoned")
            .take()
            .ok_or(ProtocolError::NotConnected)?;

        let mut ready = false;
        loop {
            tokio::select! {
                event = transport.next_event() => match event {
                    TransportEvent::Opened => {
                        let handshake = self
                            .with_identity(|params| RegisterEvent {
                                event: params.register_event.clone(),
                                uuid: params.uuid.clone(),
                            })
                            .ok_or(ProtocolError::NotConnected)?;
                        let frame = serde_json::to_string(&handshake)
                            .expect("handshake is serializable");
                        if let Err(e) = transport.send_text(&frame).await {
                            self.teardown();
                            return Err(e);
                        }
                        *self.shared.state.lock().expect("state lock poisoned") =
                            Lifecycle::Ready;
                        ready = true;
                        log::info!("{} handshake sent: {}", R::NAME, handshake.event);
                        if let Some(callback) = on_ready.take() {
                            callback();
                        }
                    }
                    TransportEvent::Frame(text) => {
                        match serde_json::from_str::<R::Event>(&text) {
                            Ok(message) => {
                                let calls = self
                                    .shared
                                    .emitter
                                    .lock()
                                    .expect("emitter lock poisoned")
                                    .snapshot(message.event());
                                log::debug!(
                                    "{} event '{}' → {} listener(s)",
                                    R::NAME,
                                    message.event(),
                                    calls.len()
                                );
                                crate::emitter::dispatch(&calls, &message);
                            }
                            Err(e) => match self.shared.options.frame_policy {
                                FramePolicy::FailFast => {
                                    log::error!("{} undecodable frame: {e} (raw: {text})", R::NAME);
                                    self.teardown();
                                    return Err(ProtocolError::MalformedFrame {
                                        raw: text,
                                        reason: e.to_string(),
                                    });
                                }
                                FramePolicy::Drop => {
                                    log::warn!("{} dropping undecodable frame: {e}", R::NAME);
                                }
                            },
                        }
                    }
                    TransportEvent::Closed { error } => {
                        self.teardown();
                        return match error {
                            None => {
                                log::info!("{} connection closed", R::NAME);
                                Ok(())
                            }
                            Some(e) => {
                                log::error!("{} connection failed: {e}", R::NAME);
                                Err(ProtocolError::Transport(e))
                            }
                        };
                    }
                },
                Some(frame) = outbound_rx.recv(), if ready => {
                    if let Err(e) = transport.send_text(&frame).await {
                        self.teardown();
                        return Err(e);
                    }
                }
            }
        }
    }

    /// Move to `Closed`, drop listeners and the outbound queue. Idempotent.
    fn teardown(&self) {
        *self.shared.state.lock().expect("state lock poisoned") = Lifecycle::Closed;
        self.shared
            .emitter
            .lock()
            .expect("emitter lock poisoned")
            .clear();
        // Dropping the sender also discards anything still queued.
        *self.shared.outbound_tx.lock().expect("outbound lock poisoned") = None;
    }
}

/// Single-use entry point tying a connection to the host's parameters.
///
/// Mirrors the host's contract: the entry point is invoked exactly once per
/// process with the port, UUID, handshake event name, and info payload.
pub struct Registration<R: Role> {
    connection: Connection<R>,
    on_ready: Mutex<Option<ReadyCallback>>,
}

impl<R: Role> std::fmt::Debug for Registration<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("role", &R::NAME)
            .finish_non_exhaustive()
    }
}

impl<R: Role> Registration<R> {
    /// The underlying connection.
    #[must_use]
    pub fn connection(&self) -> &Connection<R> {
        &self.connection
    }

    /// Bind the host's parameters and spawn the I/O task.
    ///
    /// Dials `ws://127.0.0.1:<port>` and drives the connection until it
    /// closes; the returned handle resolves to the close outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::AlreadyRegistered`] on any call after the
    /// first.
    pub fn connect(
        &self,
        params: RegistrationParams,
    ) -> Result<JoinHandle<Result<(), ProtocolError>>, ProtocolError> {
        let port = params.port;
        self.connection.bind(params)?;
        let on_ready = self
            .on_ready
            .lock()
            .expect("ready callback lock poisoned")
            .take();
        let connection = self.connection.clone();
        Ok(tokio::spawn(async move {
            let transport = WsTransport::new(format!("ws://127.0.0.1:{port}"));
            connection.run_transport(transport, on_ready).await
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::receive::KeyDownEvent;
    use crate::events::send::PluginCommand;
    use crate::plugin::{Plugin, PluginRole};
    use crate::transport::mock::MockTransport;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample_info() -> Info {
        serde_json::from_value(serde_json::json!({
            "application": {
                "language": "en",
                "platform": "kESDSDKApplicationInfoPlatformMac",
                "platformVersion": "14.2.1",
                "version": "6.5.0"
            },
            "colors": {},
            "devices": [],
            "devicePixelRatio": 2.0,
            "plugin": { "uuid": "com.example.counter", "version": "1.0" }
        }))
        .expect("valid info")
    }

    fn sample_params() -> RegistrationParams {
        RegistrationParams {
            port: 28196,
            uuid: "abc-123".to_string(),
            register_event: "registerEvent".to_string(),
            info: sample_info(),
            action_info: None,
        }
    }

    fn key_down_frame() -> String {
        serde_json::json!({
            "event": "keyDown",
            "action": "com.example.counter.increment",
            "context": "ctx1",
            "device": "dev1",
            "payload": {
                "settings": { "count": 4 },
                "coordinates": { "column": 2, "row": 1 },
                "isInMultiAction": false
            }
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_handshake_sent_before_ready_callback() {
        let connection = Plugin::new();
        connection.bind(sample_params()).expect("first bind");

        let (transport, events) = MockTransport::new();
        let log = Arc::clone(&transport.sent);
        events.send(TransportEvent::Opened).expect("scripted");
        events
            .send(TransportEvent::Closed { error: None })
            .expect("scripted");

        let ready_log = Arc::clone(&log);
        let on_ready: ReadyCallback = Box::new(move || {
            ready_log
                .lock()
                .expect("sent log lock poisoned")
                .push("ready".to_string());
        });

        connection
            .run_transport(transport, Some(on_ready))
            .await
            .expect("clean close");

        let entries = log.lock().expect("sent log lock poisoned").clone();
        assert_eq!(
            entries,
            vec![
                r#"{"event":"registerEvent","uuid":"abc-123"}"#.to_string(),
                "ready".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_inbound_frame_dispatches_typed_event() {
        let connection = Plugin::new();
        connection.bind(sample_params()).expect("first bind");

        let seen: Arc<Mutex<Vec<KeyDownEvent>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        connection.add_event_listener(Arc::new(move |event: &KeyDownEvent| {
            sink.lock().expect("seen lock poisoned").push(event.clone());
        }) as Listener<KeyDownEvent>);

        let (transport, events) = MockTransport::new();
        events.send(TransportEvent::Opened).expect("scripted");
        events
            .send(TransportEvent::Frame(key_down_frame()))
            .expect("scripted");
        events
            .send(TransportEvent::Closed { error: None })
            .expect("scripted");

        connection
            .run_transport(transport, None)
            .await
            .expect("clean close");

        let seen = seen.lock().expect("seen lock poisoned");
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].context, "ctx1");
        assert_eq!(seen[0].payload.coordinates.column, 2);
        assert_eq!(seen[0].payload.settings["count"], 4);
    }

    #[tokio::test]
    async fn test_close_clears_listeners_and_blocks_sends() {
        let connection = Plugin::new();
        connection.bind(sample_params()).expect("first bind");
        connection.add_event_listener(Arc::new(|_event: &KeyDownEvent| {}) as Listener<KeyDownEvent>);

        let (transport, events) = MockTransport::new();
        events.send(TransportEvent::Opened).expect("scripted");
        events
            .send(TransportEvent::Closed { error: None })
            .expect("scripted");
        connection
            .run_transport(transport, None)
            .await
            .expect("clean close");

        assert_eq!(connection.state(), Lifecycle::Closed);
        assert_eq!(connection.listener_count(), 0);
        let command = PluginCommand::ShowOk {
            context: "ctx1".to_string(),
        };
        assert!(matches!(
            connection.send(&command),
            Err(ProtocolError::NotConnected)
        ));
    }

    #[tokio::test]
    async fn test_abnormal_close_surfaces_transport_error() {
        let connection = Plugin::new();
        connection.bind(sample_params()).expect("first bind");

        let (transport, events) = MockTransport::new();
        events.send(TransportEvent::Opened).expect("scripted");
        events
            .send(TransportEvent::Closed {
                error: Some("connection reset".to_string()),
            })
            .expect("scripted");

        match connection.run_transport(transport, None).await {
            Err(ProtocolError::Transport(e)) => assert!(e.contains("connection reset")),
            other => panic!("expected transport error, got {other:?}"),
        }
        assert_eq!(connection.state(), Lifecycle::Closed);
    }

    #[test]
    fn test_send_before_registration_is_not_connected() {
        let connection = Plugin::new();
        let command = PluginCommand::GetSettings {
            context: "ctx1".to_string(),
        };
        assert!(matches!(
            connection.send(&command),
            Err(ProtocolError::NotConnected)
        ));
    }

    #[test]
    fn test_send_while_awaiting_open_rejects_by_default() {
        let connection = Plugin::new();
        connection.bind(sample_params()).expect("first bind");
        assert_eq!(connection.state(), Lifecycle::AwaitingOpen);

        let command = PluginCommand::ShowAlert {
            context: "ctx1".to_string(),
        };
        assert!(matches!(
            connection.send(&command),
            Err(ProtocolError::NotReady)
        ));
    }

    #[tokio::test]
    async fn test_buffer_policy_flushes_after_handshake() {
        let connection = Connection::<PluginRole>::with_options(ConnectionOptions {
            send_policy: SendPolicy::Buffer,
            ..ConnectionOptions::default()
        });
        connection.bind(sample_params()).expect("first bind");

        let command = PluginCommand::LogMessage {
            payload: crate::events::send::LogMessagePayload {
                message: "queued early".to_string(),
            },
        };
        connection.send(&command).expect("buffered");

        let (transport, events) = MockTransport::new();
        let log = Arc::clone(&transport.sent);
        events.send(TransportEvent::Opened).expect("scripted");
        events
            .send(TransportEvent::Closed { error: None })
            .expect("scripted");

        connection
            .run_transport(transport, None)
            .await
            .expect("clean close");

        let entries = log.lock().expect("sent log lock poisoned").clone();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].contains("registerEvent"));
        assert!(entries[1].contains("queued early"));
    }

    #[tokio::test]
    async fn test_malformed_frame_fails_fast_by_default() {
        let connection = Plugin::new();
        connection.bind(sample_params()).expect("first bind");
        connection.add_event_listener(Arc::new(|_event: &KeyDownEvent| {}) as Listener<KeyDownEvent>);

        let (transport, events) = MockTransport::new();
        events.send(TransportEvent::Opened).expect("scripted");
        events
            .send(TransportEvent::Frame("{not json".to_string()))
            .expect("scripted");

        match connection.run_transport(transport, None).await {
            Err(ProtocolError::MalformedFrame { raw, .. }) => assert_eq!(raw, "{not json"),
            other => panic!("expected malformed frame error, got {other:?}"),
        }
        assert_eq!(connection.state(), Lifecycle::Closed);
        assert_eq!(connection.listener_count(), 0);
    }

    #[tokio::test]
    async fn test_drop_policy_keeps_connection_alive() {
        let connection = Connection::<PluginRole>::with_options(ConnectionOptions {
            frame_policy: FramePolicy::Drop,
            ..ConnectionOptions::default()
        });
        connection.bind(sample_params()).expect("first bind");

        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        connection.add_event_listener(Arc::new(move |_event: &KeyDownEvent| {
            counter.fetch_add(1, Ordering::SeqCst);
        }) as Listener<KeyDownEvent>);

        let (transport, events) = MockTransport::new();
        events.send(TransportEvent::Opened).expect("scripted");
        events
            .send(TransportEvent::Frame("{not json".to_string()))
            .expect("scripted");
        events
            .send(TransportEvent::Frame(key_down_frame()))
            .expect("scripted");
        events
            .send(TransportEvent::Closed { error: None })
            .expect("scripted");

        connection
            .run_transport(transport, None)
            .await
            .expect("clean close");
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_second_close_is_a_no_op() {
        let connection = Plugin::new();
        connection.bind(sample_params()).expect("first bind");

        let (transport, events) = MockTransport::new();
        events.send(TransportEvent::Opened).expect("scripted");
        events
            .send(TransportEvent::Closed { error: None })
            .expect("scripted");
        connection
            .run_transport(transport, None)
            .await
            .expect("clean close");

        // Driving a fresh transport after close fails cleanly instead of
        // reviving the connection.
        let (second, events) = MockTransport::new();
        events
            .send(TransportEvent::Closed { error: None })
            .expect("scripted");
        assert!(matches!(
            connection.run_transport(second, None).await,
            Err(ProtocolError::NotConnected)
        ));
        assert_eq!(connection.state(), Lifecycle::Closed);
        assert_eq!(connection.listener_count(), 0);
    }

    #[test]
    fn test_second_bind_is_already_registered() {
        let connection = Plugin::new();
        connection.bind(sample_params()).expect("first bind");
        assert!(matches!(
            connection.bind(sample_params()),
            Err(ProtocolError::AlreadyRegistered)
        ));
    }

    #[test]
    fn test_accessors_reflect_bound_identity() {
        let connection = Plugin::new();
        assert_eq!(connection.uuid(), None);

        connection.bind(sample_params()).expect("first bind");
        assert_eq!(connection.uuid().as_deref(), Some("abc-123"));
        assert_eq!(connection.port(), Some(28196));
        assert_eq!(
            connection.info().map(|info| info.plugin.uuid),
            Some("com.example.counter".to_string())
        );
    }

    #[tokio::test]
    async fn test_registration_entry_point_is_single_use() {
        let connection = Plugin::new();
        let registration = connection.register(|| {});
        let handle = registration.connect(sample_params()).expect("first connect");
        assert!(matches!(
            registration.connect(sample_params()),
            Err(ProtocolError::AlreadyRegistered)
        ));
        // No host is listening; the spawned task reports the dial failure.
        assert!(handle.await.expect("task completes").is_err());
    }
}
