//! WebSocket client for the Stream Deck plugin protocol.
//!
//! Plugins and property inspectors are separate processes launched by the
//! host application. Each is handed a loopback port, an instance UUID, and a
//! handshake event name; it dials the port, identifies itself with a single
//! registration frame, and from then on exchanges JSON messages discriminated
//! by their `event` field.
//!
//! # Architecture
//!
//! ```text
//! host ──ws──► WsTransport ──► Connection<Role> ──► Emitter ──► listeners
//!                                   │
//!                                   └──◄ send(Command) from any task
//! ```
//!
//! [`Connection`] owns the lifecycle (handshake, dispatch, teardown) and is
//! generic over the [`Role`]: [`Plugin`] receives the full action and device
//! vocabulary, [`PropertyInspector`] the settings subset. Listeners subscribe
//! per event kind and receive the concrete event struct, not the union.
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use streamdeck_api::{
//!     KeyDownEvent, Listener, Plugin, PluginCommand, RegistrationParams,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let plugin = Plugin::new();
//!
//!     let sender = plugin.clone();
//!     let on_key: Listener<KeyDownEvent> = Arc::new(move |event| {
//!         let _ = sender.send(&PluginCommand::ShowOk {
//!             context: event.context.clone(),
//!         });
//!     });
//!     plugin.add_event_listener(on_key);
//!
//!     let registration = plugin.register(|| log::info!("registered"));
//!     let params: RegistrationParams = host_params()?; // from launch arguments
//!     registration.connect(params)?.await??;
//!     Ok(())
//! }
//! ```

pub mod connection;
pub mod emitter;
pub mod error;
pub mod events;
pub mod inspector;
pub mod layouts;
pub mod plugin;
pub mod registration;
pub mod transport;

pub use connection::{
    Connection, ConnectionOptions, FramePolicy, Lifecycle, Registration, RegistrationParams, Role,
    SendPolicy,
};
pub use emitter::{Emitter, Listener};
pub use error::ProtocolError;
pub use events::receive::{
    ApplicationDidLaunchEvent, ApplicationDidTerminateEvent, DeviceDidConnectEvent,
    DeviceDidDisconnectEvent, DialPressEvent, DialRotateEvent,
    DidReceiveGlobalSettingsEvent, DidReceiveSettingsEvent, KeyDownEvent, KeyUpEvent,
    PropertyInspectorDidAppearEvent, PropertyInspectorDidDisappearEvent, SendToPluginEvent,
    SendToPropertyInspectorEvent, SystemDidWakeUpEvent, TitleParametersDidChangeEvent,
    TouchTapEvent, WillAppearEvent, WillDisappearEvent,
};
pub use events::{
    EventKind, InspectorCommand, InspectorEvent, Message, PluginCommand, PluginEvent,
};
pub use inspector::{InspectorRole, PropertyInspector};
pub use plugin::{Plugin, PluginRole};
pub use registration::{ActionInfo, Coordinates, Device, DeviceType, Info, Platform};
pub use transport::{Transport, TransportEvent, WsTransport};
