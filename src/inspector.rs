//! Property inspector role.
//!
//! The inspector is the short-lived settings UI bound to a single action
//! instance. Its event vocabulary is limited to settings notifications and
//! plugin relay messages, and it additionally receives an action-instance
//! descriptor at registration.

use crate::connection::{Connection, Role};
use crate::events::{InspectorCommand, InspectorEvent};
use crate::registration::ActionInfo;

/// Marker for the property inspector role.
#[derive(Debug, Clone, Copy)]
pub struct InspectorRole;

impl Role for InspectorRole {
    type Event = InspectorEvent;
    type Command = InspectorCommand;
    const NAME: &'static str = "property inspector";
}

/// A property-inspector-side connection to the host.
pub type PropertyInspector = Connection<InspectorRole>;

impl Connection<InspectorRole> {
    /// Descriptor of the action instance this inspector belongs to.
    ///
    /// `None` before registration.
    #[must_use]
    pub fn action_info(&self) -> Option<ActionInfo> {
        self.with_identity(|params| params.action_info.clone())
            .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::RegistrationParams;
    use crate::emitter::Listener;
    use crate::events::receive::DidReceiveSettingsEvent;
    use crate::registration::Info;
    use crate::transport::mock::MockTransport;
    use crate::transport::TransportEvent;
    use std::sync::{Arc, Mutex};

    fn params() -> RegistrationParams {
        RegistrationParams {
            port: 28196,
            uuid: "inspector-uuid".to_string(),
            register_event: "registerPropertyInspector".to_string(),
            info: serde_json::from_value::<Info>(serde_json::json!({
                "application": {
                    "language": "de",
                    "platform": "kESDSDKApplicationInfoPlatformMac",
                    "platformVersion": "14.2.1",
                    "version": "6.5.0"
                },
                "colors": {},
                "devices": [],
                "devicePixelRatio": 2.0,
                "plugin": { "uuid": "com.example.counter", "version": "1.0" }
            }))
            .expect("valid info"),
            action_info: Some(
                serde_json::from_value(serde_json::json!({
                    "action": "com.example.counter.increment",
                    "context": "ctx-9",
                    "device": "dev-1",
                    "payload": {
                        "coordinates": { "column": 1, "row": 2 },
                        "settings": { "count": 3 }
                    }
                }))
                .expect("valid action info"),
            ),
        }
    }

    #[test]
    fn test_action_info_available_after_bind() {
        let inspector = PropertyInspector::new();
        assert!(inspector.action_info().is_none());

        inspector.bind(params()).expect("first bind");
        let action_info = inspector.action_info().expect("bound");
        assert_eq!(action_info.context, "ctx-9");
        assert_eq!(action_info.payload.coordinates.row, 2);
    }

    #[tokio::test]
    async fn test_inspector_handshake_uses_its_register_event() {
        let inspector = PropertyInspector::new();
        inspector.bind(params()).expect("first bind");

        let (transport, events) = MockTransport::new();
        let log = Arc::clone(&transport.sent);
        events.send(TransportEvent::Opened).expect("scripted");
        events
            .send(TransportEvent::Closed { error: None })
            .expect("scripted");

        inspector
            .run_transport(transport, None)
            .await
            .expect("clean close");

        let entries = log.lock().expect("sent log lock poisoned").clone();
        assert_eq!(
            entries,
            vec![r#"{"event":"registerPropertyInspector","uuid":"inspector-uuid"}"#.to_string()]
        );
    }

    #[tokio::test]
    async fn test_settings_notification_reaches_inspector_listener() {
        let inspector = PropertyInspector::new();
        inspector.bind(params()).expect("first bind");

        let seen: Arc<Mutex<Option<DidReceiveSettingsEvent>>> = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        inspector.add_event_listener(Arc::new(move |event: &DidReceiveSettingsEvent| {
            *sink.lock().expect("seen lock poisoned") = Some(event.clone());
        }) as Listener<DidReceiveSettingsEvent>);

        let (transport, events) = MockTransport::new();
        events.send(TransportEvent::Opened).expect("scripted");
        events
            .send(TransportEvent::Frame(
                serde_json::json!({
                    "event": "didReceiveSettings",
                    "action": "com.example.counter.increment",
                    "context": "ctx-9",
                    "device": "dev-1",
                    "payload": {
                        "settings": { "count": 7 },
                        "coordinates": { "column": 1, "row": 2 },
                        "isInMultiAction": false
                    }
                })
                .to_string(),
            ))
            .expect("scripted");
        events
            .send(TransportEvent::Closed { error: None })
            .expect("scripted");

        inspector
            .run_transport(transport, None)
            .await
            .expect("clean close");

        let seen = seen.lock().expect("seen lock poisoned");
        let event = seen.as_ref().expect("listener invoked");
        assert_eq!(event.payload.settings["count"], 7);
    }

    #[test]
    fn test_send_to_plugin_serializes_before_gating() {
        // Serialization failures surface even when the connection is not
        // ready; a well-formed command is gated on lifecycle instead.
        let inspector = PropertyInspector::new();
        let command = InspectorCommand::SendToPlugin {
            action: "com.example.counter.increment".to_string(),
            context: "ctx-9".to_string(),
            payload: serde_json::json!({ "volume": 0.5 }),
        };
        assert!(matches!(
            inspector.send(&command),
            Err(crate::ProtocolError::NotConnected)
        ));
    }
}
