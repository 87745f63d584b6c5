//! Inbound message shapes.
//!
//! The host delivers JSON text frames shaped
//! `{ "event": <discriminant>, ... }`; [`PluginEvent`] and
//! [`InspectorEvent`] are the closed unions for the two roles, internally
//! tagged on `event`. Settings payloads are persisted opaquely by the host
//! and stay [`serde_json::Value`] here.

// Rust guideline compliant 2026-02

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{EventKind, Message};
use crate::registration::{Coordinates, DeviceType, Size};

/// Controller kind hosting an action instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Controller {
    Encoder,
    Keypad,
}

/// Payload of `didReceiveSettings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPayload {
    /// Persistently stored data for the action instance.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub settings: Value,
    /// Position of the action instance.
    pub coordinates: Coordinates,
    /// Whether the action lives inside a multi-action.
    pub is_in_multi_action: bool,
    /// Current state; only set for multi-state actions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<u32>,
}

/// Settings delivered in response to `getSettings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DidReceiveSettingsEvent {
    pub action: String,
    pub context: String,
    pub device: String,
    pub payload: SettingsPayload,
}

/// Payload of `didReceiveGlobalSettings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSettingsPayload {
    /// Persistently stored global data.
    pub settings: Value,
}

/// Global settings delivered in response to `getGlobalSettings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DidReceiveGlobalSettingsEvent {
    pub payload: GlobalSettingsPayload,
}

/// Payload of `keyDown` and `keyUp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPayload {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub settings: Value,
    pub coordinates: Coordinates,
    /// Whether the action lives inside a multi-action.
    pub is_in_multi_action: bool,
    /// Current state; only set for multi-state actions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<u32>,
    /// Desired state when triggered from a multi-action with a fixed value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_desired_state: Option<u32>,
}

/// The user pressed a key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyDownEvent {
    pub action: String,
    pub context: String,
    pub device: String,
    pub payload: KeyPayload,
}

/// The user released a key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyUpEvent {
    pub action: String,
    pub context: String,
    pub device: String,
    pub payload: KeyPayload,
}

/// Payload of `touchTap`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchTapPayload {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub settings: Value,
    pub coordinates: Coordinates,
    /// True on a long tap.
    pub hold: bool,
    /// Tap position `[x, y]` inside the LCD slot of the action.
    pub tap_pos: [i32; 2],
}

/// The user tapped the touch display (touch-display devices only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchTapEvent {
    pub action: String,
    pub context: String,
    pub device: String,
    pub payload: TouchTapPayload,
}

/// Payload of `dialPress`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialPressPayload {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub settings: Value,
    pub coordinates: Coordinates,
    /// True on press, false on release.
    pub pressed: bool,
}

/// The user pressed or released a dial (touch-display devices only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialPressEvent {
    pub action: String,
    pub context: String,
    pub device: String,
    pub payload: DialPressPayload,
}

/// Payload of `dialRotate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialRotatePayload {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub settings: Value,
    pub coordinates: Coordinates,
    /// Whether the dial was pressed during rotation.
    pub pressed: bool,
    /// Rotation ticks; positive clockwise, negative counterclockwise,
    /// never zero.
    pub ticks: i32,
}

/// The user rotated a dial (touch-display devices only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialRotateEvent {
    pub action: String,
    pub context: String,
    pub device: String,
    pub payload: DialRotatePayload,
}

/// Payload of `willAppear` and `willDisappear`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppearancePayload {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub settings: Value,
    pub coordinates: Coordinates,
    /// Controller kind hosting this instance.
    pub controller: Controller,
    /// Whether the action lives inside a multi-action.
    pub is_in_multi_action: bool,
    /// Current state; only set for multi-state actions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<u32>,
}

/// An action instance is about to be displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WillAppearEvent {
    pub action: String,
    pub context: String,
    pub device: String,
    pub payload: AppearancePayload,
}

/// An action instance is about to stop being displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WillDisappearEvent {
    pub action: String,
    pub context: String,
    pub device: String,
    pub payload: AppearancePayload,
}

/// Title rendering parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleParameters {
    pub font_family: String,
    pub font_size: u32,
    pub font_style: String,
    pub font_underline: bool,
    pub show_title: bool,
    /// Vertical alignment: "top", "middle", or "bottom".
    pub title_alignment: String,
    pub title_color: String,
}

/// Payload of `titleParametersDidChange`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleParametersPayload {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub settings: Value,
    pub coordinates: Coordinates,
    /// State whose title changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<u32>,
    /// The new title.
    pub title: String,
    pub title_parameters: TitleParameters,
}

/// The user changed the title or its rendering parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleParametersDidChangeEvent {
    pub action: String,
    pub context: String,
    pub device: String,
    pub payload: TitleParametersPayload,
}

/// Device description delivered with `deviceDidConnect`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// User-assigned device name.
    pub name: String,
    /// Key grid dimensions.
    pub size: Size,
    /// Device kind.
    #[serde(rename = "type")]
    pub device_type: DeviceType,
}

/// A device was plugged in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDidConnectEvent {
    /// Value identifying the device.
    pub device: String,
    pub device_info: DeviceInfo,
}

/// A device was unplugged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceDidDisconnectEvent {
    /// Value identifying the device.
    pub device: String,
}

/// Payload naming a monitored application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationPayload {
    /// Identifier of the monitored application.
    pub application: String,
}

/// A monitored application launched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationDidLaunchEvent {
    pub payload: ApplicationPayload,
}

/// A monitored application terminated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationDidTerminateEvent {
    pub payload: ApplicationPayload,
}

/// The computer woke from sleep. Carries no payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemDidWakeUpEvent {}

/// A property inspector appeared for an action instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyInspectorDidAppearEvent {
    pub action: String,
    pub context: String,
    pub device: String,
}

/// A property inspector disappeared for an action instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyInspectorDidDisappearEvent {
    pub action: String,
    pub context: String,
    pub device: String,
}

/// A payload relayed from the property inspector to the plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendToPluginEvent {
    pub action: String,
    pub context: String,
    /// Arbitrary JSON payload chosen by the inspector.
    pub payload: Value,
}

/// A payload relayed from the plugin to the property inspector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendToPropertyInspectorEvent {
    pub action: String,
    pub context: String,
    /// Arbitrary JSON payload chosen by the plugin.
    pub payload: Value,
}

/// Closed union of messages a plugin can receive, tagged on `event`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum PluginEvent {
    DidReceiveSettings(DidReceiveSettingsEvent),
    DidReceiveGlobalSettings(DidReceiveGlobalSettingsEvent),
    KeyDown(KeyDownEvent),
    KeyUp(KeyUpEvent),
    TouchTap(TouchTapEvent),
    DialPress(DialPressEvent),
    DialRotate(DialRotateEvent),
    WillAppear(WillAppearEvent),
    WillDisappear(WillDisappearEvent),
    TitleParametersDidChange(TitleParametersDidChangeEvent),
    DeviceDidConnect(DeviceDidConnectEvent),
    DeviceDidDisconnect(DeviceDidDisconnectEvent),
    ApplicationDidLaunch(ApplicationDidLaunchEvent),
    ApplicationDidTerminate(ApplicationDidTerminateEvent),
    SystemDidWakeUp(SystemDidWakeUpEvent),
    PropertyInspectorDidAppear(PropertyInspectorDidAppearEvent),
    PropertyInspectorDidDisappear(PropertyInspectorDidDisappearEvent),
    SendToPlugin(SendToPluginEvent),
}

impl Message for PluginEvent {
    fn event(&self) -> &'static str {
        match self {
            Self::DidReceiveSettings(_) => "didReceiveSettings",
            Self::DidReceiveGlobalSettings(_) => "didReceiveGlobalSettings",
            Self::KeyDown(_) => "keyDown",
            Self::KeyUp(_) => "keyUp",
            Self::TouchTap(_) => "touchTap",
            Self::DialPress(_) => "dialPress",
            Self::DialRotate(_) => "dialRotate",
            Self::WillAppear(_) => "willAppear",
            Self::WillDisappear(_) => "willDisappear",
            Self::TitleParametersDidChange(_) => "titleParametersDidChange",
            Self::DeviceDidConnect(_) => "deviceDidConnect",
            Self::DeviceDidDisconnect(_) => "deviceDidDisconnect",
            Self::ApplicationDidLaunch(_) => "applicationDidLaunch",
            Self::ApplicationDidTerminate(_) => "applicationDidTerminate",
            Self::SystemDidWakeUp(_) => "systemDidWakeUp",
            Self::PropertyInspectorDidAppear(_) => "propertyInspectorDidAppear",
            Self::PropertyInspectorDidDisappear(_) => "propertyInspectorDidDisappear",
            Self::SendToPlugin(_) => "sendToPlugin",
        }
    }
}

/// Closed union of messages a property inspector can receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum InspectorEvent {
    DidReceiveSettings(DidReceiveSettingsEvent),
    DidReceiveGlobalSettings(DidReceiveGlobalSettingsEvent),
    SendToPropertyInspector(SendToPropertyInspectorEvent),
}

impl Message for InspectorEvent {
    fn event(&self) -> &'static str {
        match self {
            Self::DidReceiveSettings(_) => "didReceiveSettings",
            Self::DidReceiveGlobalSettings(_) => "didReceiveGlobalSettings",
            Self::SendToPropertyInspector(_) => "sendToPropertyInspector",
        }
    }
}

impl EventKind<PluginEvent> for DidReceiveSettingsEvent {
    const EVENT: &'static str = "didReceiveSettings";
    fn from_message(message: &PluginEvent) -> Option<&Self> {
        match message {
            PluginEvent::DidReceiveSettings(event) => Some(event),
            _ => None,
        }
    }
}

impl EventKind<PluginEvent> for DidReceiveGlobalSettingsEvent {
    const EVENT: &'static str = "didReceiveGlobalSettings";
    fn from_message(message: &PluginEvent) -> Option<&Self> {
        match message {
            PluginEvent::DidReceiveGlobalSettings(event) => Some(event),
            _ => None,
        }
    }
}

impl EventKind<PluginEvent> for KeyDownEvent {
    const EVENT: &'static str = "keyDown";
    fn from_message(message: &PluginEvent) -> Option<&Self> {
        match message {
            PluginEvent::KeyDown(event) => Some(event),
            _ => None,
        }
    }
}

impl EventKind<PluginEvent> for KeyUpEvent {
    const EVENT: &'static str = "keyUp";
    fn from_message(message: &PluginEvent) -> Option<&Self> {
        match message {
            PluginEvent::KeyUp(event) => Some(event),
            _ => None,
        }
    }
}

impl EventKind<PluginEvent> for TouchTapEvent {
    const EVENT: &'static str = "touchTap";
    fn from_message(message: &PluginEvent) -> Option<&Self> {
        match message {
            PluginEvent::TouchTap(event) => Some(event),
            _ => None,
        }
    }
}

impl EventKind<PluginEvent> for DialPressEvent {
    const EVENT: &'static str = "dialPress";
    fn from_message(message: &PluginEvent) -> Option<&Self> {
        match message {
            PluginEvent::DialPress(event) => Some(event),
            _ => None,
        }
    }
}

impl EventKind<PluginEvent> for DialRotateEvent {
    const EVENT: &'static str = "dialRotate";
    fn from_message(message: &PluginEvent) -> Option<&Self> {
        match message {
            PluginEvent::DialRotate(event) => Some(event),
            _ => None,
        }
    }
}

impl EventKind<PluginEvent> for WillAppearEvent {
    const EVENT: &'static str = "willAppear";
    fn from_message(message: &PluginEvent) -> Option<&Self> {
        match message {
            PluginEvent::WillAppear(event) => Some(event),
            _ => None,
        }
    }
}

impl EventKind<PluginEvent> for WillDisappearEvent {
    const EVENT: &'static str = "willDisappear";
    fn from_message(message: &PluginEvent) -> Option<&Self> {
        match message {
            PluginEvent::WillDisappear(event) => Some(event),
            _ => None,
        }
    }
}

impl EventKind<PluginEvent> for TitleParametersDidChangeEvent {
    const EVENT: &'static str = "titleParametersDidChange";
    fn from_message(message: &PluginEvent) -> Option<&Self> {
        match message {
            PluginEvent::TitleParametersDidChange(event) => Some(event),
            _ => None,
        }
    }
}

impl EventKind<PluginEvent> for DeviceDidConnectEvent {
    const EVENT: &'static str = "deviceDidConnect";
    fn from_message(message: &PluginEvent) -> Option<&Self> {
        match message {
            PluginEvent::DeviceDidConnect(event) => Some(event),
            _ => None,
        }
    }
}

impl EventKind<PluginEvent> for DeviceDidDisconnectEvent {
    const EVENT: &'static str = "deviceDidDisconnect";
    fn from_message(message: &PluginEvent) -> Option<&Self> {
        match message {
            PluginEvent::DeviceDidDisconnect(event) => Some(event),
            _ => None,
        }
    }
}

impl EventKind<PluginEvent> for ApplicationDidLaunchEvent {
    const EVENT: &'static str = "applicationDidLaunch";
    fn from_message(message: &PluginEvent) -> Option<&Self> {
        match message {
            PluginEvent::ApplicationDidLaunch(event) => Some(event),
            _ => None,
        }
    }
}

impl EventKind<PluginEvent> for ApplicationDidTerminateEvent {
    const EVENT: &'static str = "applicationDidTerminate";
    fn from_message(message: &PluginEvent) -> Option<&Self> {
        match message {
            PluginEvent::ApplicationDidTerminate(event) => Some(event),
            _ => None,
        }
    }
}

impl EventKind<PluginEvent> for SystemDidWakeUpEvent {
    const EVENT: &'static str = "systemDidWakeUp";
    fn from_message(message: &PluginEvent) -> Option<&Self> {
        match message {
            PluginEvent::SystemDidWakeUp(event) => Some(event),
            _ => None,
        }
    }
}

impl EventKind<PluginEvent> for PropertyInspectorDidAppearEvent {
    const EVENT: &'static str = "propertyInspectorDidAppear";
    fn from_message(message: &PluginEvent) -> Option<&Self> {
        match message {
            PluginEvent::PropertyInspectorDidAppear(event) => Some(event),
            _ => None,
        }
    }
}

impl EventKind<PluginEvent> for PropertyInspectorDidDisappearEvent {
    const EVENT: &'static str = "propertyInspectorDidDisappear";
    fn from_message(message: &PluginEvent) -> Option<&Self> {
        match message {
            PluginEvent::PropertyInspectorDidDisappear(event) => Some(event),
            _ => None,
        }
    }
}

impl EventKind<PluginEvent> for SendToPluginEvent {
    const EVENT: &'static str = "sendToPlugin";
    fn from_message(message: &PluginEvent) -> Option<&Self> {
        match message {
            PluginEvent::SendToPlugin(event) => Some(event),
            _ => None,
        }
    }
}

impl EventKind<InspectorEvent> for DidReceiveSettingsEvent {
    const EVENT: &'static str = "didReceiveSettings";
    fn from_message(message: &InspectorEvent) -> Option<&Self> {
        match message {
            InspectorEvent::DidReceiveSettings(event) => Some(event),
            _ => None,
        }
    }
}

impl EventKind<InspectorEvent> for DidReceiveGlobalSettingsEvent {
    const EVENT: &'static str = "didReceiveGlobalSettings";
    fn from_message(message: &InspectorEvent) -> Option<&Self> {
        match message {
            InspectorEvent::DidReceiveGlobalSettings(event) => Some(event),
            _ => None,
        }
    }
}

impl EventKind<InspectorEvent> for SendToPropertyInspectorEvent {
    const EVENT: &'static str = "sendToPropertyInspector";
    fn from_message(message: &InspectorEvent) -> Option<&Self> {
        match message {
            InspectorEvent::SendToPropertyInspector(event) => Some(event),
            _ => None,
        }
    }
}
