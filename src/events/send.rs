//! Outbound command shapes.
//!
//! Commands serialize to the same `{ "event": <discriminant>, ... }` envelope
//! the host uses for inbound messages. [`PluginCommand`] and
//! [`InspectorCommand`] are the closed unions for the two roles; the common
//! settings/url/log commands appear in both with identical wire shapes.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::layouts::EditableItem;

/// Display target for `setTitle` and `setImage`.
///
/// Wire values: 0 both, 1 hardware only, 2 software only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Both,
    Hardware,
    Software,
}

impl Target {
    /// Wire code for this target.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::Both => 0,
            Self::Hardware => 1,
            Self::Software => 2,
        }
    }
}

impl Serialize for Target {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for Target {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CodeVisitor;

        impl Visitor<'_> for CodeVisitor {
            type Value = Target;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a display target code (0, 1, or 2)")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Target, E> {
                match value {
                    0 => Ok(Target::Both),
                    1 => Ok(Target::Hardware),
                    2 => Ok(Target::Software),
                    other => Err(E::custom(format!("invalid display target: {other}"))),
                }
            }
        }

        deserializer.deserialize_u64(CodeVisitor)
    }
}

/// Payload of `openUrl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlPayload {
    /// URL to open in the default browser.
    pub url: String,
}

/// Payload of `logMessage`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogMessagePayload {
    /// Message written to the host's log file.
    pub message: String,
}

/// Payload of `setTitle`. Absent fields keep their current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetTitlePayload {
    /// New title; omit to revert to the user-configured title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Which display the title change applies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
    /// State to set the title for; omit for all states.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<u32>,
}

/// Payload of `setImage`. Absent fields keep their current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetImagePayload {
    /// Image as a base64 data URL; omit to revert to the manifest image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Which display the image change applies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
    /// State to set the image for; omit for all states.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<u32>,
}

/// Payload of `setFeedbackLayout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetFeedbackLayoutPayload {
    /// Built-in layout id or path to a layout JSON file.
    pub layout: String,
}

/// Payload of `setState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetStatePayload {
    /// 0-based state to switch the action instance to.
    pub state: u32,
}

/// Payload of `switchToProfile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchToProfilePayload {
    /// Profile name from the manifest; omit to switch back to the
    /// previously selected profile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

/// Closed union of commands a plugin can send, tagged on `event`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum PluginCommand {
    /// Persist settings for an action instance.
    SetSettings { context: String, payload: Value },
    /// Request the persisted settings; answered by `didReceiveSettings`.
    GetSettings { context: String },
    /// Persist global plugin settings.
    SetGlobalSettings { context: String, payload: Value },
    /// Request global settings; answered by `didReceiveGlobalSettings`.
    GetGlobalSettings { context: String },
    /// Open a URL in the default browser.
    OpenUrl { payload: UrlPayload },
    /// Write a message to the host's log file.
    LogMessage { payload: LogMessagePayload },
    /// Change the title shown on a key.
    SetTitle { context: String, payload: SetTitlePayload },
    /// Change the image shown on a key.
    SetImage { context: String, payload: SetImagePayload },
    /// Update a named item of a touch-display layout.
    SetFeedback { context: String, payload: EditableItem },
    /// Swap the touch-display layout.
    SetFeedbackLayout {
        context: String,
        payload: SetFeedbackLayoutPayload,
    },
    /// Show a temporary alert icon on a key.
    ShowAlert { context: String },
    /// Show a temporary checkmark on a key.
    ShowOk { context: String },
    /// Change the state of a multi-state action instance.
    SetState { context: String, payload: SetStatePayload },
    /// Switch the device to a profile declared in the manifest.
    SwitchToProfile {
        context: String,
        device: String,
        payload: SwitchToProfilePayload,
    },
    /// Relay a payload to the action's property inspector.
    SendToPropertyInspector {
        action: String,
        context: String,
        payload: Value,
    },
}

/// Closed union of commands a property inspector can send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum InspectorCommand {
    /// Persist settings for the owning action instance.
    SetSettings { context: String, payload: Value },
    /// Request the persisted settings; answered by `didReceiveSettings`.
    GetSettings { context: String },
    /// Persist global plugin settings.
    SetGlobalSettings { context: String, payload: Value },
    /// Request global settings; answered by `didReceiveGlobalSettings`.
    GetGlobalSettings { context: String },
    /// Open a URL in the default browser.
    OpenUrl { payload: UrlPayload },
    /// Write a message to the host's log file.
    LogMessage { payload: LogMessagePayload },
    /// Relay a payload to the plugin.
    SendToPlugin {
        action: String,
        context: String,
        payload: Value,
    },
}
