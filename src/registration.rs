//! Registration-time data structures.
//!
//! The host hands every plugin (and property inspector) a port, an instance
//! UUID, the handshake event name, and an `info` object describing the host
//! application and connected devices. The property inspector additionally
//! receives an `actionInfo` object describing the action instance that owns
//! the inspector UI. All of it is received exactly once and never mutated.

use std::collections::HashMap;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The single handshake frame sent immediately after the transport opens.
///
/// Wire shape: `{"event": "registerEvent", "uuid": "<instance-uuid>"}` (the
/// event name is `registerPropertyInspector` for the inspector role).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterEvent {
    /// Handshake event name, as passed by the host to the entry point.
    pub event: String,
    /// Instance UUID assigned by the host.
    pub uuid: String,
}

/// Platform the host application is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "kESDSDKApplicationInfoPlatformMac")]
    Mac,
    #[serde(rename = "kESDSDKApplicationInfoPlatformWindows")]
    Windows,
}

/// Host application metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Language the host application is running in (e.g. "en", "de").
    pub language: String,
    /// Platform the host application is running on.
    pub platform: Platform,
    /// Operating system version.
    pub platform_version: String,
    /// Host application version.
    pub version: String,
}

/// Plugin identity as written in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Unique identifier of the plugin.
    pub uuid: String,
    /// Plugin version from the manifest.
    pub version: String,
}

/// Hardware device kind.
///
/// The wire value is a small integer assigned by the host; unknown values
/// decode as [`DeviceType::Unknown`] so new hardware never fails the
/// handshake decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    StreamDeckMini,
    StreamDeckXl,
    StreamDeckMobile,
    CorsairGKeys,
    StreamDeckPedal,
    CorsairVoyager,
    StreamDeckPlus,
    /// A device kind this crate does not know about yet.
    Unknown(u8),
}

impl DeviceType {
    /// Wire code for this device kind.
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            Self::StreamDeckMini => 1,
            Self::StreamDeckXl => 2,
            Self::StreamDeckMobile => 3,
            Self::CorsairGKeys => 4,
            Self::StreamDeckPedal => 5,
            Self::CorsairVoyager => 6,
            Self::StreamDeckPlus => 7,
            Self::Unknown(code) => code,
        }
    }

    /// Device kind for a wire code.
    #[must_use]
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Self::StreamDeckMini,
            2 => Self::StreamDeckXl,
            3 => Self::StreamDeckMobile,
            4 => Self::CorsairGKeys,
            5 => Self::StreamDeckPedal,
            6 => Self::CorsairVoyager,
            7 => Self::StreamDeckPlus,
            other => Self::Unknown(other),
        }
    }
}

impl Serialize for DeviceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for DeviceType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CodeVisitor;

        impl Visitor<'_> for CodeVisitor {
            type Value = DeviceType;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a device type code")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<DeviceType, E> {
                let code = u8::try_from(value)
                    .map_err(|_| E::custom(format!("device type code out of range: {value}")))?;
                Ok(DeviceType::from_code(code))
            }
        }

        deserializer.deserialize_u64(CodeVisitor)
    }
}

/// Key grid dimensions of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub columns: u32,
    pub rows: u32,
}

/// A connected device as reported in the handshake info.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Opaque device identifier.
    pub id: String,
    /// User-assigned device name.
    pub name: String,
    /// Key grid dimensions.
    pub size: Size,
    /// Device kind.
    #[serde(rename = "type")]
    pub device_type: DeviceType,
}

/// Host environment info received once at registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    /// Host application metadata.
    pub application: Application,
    /// Preferred user colors, keyed by color role name.
    pub colors: HashMap<String, String>,
    /// Connected device inventory.
    pub devices: Vec<Device>,
    /// Pixel ratio; greater than 1 on HiDPI screens.
    pub device_pixel_ratio: f64,
    /// Plugin identity.
    pub plugin: PluginInfo,
}

/// Key coordinates on a device, column-major from the top left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates {
    pub column: u32,
    pub row: u32,
}

/// Payload of the action-instance descriptor handed to a property inspector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionInfoPayload {
    /// Position of the action instance on the device.
    pub coordinates: Coordinates,
    /// Persisted settings for the instance.
    pub settings: serde_json::Value,
}

/// Descriptor of the action instance that owns a property inspector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionInfo {
    /// The action's unique identifier.
    pub action: String,
    /// Value identifying the action instance.
    pub context: String,
    /// Value identifying the device the instance lives on.
    pub device: String,
    /// Coordinates and persisted settings.
    pub payload: ActionInfoPayload,
}
