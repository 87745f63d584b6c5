//! Feedback layout item definitions for touch-display devices.
//!
//! Layouts describe what a dial's LCD slot renders; `setFeedback` updates the
//! editable properties of a named item, `setFeedbackLayout` swaps the whole
//! layout. These are pure data; the connection core treats them as opaque
//! payload shapes.

use serde::{Deserialize, Serialize};

/// Common fields shared by all layout item kinds.
///
/// `rect` is `[x, y, w, h]` inside the slot coordinates `(0, 0)..(200, 100)`;
/// items with the same `z_order` must not overlap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemBase {
    /// Unique item name; `setFeedback` uses it as the update key.
    pub key: String,
    /// Rectangle coordinates `[x, y, w, h]` of the item.
    pub rect: [i32; 4],
    /// Image path, base64 image data, or text value depending on the kind.
    pub value: String,
    /// Background fill color. Defaults to transparent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Whether the item is visible. Defaults to true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Opacity in `[0.0, 1.0]`. Defaults to 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Z-order in `[0, 700)`. Defaults to 0.
    #[serde(rename = "zOrder", skip_serializing_if = "Option::is_none")]
    pub z_order: Option<u32>,
}

/// Bar shape filled with the specified color.
///
/// `subtype` selects the shape: 0 rectangle, 1 double rectangle, 2 trapezoid,
/// 3 double trapezoid, 4 groove.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarItem {
    #[serde(flatten)]
    pub base: ItemBase,
    /// Bar background color or gradient. Defaults to `darkGray`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_bg_c: Option<String>,
    /// Bar border color. Defaults to `white`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_border_c: Option<String>,
    /// Bar indicator fill color. Defaults to `white`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_fill_c: Option<String>,
    /// Border width. Defaults to 2.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_w: Option<u32>,
    /// Bar shape selector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<u8>,
}

/// Bar shape with a triangle indicator below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GbarItem {
    #[serde(flatten)]
    pub base: ItemBase,
    /// Bar background color or gradient. Defaults to `darkGray`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_bg_c: Option<String>,
    /// Bar border color. Defaults to `white`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_border_c: Option<String>,
    /// Border width. Defaults to 2.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_w: Option<u32>,
    /// Bar shape selector.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<u8>,
    /// Indicator groove height. Defaults to 10.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bar_h: Option<u32>,
}

/// An image scaled to `rect`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixmapItem {
    #[serde(flatten)]
    pub base: ItemBase,
}

/// Text font parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    /// Font pixel size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Font weight (100–1000 or a typographical weight name).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
}

/// A text label.
///
/// When the item key is `title`, the styles selected in the property
/// inspector override the font and color properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    #[serde(flatten)]
    pub base: ItemBase,
    /// Text alignment in the rectangle. Defaults to center.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<String>,
    /// Text color. Defaults to white.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Font description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

/// A layout item, discriminated by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Item {
    Bar(BarItem),
    Gbar(GbarItem),
    Pixmap(PixmapItem),
    Text(TextItem),
}

/// Editable properties of a named layout item, as sent by `setFeedback`.
///
/// Only `key` is required; absent fields keep their current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditableItem {
    /// Name of the item to update.
    pub key: String,
    /// New value (image path, base64 data, or text).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// New background fill color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// New visibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// New opacity in `[0.0, 1.0]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// New z-order.
    #[serde(rename = "zOrder", skip_serializing_if = "Option::is_none")]
    pub z_order: Option<u32>,
}

impl EditableItem {
    /// Update with only a new value for `key`.
    #[must_use]
    pub fn value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
            background: None,
            enabled: None,
            opacity: None,
            z_order: None,
        }
    }
}

/// Built-in layout identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuiltInLayout {
    /// The default icon layout.
    #[serde(rename = "$X1")]
    Icon,
    /// Custom image with a title.
    #[serde(rename = "$A0")]
    Canvas,
    /// A single value.
    #[serde(rename = "$A1")]
    Value,
    /// A single value range.
    #[serde(rename = "$B1")]
    Indicator,
    /// A single value range with color.
    #[serde(rename = "$B2")]
    GradientIndicator,
    /// Two value ranges.
    #[serde(rename = "$C1")]
    DoubleIndicator,
}

impl BuiltInLayout {
    /// Wire identifier for this layout.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Icon => "$X1",
            Self::Canvas => "$A0",
            Self::Value => "$A1",
            Self::Indicator => "$B1",
            Self::GradientIndicator => "$B2",
            Self::DoubleIndicator => "$C1",
        }
    }
}

/// A custom layout definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Unique layout name; must not collide with built-in layouts.
    pub id: String,
    /// Items composing the layout.
    pub items: Vec<Item>,
}
