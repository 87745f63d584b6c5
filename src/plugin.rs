//! Plugin role.
//!
//! The plugin is the long-running half of a package: it receives the full
//! action, device, and system event vocabulary and may draw on keys, persist
//! settings, and switch profiles.

use crate::connection::{Connection, Role};
use crate::events::{PluginCommand, PluginEvent};

/// Marker for the plugin role.
#[derive(Debug, Clone, Copy)]
pub struct PluginRole;

impl Role for PluginRole {
    type Event = PluginEvent;
    type Command = PluginCommand;
    const NAME: &'static str = "plugin";
}

/// A plugin-side connection to the host.
pub type Plugin = Connection<PluginRole>;
