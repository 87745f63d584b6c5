//! Typed message vocabularies for both roles.
//!
//! Every wire message carries an `event` field (the discriminant) which
//! uniquely determines its payload shape for a given role and direction.
//! Inbound shapes live in [`receive`], outbound command shapes in [`send`].
//!
//! Dispatch is built on two traits: [`Message`] exposes the discriminant of
//! a decoded message, and [`EventKind`] ties each concrete event struct to
//! its place in a role's inbound union so listeners receive the narrowed
//! type rather than the union.

pub mod receive;
pub mod send;

pub use receive::{InspectorEvent, PluginEvent};
pub use send::{InspectorCommand, PluginCommand};

/// A decoded inbound message with a wire discriminant.
pub trait Message {
    /// The `event` field value identifying this message's kind.
    fn event(&self) -> &'static str;
}

/// A concrete event kind within the inbound union `M`.
///
/// Implemented once per (event struct, owning union) pair; event kinds shared
/// by both roles implement it against both unions.
pub trait EventKind<M>: Sized + 'static {
    /// Wire discriminant for this event kind.
    const EVENT: &'static str;

    /// Narrow a decoded message to this kind, if the discriminant matches.
    fn from_message(message: &M) -> Option<&Self>;
}
