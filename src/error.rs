//! Crate error type.
//!
//! Transport-level failures (connection refused, abrupt disconnect) are not
//! modeled here beyond [`ProtocolError::Transport`]; they surface as close
//! notifications on the transport and tear the connection down.

use std::fmt;

/// Errors surfaced by the protocol client.
#[derive(Debug)]
pub enum ProtocolError {
    /// `send` was called before registration constructed a transport, or
    /// after the connection closed.
    NotConnected,
    /// `send` was called while the handshake is still pending and the
    /// configured send policy is `Reject`.
    NotReady,
    /// The registration entry point was invoked more than once.
    AlreadyRegistered,
    /// An inbound text frame failed to decode as the role's message union.
    MalformedFrame {
        /// The raw frame text as delivered by the transport.
        raw: String,
        /// Decode failure description.
        reason: String,
    },
    /// An outbound command failed to serialize.
    Serialize(serde_json::Error),
    /// The underlying transport reported a failure.
    Transport(String),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConnected => write!(f, "not connected: no transport exists"),
            Self::NotReady => {
                write!(f, "connection not ready: handshake pending and send policy is Reject")
            }
            Self::AlreadyRegistered => {
                write!(f, "registration entry point was already invoked")
            }
            Self::MalformedFrame { raw, reason } => {
                write!(f, "malformed inbound frame: {reason} (raw: {raw})")
            }
            Self::Serialize(err) => write!(f, "failed to serialize outbound command: {err}"),
            Self::Transport(msg) => write!(f, "transport error: {msg}"),
        }
    }
}

impl std::error::Error for ProtocolError {}
