//! Multi-listener event registry keyed by wire discriminant.
//!
//! One [`Emitter`] exists per connection. Listeners subscribe to a concrete
//! event kind and receive the narrowed event type; the registry itself is
//! keyed by the kind's wire discriminant. Listener identity is the data
//! pointer of the caller's `Arc`, giving set semantics: registering the same
//! handle twice is a no-op, and removal takes the same handle back.
//!
//! `emit` snapshots the listener list before invoking anything, so a
//! listener may freely add or remove listeners for later emissions without
//! deadlocking or invalidating the current dispatch.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::events::{EventKind, Message};

/// A subscribed callback for the event kind `E`.
///
/// Keep a clone of the handle to unsubscribe later; removal is by pointer
/// identity, not by closure equality.
pub type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// Type-erased invocation for a single listener, narrowing internally.
pub(crate) type ListenerCall<M> = Arc<dyn Fn(&M) + Send + Sync>;

struct ListenerEntry<M> {
    /// Data-pointer identity of the subscriber's `Arc`.
    key: usize,
    call: ListenerCall<M>,
}

/// Multi-listener registry over the inbound union `M`.
pub struct Emitter<M> {
    listeners: HashMap<&'static str, Vec<ListenerEntry<M>>>,
}

impl<M> std::fmt::Debug for Emitter<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let listener_count: usize = self.listeners.values().map(Vec::len).sum();
        f.debug_struct("Emitter")
            .field("event_count", &self.listeners.len())
            .field("listener_count", &listener_count)
            .finish()
    }
}

impl<M> Default for Emitter<M> {
    fn default() -> Self {
        Self {
            listeners: HashMap::new(),
        }
    }
}

fn listener_key<E: ?Sized>(listener: &Arc<E>) -> usize {
    Arc::as_ptr(listener) as *const () as usize
}

impl<M: Message> Emitter<M> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for the event kind `E`.
    ///
    /// No-op if the same handle is already registered for `E`.
    pub fn add_event_listener<E: EventKind<M>>(&mut self, listener: Listener<E>) -> &mut Self {
        let key = listener_key(&listener);
        let entries = self.listeners.entry(E::EVENT).or_default();
        if entries.iter().any(|entry| entry.key == key) {
            return self;
        }

        let call: ListenerCall<M> = Arc::new(move |message: &M| {
            if let Some(event) = E::from_message(message) {
                listener(event);
            }
        });
        entries.push(ListenerEntry { key, call });
        log::debug!("registered listener for '{}'", E::EVENT);
        self
    }

    /// Remove a previously registered listener for the event kind `E`.
    ///
    /// No-op if the handle is not registered. The per-kind entry is dropped
    /// when its last listener leaves.
    pub fn remove_event_listener<E: EventKind<M>>(&mut self, listener: &Listener<E>) -> &mut Self {
        let key = listener_key(listener);
        if let Some(entries) = self.listeners.get_mut(E::EVENT) {
            entries.retain(|entry| entry.key != key);
            if entries.is_empty() {
                self.listeners.remove(E::EVENT);
            }
        }
        self
    }

    /// Remove every listener for the event kind `E`.
    pub fn remove_event_listeners<E: EventKind<M>>(&mut self) -> &mut Self {
        self.listeners.remove(E::EVENT);
        self
    }

    /// Remove all listeners for all event kinds.
    ///
    /// Invoked once per connection, on transport close.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    /// Invoke every listener registered for the message's discriminant.
    pub fn emit(&self, message: &M) {
        dispatch(&self.snapshot(message.event()), message);
    }

    /// Clone the invocation handles for a discriminant.
    ///
    /// Lets the connection release its registry lock before running
    /// listeners, so listeners can re-enter the subscribe API.
    pub(crate) fn snapshot(&self, event: &str) -> Vec<ListenerCall<M>> {
        self.listeners
            .get(event)
            .map(|entries| entries.iter().map(|entry| Arc::clone(&entry.call)).collect())
            .unwrap_or_default()
    }

    /// Total number of registered listeners across all event kinds.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }

    /// Whether no listeners are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// Invoke each listener once, isolating panics.
///
/// A panicking listener is logged and never prevents sibling listeners of
/// the same emission from running.
pub(crate) fn dispatch<M: Message>(calls: &[ListenerCall<M>], message: &M) {
    for call in calls {
        if catch_unwind(AssertUnwindSafe(|| call(message))).is_err() {
            log::error!("listener for '{}' panicked during dispatch", message.event());
        }
    }
}
