//! Event hub.
//!
//! The hub stores listeners per event kind and invokes them synchronously
//! on publish. Listeners are reference-counted closures; identity for
//! unsubscription is pointer identity of the `Rc`.
//!
//! A panicking listener is caught and logged, and the remaining listeners
//! still run.

use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::event::Event;

/// A subscribed callback.
pub type Listener<E> = Rc<dyn Fn(&E)>;

/// Wrap a closure as a [`Listener`].
pub fn listener<E, F>(callback: F) -> Listener<E>
where
    F: Fn(&E) + 'static,
{
    Rc::new(callback)
}

/// Kind -> listener list registry.
pub struct EventHub<E: Event> {
    listeners: FxHashMap<E::Kind, Vec<Listener<E>>>,
}

impl<E: Event> Default for EventHub<E> {
    fn default() -> Self {
        Self {
            listeners: FxHashMap::default(),
        }
    }
}

impl<E: Event> std::fmt::Debug for EventHub<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: FxHashMap<_, _> = self
            .listeners
            .iter()
            .map(|(kind, list)| (*kind, list.len()))
            .collect();
        f.debug_struct("EventHub").field("listeners", &counts).finish()
    }
}

impl<E: Event> EventHub<E> {
    /// Create an empty hub.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Registering the same listener twice means it
    /// is invoked twice.
    pub fn subscribe(&mut self, kind: E::Kind, listener: Listener<E>) {
        self.listeners.entry(kind).or_default().push(listener);
    }

    /// Remove every registration of `listener` under `kind`.
    ///
    /// Returns how many registrations were removed.
    pub fn unsubscribe(&mut self, kind: E::Kind, listener: &Listener<E>) -> usize {
        let Some(list) = self.listeners.get_mut(&kind) else {
            return 0;
        };

        let before = list.len();
        list.retain(|registered| !Rc::ptr_eq(registered, listener));
        let removed = before - list.len();

        if list.is_empty() {
            self.listeners.remove(&kind);
        }
        removed
    }

    /// Invoke every listener registered for the event's kind, in order.
    ///
    /// Returns the number of listeners that returned normally.
    pub fn publish(&self, event: &E) -> usize {
        let kind = event.kind();
        let Some(list) = self.listeners.get(&kind) else {
            return 0;
        };

        let mut completed = 0;
        for (index, callback) in list.iter().enumerate() {
            match panic::catch_unwind(AssertUnwindSafe(|| callback(event))) {
                Ok(()) => completed += 1,
                Err(_) => {
                    tracing::error!(?kind, listener = index, "event listener panicked");
                }
            }
        }
        completed
    }

    /// Number of registrations under `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: E::Kind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    /// Drop every listener.
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}
