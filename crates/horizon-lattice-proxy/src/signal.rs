//! Change listeners.
//!
//! [`Signal`] is the fan-out point behind [`ProxyModel::changed`]: every
//! reported write becomes one [`ValueChange`](crate::ValueChange) handed to
//! each connected listener, in connection order, on the writing thread.
//!
//! Listeners are snapshotted before delivery, so one may disconnect itself
//! (or connect another) while a change is being delivered. Listeners added
//! during a delivery first hear about the next change.
//!
//! [`ProxyModel::changed`]: crate::ProxyModel::changed

use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::logging::targets;

new_key_type! {
    /// Handle returned by [`Signal::connect`].
    pub struct ConnectionId;
}

type Listener<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

struct Listeners<Args> {
    slots: SlotMap<ConnectionId, Listener<Args>>,
    blocked: bool,
}

/// A list of listeners invoked directly on emit.
pub struct Signal<Args> {
    inner: Mutex<Listeners<Args>>,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// A signal with no listeners.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Listeners {
                slots: SlotMap::with_key(),
                blocked: false,
            }),
        }
    }

    /// Add a listener.
    pub fn connect<F>(&self, listener: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.inner.lock().slots.insert(Arc::new(listener))
    }

    /// Remove a listener. Returns `false` if `id` was already gone.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.inner.lock().slots.remove(id).is_some()
    }

    /// Number of connected listeners.
    pub fn connection_count(&self) -> usize {
        self.inner.lock().slots.len()
    }

    /// Drop emissions while `blocked` is set. Listeners stay connected.
    pub fn set_blocked(&self, blocked: bool) {
        self.inner.lock().blocked = blocked;
    }

    pub fn is_blocked(&self) -> bool {
        self.inner.lock().blocked
    }

    /// Deliver `args` to every listener.
    pub fn emit(&self, args: Args) {
        let listeners: Vec<Listener<Args>> = {
            let inner = self.inner.lock();
            if inner.blocked {
                tracing::trace!(target: targets::SIGNAL, "blocked, change dropped");
                return;
            }
            inner.slots.values().cloned().collect()
        };
        tracing::trace!(target: targets::SIGNAL, listeners = listeners.len(), "delivering change");

        for listener in &listeners {
            listener(&args);
        }
    }
}

static_assertions::assert_impl_all!(Signal<crate::ValueChange>: Send, Sync);
