//! Signal/slot system for Lattice ListBox.
//!
//! Widgets expose state changes (pressed, selection committed, playback rate
//! changed) as [`Signal`]s. Slots run synchronously on the emitting thread,
//! which matches the single-threaded event handling of the widget family.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The signal type
//! - [`ConnectionId`] - Returned when connecting a slot
//! - [`ConnectionGuard`] - Disconnects its slot when dropped
//!
//! # Example
//!
//! ```
//! use lattice_listbox_core::Signal;
//!
//! let pressed_changed = Signal::<bool>::new();
//! let conn = pressed_changed.connect(|pressed| {
//!     println!("pressed: {pressed}");
//! });
//! pressed_changed.emit(true);
//! pressed_changed.disconnect(conn);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::SignalError;
use crate::logging::targets;

new_key_type! {
    /// Identifies one connection on one signal.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A type-safe signal that can be connected to multiple slots.
pub struct Signal<Args> {
    connections: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Disconnect a slot. Returns `false` if the id was unknown.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// While blocked, [`emit`](Self::emit) drops the emission.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Invoke every connected slot with `args`.
    ///
    /// The connection table is snapshotted before any slot runs, so a slot
    /// may connect or disconnect on this same signal.
    pub fn emit(&self, args: Args) {
        if self.blocked.load(Ordering::SeqCst) {
            tracing::trace!(target: targets::SIGNAL, "emission blocked");
            return;
        }

        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, slots = slots.len(), "emitting signal");
        for slot in slots {
            slot(&args);
        }
    }

    /// Connect a slot whose lifetime is bound to the returned guard.
    ///
    /// The guard only holds a weak reference, so it never keeps the signal
    /// (or the object that owns it) alive.
    pub fn connect_scoped<F>(self: &Arc<Self>, slot: F) -> ConnectionGuard<Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard {
            signal: Arc::downgrade(self),
            id: Some(id),
        }
    }
}

impl<Args> fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connections.lock().len())
            .field("blocked", &self.blocked.load(Ordering::Relaxed))
            .finish()
    }
}

/// Disconnects its slot when dropped.
#[must_use = "dropping the guard disconnects the slot immediately"]
pub struct ConnectionGuard<Args: 'static> {
    signal: Weak<Signal<Args>>,
    id: Option<ConnectionId>,
}

impl<Args: 'static> ConnectionGuard<Args> {
    pub fn connection_id(&self) -> Option<ConnectionId> {
        self.id
    }

    /// Disconnect now, reporting whether the connection was still live.
    pub fn disconnect(mut self) -> Result<(), SignalError> {
        let id = self.id.take().ok_or(SignalError::InvalidConnection)?;
        let signal = self.signal.upgrade().ok_or(SignalError::SignalDropped)?;
        if signal.disconnect(id) {
            Ok(())
        } else {
            Err(SignalError::InvalidConnection)
        }
    }
}

impl<Args: 'static> Drop for ConnectionGuard<Args> {
    fn drop(&mut self) {
        if let Some(id) = self.id.take()
            && let Some(signal) = self.signal.upgrade()
        {
            signal.disconnect(id);
        }
    }
}

impl<Args: 'static> fmt::Debug for ConnectionGuard<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionGuard").field("id", &self.id).finish()
    }
}

static_assertions::assert_impl_all!(Signal<bool>: Send, Sync);
static_assertions::assert_impl_all!(ConnectionGuard<f64>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_emit_reaches_all_slots() {
        let signal = Signal::<i32>::new();
        let total = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let total = Arc::clone(&total);
            signal.connect(move |value| {
                total.fetch_add(*value as usize, Ordering::SeqCst);
            });
        }

        signal.emit(2);
        assert_eq!(total.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn test_disconnect() {
        let signal = Signal::<()>::new();
        let id = signal.connect(|_| {});
        assert_eq!(signal.connection_count(), 1);
        assert!(signal.disconnect(id));
        assert!(!signal.disconnect(id));
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_blocked_signal_drops_emission() {
        let signal = Signal::<()>::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        signal.connect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        signal.set_blocked(true);
        signal.emit(());
        signal.set_blocked(false);
        signal.emit(());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_slot_may_disconnect_during_emit() {
        let signal = Arc::new(Signal::<()>::new());
        let weak = Arc::downgrade(&signal);
        let own_id = Arc::new(Mutex::new(None));
        let slot_id = Arc::clone(&own_id);
        let id = signal.connect(move |_| {
            if let Some(signal) = weak.upgrade()
                && let Some(id) = *slot_id.lock()
            {
                signal.disconnect(id);
            }
        });
        *own_id.lock() = Some(id);
        signal.emit(());
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_scoped_connection() {
        let signal = Arc::new(Signal::<f64>::new());
        let guard = signal.connect_scoped(|_| {});
        assert_eq!(signal.connection_count(), 1);
        drop(guard);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_guard_disconnect_after_signal_dropped() {
        let signal = Arc::new(Signal::<f64>::new());
        let guard = signal.connect_scoped(|_| {});
        drop(signal);
        assert_eq!(guard.disconnect(), Err(SignalError::SignalDropped));
    }
}
