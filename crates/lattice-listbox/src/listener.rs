//! Document-level key listener registration.
//!
//! A hover-opened popup must close on Escape even though input focus is
//! somewhere else on the page. The trigger button registers itself here
//! while the pointer is over it; the host forwards document key-up events to
//! every registered button as [`ListBoxEvent::DocumentKeyRelease`].
//!
//! [`ListBoxEvent::DocumentKeyRelease`]: crate::events::ListBoxEvent::DocumentKeyRelease

use std::sync::{Arc, Weak};

use lattice_listbox_core::ObjectId;
use lattice_listbox_core::logging::targets;
use parking_lot::Mutex;

/// Registry of buttons that want document key-up events.
///
/// Cloning shares the registry.
#[derive(Debug, Clone, Default)]
pub struct DocumentListeners {
    inner: Arc<Mutex<Vec<ObjectId>>>,
}

impl DocumentListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id` until the returned guard is dropped.
    pub fn register(&self, id: ObjectId) -> ListenerGuard {
        self.inner.lock().push(id);
        tracing::trace!(target: targets::BUTTON, ?id, "document key-up listener registered");
        ListenerGuard {
            registry: Arc::downgrade(&self.inner),
            id,
        }
    }

    pub fn is_registered(&self, id: ObjectId) -> bool {
        self.inner.lock().contains(&id)
    }

    /// Snapshot of the registered buttons, in registration order.
    pub fn listeners(&self) -> Vec<ObjectId> {
        self.inner.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

/// Deregisters its button when dropped.
#[must_use = "dropping the guard deregisters the listener immediately"]
#[derive(Debug)]
pub struct ListenerGuard {
    registry: Weak<Mutex<Vec<ObjectId>>>,
    id: ObjectId,
}

impl ListenerGuard {
    pub fn id(&self) -> ObjectId {
        self.id
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            let mut listeners = registry.lock();
            if let Some(pos) = listeners.iter().position(|id| *id == self.id) {
                listeners.remove(pos);
            }
            tracing::trace!(target: targets::BUTTON, id = ?self.id, "document key-up listener removed");
        }
    }
}
