//! Object model for Lattice ListBox.
//!
//! Every widget in the listbox family owns an [`ObjectBase`], which registers
//! the widget in a shared registry and hands out a stable [`ObjectId`]. The
//! registry records parent/child links so a popup knows which items belong to
//! it without the items holding a reference back to the popup.
//!
//! # Key Types
//!
//! - [`Object`] - Trait implemented by every registered widget
//! - [`ObjectBase`] - Registers on construction, destroys on drop
//! - [`ObjectId`] - Stable, versioned handle
//! - [`ObjectRegistry`] / [`SharedObjectRegistry`] - The arena behind the ids

use std::any::Any;
use std::fmt;
use std::sync::OnceLock;

use parking_lot::RwLock;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for an object in the registry.
    ///
    /// Ids are versioned: once an object is destroyed its id never compares
    /// equal to a later object's id, even if the slot is reused.
    pub struct ObjectId;
}

impl ObjectId {
    /// Convert the id to a raw u64 value for interop (DOM ids, AccessKit node ids).
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }

    /// Rebuild an id from [`ObjectId::as_raw`].
    ///
    /// This does not check that the id is still registered.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self::from(slotmap::KeyData::from_ffi(raw))
    }
}

/// Errors that can occur during object operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectError {
    /// The object ID is invalid or has been destroyed.
    InvalidObjectId,
    /// Attempted to set an object as its own parent/ancestor.
    CircularParentage,
}

impl fmt::Display for ObjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidObjectId => write!(f, "Invalid or destroyed object ID"),
            Self::CircularParentage => {
                write!(f, "Cannot set an object as its own parent or ancestor")
            }
        }
    }
}

impl std::error::Error for ObjectError {}

/// Result type for object operations.
pub type ObjectResult<T> = std::result::Result<T, ObjectError>;

#[derive(Default)]
struct ObjectData {
    parent: Option<ObjectId>,
    children: Vec<ObjectId>,
}

/// Arena of live objects and their parent/child links.
pub struct ObjectRegistry {
    objects: SlotMap<ObjectId, ObjectData>,
}

impl ObjectRegistry {
    /// Create a new empty object registry.
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
        }
    }

    /// Register a new object of type `T` and return its ID.
    pub fn register<T: 'static>(&mut self) -> ObjectId {
        let type_name = std::any::type_name::<T>();
        let id = self.objects.insert(ObjectData::default());
        tracing::trace!(target: targets::OBJECT, ?id, type_name, "registered object");
        id
    }

    /// Remove an object and all of its descendants.
    pub fn destroy(&mut self, id: ObjectId) -> ObjectResult<()> {
        let doomed = self.collect_descendants(id)?;

        if let Some(parent) = self.objects.get(id).and_then(|data| data.parent)
            && let Some(parent_data) = self.objects.get_mut(parent)
        {
            parent_data.children.retain(|&child| child != id);
        }

        // Children first so the arena never holds a dangling parent link.
        for child in doomed.iter().rev() {
            self.objects.remove(*child);
        }
        self.objects.remove(id);

        tracing::trace!(target: targets::OBJECT, ?id, descendants = doomed.len(), "destroyed object");
        Ok(())
    }

    fn collect_descendants(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        let data = self.objects.get(id).ok_or(ObjectError::InvalidObjectId)?;
        let mut result = Vec::new();
        let mut stack: Vec<ObjectId> = data.children.clone();
        while let Some(child) = stack.pop() {
            if let Some(child_data) = self.objects.get(child) {
                stack.extend(child_data.children.iter().copied());
            }
            result.push(child);
        }
        Ok(result)
    }

    /// Check whether an object is still registered.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Reparent an object. `None` detaches it.
    pub fn set_parent(&mut self, id: ObjectId, parent: Option<ObjectId>) -> ObjectResult<()> {
        if !self.objects.contains_key(id) {
            return Err(ObjectError::InvalidObjectId);
        }
        if let Some(parent) = parent {
            if !self.objects.contains_key(parent) {
                return Err(ObjectError::InvalidObjectId);
            }
            if parent == id || self.is_ancestor_of(id, parent) {
                return Err(ObjectError::CircularParentage);
            }
        }

        let old_parent = self.objects.get(id).and_then(|data| data.parent);
        if let Some(old) = old_parent
            && let Some(old_data) = self.objects.get_mut(old)
        {
            old_data.children.retain(|&child| child != id);
        }

        if let Some(data) = self.objects.get_mut(id) {
            data.parent = parent;
        }
        if let Some(parent) = parent
            && let Some(parent_data) = self.objects.get_mut(parent)
        {
            parent_data.children.push(id);
        }
        Ok(())
    }

    /// Whether `ancestor` appears on the parent chain of `id`.
    fn is_ancestor_of(&self, ancestor: ObjectId, id: ObjectId) -> bool {
        let mut current = self.objects.get(id).and_then(|data| data.parent);
        while let Some(candidate) = current {
            if candidate == ancestor {
                return true;
            }
            current = self.objects.get(candidate).and_then(|data| data.parent);
        }
        false
    }

    /// Get the parent of an object.
    pub fn parent(&self, id: ObjectId) -> ObjectResult<Option<ObjectId>> {
        self.objects
            .get(id)
            .map(|data| data.parent)
            .ok_or(ObjectError::InvalidObjectId)
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe wrapper around [`ObjectRegistry`].
pub struct SharedObjectRegistry {
    inner: RwLock<ObjectRegistry>,
}

impl SharedObjectRegistry {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(ObjectRegistry::new()),
        }
    }

    pub fn register<T: 'static>(&self) -> ObjectId {
        self.inner.write().register::<T>()
    }

    pub fn destroy(&self, id: ObjectId) -> ObjectResult<()> {
        self.inner.write().destroy(id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.inner.read().contains(id)
    }

    pub fn set_parent(&self, id: ObjectId, parent: Option<ObjectId>) -> ObjectResult<()> {
        self.inner.write().set_parent(id, parent)
    }

    pub fn parent(&self, id: ObjectId) -> ObjectResult<Option<ObjectId>> {
        self.inner.read().parent(id)
    }
}

impl Default for SharedObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_REGISTRY: OnceLock<SharedObjectRegistry> = OnceLock::new();

/// The process-wide registry used by [`ObjectBase`].
pub fn global_registry() -> &'static SharedObjectRegistry {
    GLOBAL_REGISTRY.get_or_init(SharedObjectRegistry::new)
}

/// Base trait for every registered widget.
pub trait Object: Any + Send + Sync {
    /// The object's stable identity.
    fn object_id(&self) -> ObjectId;
}

/// Registration handle embedded in widgets.
///
/// Registers in the [`global_registry`] on construction and destroys the
/// object (and every registered descendant) on drop.
#[derive(Debug)]
pub struct ObjectBase {
    id: ObjectId,
}

impl ObjectBase {
    /// Register a new object of type `T`.
    pub fn new<T: Object>() -> Self {
        Self {
            id: global_registry().register::<T>(),
        }
    }

    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn set_parent(&self, parent: Option<ObjectId>) -> ObjectResult<()> {
        global_registry().set_parent(self.id, parent)
    }

    /// Whether `id` is a direct child of this object.
    pub fn is_parent_of(&self, id: ObjectId) -> bool {
        global_registry().parent(id).ok().flatten() == Some(self.id)
    }
}

impl Drop for ObjectBase {
    fn drop(&mut self) {
        // A parent dropped first has already destroyed this entry.
        if global_registry().contains(self.id) {
            let _ = global_registry().destroy(self.id);
        }
    }
}

static_assertions::assert_impl_all!(ObjectBase: Send, Sync);
static_assertions::assert_impl_all!(SharedObjectRegistry: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    struct Node {
        base: ObjectBase,
    }

    impl Object for Node {
        fn object_id(&self) -> ObjectId {
            self.base.id()
        }
    }

    fn node() -> Node {
        Node {
            base: ObjectBase::new::<Node>(),
        }
    }

    #[test]
    fn test_register_and_drop() {
        let id = {
            let n = node();
            assert!(global_registry().contains(n.object_id()));
            n.object_id()
        };
        assert!(!global_registry().contains(id));
    }

    #[test]
    fn test_parent_child_links() {
        let parent = node();
        let a = node();
        let b = node();
        a.base.set_parent(Some(parent.object_id())).unwrap();
        b.base.set_parent(Some(parent.object_id())).unwrap();

        assert!(parent.base.is_parent_of(a.object_id()));
        assert!(parent.base.is_parent_of(b.object_id()));
        assert!(!a.base.is_parent_of(b.object_id()));

        b.base.set_parent(None).unwrap();
        assert!(!parent.base.is_parent_of(b.object_id()));
    }

    #[test]
    fn test_cascade_destroy() {
        let parent = node();
        let child = node();
        child.base.set_parent(Some(parent.object_id())).unwrap();
        let child_id = child.object_id();

        drop(parent);
        assert!(!global_registry().contains(child_id));
        // Dropping the child afterwards must not panic.
        drop(child);
    }

    #[test]
    fn test_circular_parentage_rejected() {
        let a = node();
        let b = node();
        b.base.set_parent(Some(a.object_id())).unwrap();
        assert_eq!(
            a.base.set_parent(Some(b.object_id())),
            Err(ObjectError::CircularParentage)
        );
        assert_eq!(
            a.base.set_parent(Some(a.object_id())),
            Err(ObjectError::CircularParentage)
        );
    }

    #[test]
    fn test_raw_round_trip() {
        let n = node();
        let raw = n.object_id().as_raw();
        assert_eq!(ObjectId::from_raw(raw), n.object_id());
    }

    #[test]
    fn test_destroyed_id_is_invalid() {
        let n = node();
        let id = n.object_id();
        drop(n);
        assert_eq!(global_registry().parent(id), Err(ObjectError::InvalidObjectId));
        assert_eq!(global_registry().destroy(id), Err(ObjectError::InvalidObjectId));
    }

    #[test]
    fn test_local_registry() {
        let mut registry = ObjectRegistry::new();
        let a = registry.register::<u8>();
        let b = registry.register::<u8>();
        registry.set_parent(b, Some(a)).unwrap();
        assert!(registry.is_ancestor_of(a, b));
        registry.destroy(a).unwrap();
        assert!(!registry.contains(a));
        assert!(!registry.contains(b));
        assert_eq!(registry.parent(b), Err(ObjectError::InvalidObjectId));
    }
}
