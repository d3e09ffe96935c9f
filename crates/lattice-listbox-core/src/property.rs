//! Reactive properties for Lattice ListBox.
//!
//! A [`Property<T>`] wraps a value behind a lock and reports whether a write
//! actually changed it, so the owning widget can emit a change signal only
//! on real transitions.
//!
//! # Example
//!
//! ```
//! use lattice_listbox_core::{Property, Signal};
//!
//! struct Toggle {
//!     pressed: Property<bool>,
//!     pressed_changed: Signal<bool>,
//! }
//!
//! impl Toggle {
//!     fn set_pressed(&self, pressed: bool) {
//!         if self.pressed.set(pressed) {
//!             self.pressed_changed.emit(pressed);
//!         }
//!     }
//! }
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A value with change detection.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Clone the current value out.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Store `value`, returning `true` if it differs from the old one.
    pub fn set(&self, value: T) -> bool {
        let mut guard = self.value.write();
        if *guard == value {
            false
        } else {
            *guard = value;
            true
        }
    }

    /// Store `value`, returning the previous value if it changed.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut guard = self.value.write();
        if *guard == value {
            None
        } else {
            Some(std::mem::replace(&mut *guard, value))
        }
    }
}

impl<T: Clone> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Property").field(&*self.value.read()).finish()
    }
}

static_assertions::assert_impl_all!(Property<String>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_reports_change() {
        let prop = Property::new(false);
        assert!(!prop.set(false));
        assert!(prop.set(true));
        assert!(prop.get());
    }

    #[test]
    fn test_replace() {
        let prop = Property::new(String::from("1x"));
        assert_eq!(prop.replace("1x".into()), None);
        assert_eq!(prop.replace("2x".into()), Some("1x".into()));
        assert_eq!(prop.get(), "2x");
    }

    #[test]
    fn test_clone_and_debug() {
        let prop = Property::new(1.0_f64);
        prop.set(1.5);
        let copy = prop.clone();
        assert_eq!(copy.get(), 1.5);
        assert_eq!(format!("{prop:?}"), "Property(1.5)");
    }
}
