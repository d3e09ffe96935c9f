//! Accessibility support for the listbox widgets.
//!
//! State is exposed two ways from the same [`Accessible`] implementation:
//!
//! - [`AriaAttributes`]: the WAI-ARIA combobox/listbox attributes a DOM host
//!   writes onto its elements (`role`, `aria-expanded`,
//!   `aria-activedescendant`, ...).
//! - AccessKit nodes (with the `accessibility` feature), for native hosts.
//!
//! # Example
//!
//! ```ignore
//! use lattice_listbox::accessibility::{Accessible, aria::names};
//!
//! let attrs = button.aria_attributes();
//! assert_eq!(attrs.get(names::ROLE), Some("combobox"));
//! ```

pub mod aria;
mod node;
mod role;

pub use aria::AriaAttributes;
pub use node::Accessible;
pub use role::AccessibleRole;

use lattice_listbox_core::ObjectId;

/// DOM id for an object, used by `aria-controls` and `aria-activedescendant`.
pub fn dom_id(id: ObjectId) -> String {
    format!("lattice-listbox-{}", id.as_raw())
}

/// Convert an ObjectId to an AccessKit NodeId.
#[cfg(feature = "accessibility")]
pub fn object_id_to_node_id(id: ObjectId) -> accesskit::NodeId {
    accesskit::NodeId(id.as_raw())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_id_is_stable() {
        let id = ObjectId::from_raw(42);
        assert_eq!(dom_id(id), dom_id(id));
        assert!(dom_id(id).starts_with("lattice-listbox-"));
        assert_ne!(dom_id(id), dom_id(ObjectId::from_raw(43)));
    }
}
