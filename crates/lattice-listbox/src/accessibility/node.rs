//! The Accessible trait for widget accessibility support.

use lattice_listbox_core::ObjectId;

use super::aria::{AriaAttributes, names};
use super::dom_id;
use super::role::AccessibleRole;

/// Trait for widgets that expose semantic state to assistive technology.
///
/// Every method has a default; widgets override the ones relevant to them.
/// [`aria_attributes`](Accessible::aria_attributes) and
/// [`build_accessible_node`](Accessible::build_accessible_node) are derived
/// from the others and normally left alone.
///
/// # Example
///
/// ```ignore
/// impl Accessible for ListBoxItem {
///     fn accessible_role(&self) -> AccessibleRole {
///         AccessibleRole::ListBoxOption
///     }
///
///     fn is_accessible_selected(&self) -> Option<bool> {
///         Some(self.is_selected())
///     }
/// }
/// ```
pub trait Accessible {
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Unknown
    }

    fn accessible_name(&self) -> Option<String> {
        None
    }

    /// Current value text (e.g. `"1.5x"` on a playback-rate button).
    fn accessible_value(&self) -> Option<String> {
        None
    }

    /// `Some` for widgets that can expand (comboboxes).
    fn is_accessible_expanded(&self) -> Option<bool> {
        None
    }

    /// `Some` for widgets that can be selected (options).
    fn is_accessible_selected(&self) -> Option<bool> {
        None
    }

    /// Role of the popup this widget opens, for `aria-haspopup`.
    fn accessible_popup_role(&self) -> Option<AccessibleRole> {
        None
    }

    /// Elements this widget controls, for `aria-controls`.
    fn accessible_controls(&self) -> Vec<ObjectId> {
        Vec::new()
    }

    /// The descendant that currently has virtual focus.
    fn accessible_active_descendant(&self) -> Option<ObjectId> {
        None
    }

    fn is_accessible_disabled(&self) -> bool {
        false
    }

    fn is_accessible_hidden(&self) -> bool {
        false
    }

    /// Whether the widget responds to click/activate.
    fn is_accessible_clickable(&self) -> bool {
        false
    }

    /// 1-based position within its set.
    fn accessible_position_in_set(&self) -> Option<usize> {
        None
    }

    fn accessible_set_size(&self) -> Option<usize> {
        None
    }

    /// The ARIA attributes the element should carry.
    fn aria_attributes(&self) -> AriaAttributes {
        let mut attrs = AriaAttributes::new();

        if let Some(role) = self.accessible_role().aria_role() {
            attrs.set(names::ROLE, role);
        }
        if let Some(popup) = self.accessible_popup_role().and_then(AccessibleRole::aria_role) {
            attrs.set(names::HASPOPUP, popup);
        }
        if let Some(expanded) = self.is_accessible_expanded() {
            attrs.set_bool(names::EXPANDED, expanded);
        }

        let controls = self.accessible_controls();
        if !controls.is_empty() {
            let ids: Vec<String> = controls.into_iter().map(dom_id).collect();
            attrs.set(names::CONTROLS, ids.join(" "));
        }

        if let Some(active) = self.accessible_active_descendant() {
            attrs.set(names::ACTIVEDESCENDANT, dom_id(active));
        }
        if let Some(selected) = self.is_accessible_selected() {
            attrs.set_bool(names::SELECTED, selected);
        }
        if self.is_accessible_disabled() {
            attrs.set_bool(names::DISABLED, true);
        }

        attrs
    }

    /// Build an AccessKit node from this widget's accessibility info.
    #[cfg(feature = "accessibility")]
    fn build_accessible_node(&self, children: &[ObjectId]) -> accesskit::Node {
        use super::object_id_to_node_id;
        use accesskit::{Action, Node};

        let mut node = Node::new(self.accessible_role().to_accesskit_role());

        if let Some(name) = self.accessible_name() {
            node.set_label(name);
        }
        if let Some(value) = self.accessible_value() {
            node.set_value(value);
        }
        if let Some(expanded) = self.is_accessible_expanded() {
            node.set_expanded(expanded);
        }
        if let Some(selected) = self.is_accessible_selected() {
            node.set_selected(selected);
        }

        let controls: Vec<_> = self
            .accessible_controls()
            .into_iter()
            .map(object_id_to_node_id)
            .collect();
        if !controls.is_empty() {
            node.set_controls(controls);
        }

        if let Some(active) = self.accessible_active_descendant() {
            node.set_active_descendant(object_id_to_node_id(active));
        }
        if self.is_accessible_disabled() {
            node.set_disabled();
        }
        if self.is_accessible_hidden() {
            node.set_hidden();
        }
        if self.is_accessible_clickable() {
            node.add_action(Action::Click);
            node.add_action(Action::Focus);
        }
        if let Some(pos) = self.accessible_position_in_set() {
            node.set_position_in_set(pos);
        }
        if let Some(size) = self.accessible_set_size() {
            node.set_size_of_set(size);
        }

        let child_ids: Vec<_> = children.iter().copied().map(object_id_to_node_id).collect();
        if !child_ids.is_empty() {
            node.set_children(child_ids);
        }

        node
    }
}
