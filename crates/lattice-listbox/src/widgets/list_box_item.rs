//! Rows of a [`ListBox`](super::ListBox).
//!
//! A [`ListBoxItem`] is one option in the popup. It knows its own selected
//! and active flags and nothing about its siblings: exclusive selection is
//! the popup's job. A [`ListBoxTitle`] is the optional header row, which is
//! never navigable.

use std::fmt;

use lattice_listbox_core::logging::targets;
use lattice_listbox_core::{Object, ObjectBase, ObjectId, ObjectResult};

use crate::accessibility::{Accessible, AccessibleRole, dom_id};
use crate::class_list::{ClassList, class_names};
use crate::player::PlayerContext;

/// Resynchronises an item's selected flag from the player.
///
/// Called for every item each time the popup is shown.
pub trait ItemSync: Send + Sync {
    /// Whether the item matches the player's current state.
    fn is_current(&self, player: &dyn PlayerContext) -> bool;
}

/// Construction options for a [`ListBoxItem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListBoxItemOptions {
    pub label: String,
    /// Domain value; defaults to the label.
    pub value: Option<String>,
    pub selectable: bool,
    pub selected: bool,
    /// Whether activating the item hands focus back to the trigger button.
    /// Items that open another surface set this to `false`.
    pub returns_focus: bool,
}

impl ListBoxItemOptions {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: None,
            selectable: true,
            selected: false,
            returns_focus: true,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn with_returns_focus(mut self, returns_focus: bool) -> Self {
        self.returns_focus = returns_focus;
        self
    }
}

/// One option in a listbox popup.
pub struct ListBoxItem {
    base: ObjectBase,
    index: usize,
    label: String,
    value: String,
    selectable: bool,
    selected: bool,
    active: bool,
    returns_focus: bool,
    classes: ClassList,
    sync: Option<Box<dyn ItemSync>>,
}

impl ListBoxItem {
    pub fn new(options: ListBoxItemOptions) -> Self {
        let selected = options.selectable && options.selected;
        let mut classes = ClassList::new();
        classes.add(class_names::MENU_ITEM);
        classes.toggle(class_names::SELECTED, selected);

        Self {
            base: ObjectBase::new::<Self>(),
            index: 0,
            value: options.value.unwrap_or_else(|| options.label.clone()),
            label: options.label,
            selectable: options.selectable,
            selected,
            active: false,
            returns_focus: options.returns_focus,
            classes,
            sync: None,
        }
    }

    /// Attach a hook that resyncs `selected` on every popup show.
    pub fn with_sync(mut self, sync: impl ItemSync + 'static) -> Self {
        self.sync = Some(Box::new(sync));
        self
    }

    /// Called by the popup when the item is appended.
    pub(crate) fn attach(&mut self, index: usize, popup: ObjectId) -> ObjectResult<()> {
        self.index = index;
        self.base.set_parent(Some(popup))
    }

    /// Position among the popup's navigable items.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn returns_focus(&self) -> bool {
        self.returns_focus
    }

    pub fn classes(&self) -> &ClassList {
        &self.classes
    }

    pub fn dom_id(&self) -> String {
        dom_id(self.base.id())
    }

    /// Update the selected flag. Ignored for non-selectable items.
    ///
    /// Returns `true` if the flag changed.
    pub fn set_selected(&mut self, selected: bool) -> bool {
        if !self.selectable || self.selected == selected {
            return false;
        }
        self.selected = selected;
        self.classes.toggle(class_names::SELECTED, selected);
        tracing::trace!(target: targets::ITEM, index = self.index, selected, "item selection changed");
        true
    }

    /// Visual focus marker.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.classes.toggle(class_names::ACTIVE, active);
    }

    /// Pointer activation.
    ///
    /// A selectable item marks itself selected and returns its index so the
    /// popup can focus and commit it. Non-selectable items are inert.
    pub fn on_click(&mut self) -> Option<usize> {
        if !self.selectable {
            tracing::trace!(target: targets::ITEM, index = self.index, "click on non-selectable item ignored");
            return None;
        }
        self.set_selected(true);
        Some(self.index)
    }

    /// Resync from the player. No-op without an [`ItemSync`] hook.
    pub fn update(&mut self, player: &dyn PlayerContext) {
        let current = self.sync.as_ref().map(|sync| sync.is_current(player));
        if let Some(current) = current {
            self.set_selected(current);
        }
    }
}

impl Object for ListBoxItem {
    fn object_id(&self) -> ObjectId {
        self.base.id()
    }
}

impl Accessible for ListBoxItem {
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::ListBoxOption
    }

    fn accessible_name(&self) -> Option<String> {
        Some(self.label.clone())
    }

    fn is_accessible_selected(&self) -> Option<bool> {
        self.selectable.then_some(self.selected)
    }

    fn is_accessible_clickable(&self) -> bool {
        self.selectable
    }

    fn accessible_position_in_set(&self) -> Option<usize> {
        Some(self.index + 1)
    }
}

impl fmt::Debug for ListBoxItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListBoxItem")
            .field("id", &self.base.id())
            .field("index", &self.index)
            .field("label", &self.label)
            .field("selectable", &self.selectable)
            .field("selected", &self.selected)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Title row
// ============================================================================

/// Non-selectable header row shown above the items.
#[derive(Debug)]
pub struct ListBoxTitle {
    base: ObjectBase,
    text: String,
    classes: ClassList,
}

impl ListBoxTitle {
    pub fn new(text: &str) -> Self {
        let mut classes = ClassList::new();
        classes.add(class_names::MENU_TITLE);
        Self {
            base: ObjectBase::new::<Self>(),
            text: title_case(text),
            classes,
        }
    }

    pub(crate) fn attach(&self, popup: ObjectId) -> ObjectResult<()> {
        self.base.set_parent(Some(popup))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn classes(&self) -> &ClassList {
        &self.classes
    }
}

impl Object for ListBoxTitle {
    fn object_id(&self) -> ObjectId {
        self.base.id()
    }
}

impl Accessible for ListBoxTitle {
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Label
    }

    fn accessible_name(&self) -> Option<String> {
        Some(self.text.clone())
    }
}

/// Uppercase the first character.
fn title_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
