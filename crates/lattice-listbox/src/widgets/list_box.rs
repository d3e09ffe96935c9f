//! The popup list of a listbox dropdown.
//!
//! [`ListBox`] owns the items, tracks which one has virtual focus and which
//! one is selected, and turns keyboard, pointer and blur input into focus
//! moves. It never holds a reference to its trigger button. Anything the
//! button has to do in response (commit a selection, close) comes back as a
//! [`ListBoxRequest`] for the caller to apply.
//!
//! # Focus vs. selection
//!
//! Focus (`focused_index`) is where the keyboard cursor is; selection
//! (`selected_index`) is the committed choice. They diverge while the user
//! arrows through the list and converge on [`ListBox::select`].

use lattice_listbox_core::logging::targets;
use lattice_listbox_core::{Object, ObjectBase, ObjectId};

use crate::accessibility::{Accessible, AccessibleRole, dom_id};
use crate::class_list::{ClassList, class_names};
use crate::error::{ListBoxError, Result};
use crate::events::{HoverTarget, KeyPressEvent};
use crate::keyboard::{POPUP_KEYS, PopupKeyAction};
use crate::player::{InactivitySuspension, PlayerContext, SharedPlayer};

use super::list_box_item::{ListBoxItem, ListBoxTitle};

/// Something the owning button must do on the popup's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListBoxRequest {
    /// Run selection handling for the item at `index`, then close.
    Commit { index: usize },
    /// Close the popup, refocusing the button if `return_focus`.
    Close { return_focus: bool },
}

/// The popup list.
#[derive(Debug)]
pub struct ListBox {
    base: ObjectBase,
    owner: ObjectId,
    title: Option<ListBoxTitle>,
    items: Vec<ListBoxItem>,
    focused_index: Option<usize>,
    selected_index: Option<usize>,
    hidden: bool,
    lock_showing: bool,
    inactivity: Option<InactivitySuspension>,
    classes: ClassList,
}

impl ListBox {
    /// Create an empty, hidden popup owned by the button `owner`.
    pub fn new(owner: ObjectId) -> Self {
        let base = ObjectBase::new::<Self>();
        if let Err(err) = base.set_parent(Some(owner)) {
            tracing::warn!(target: targets::POPUP, ?owner, %err, "popup created without a live owner");
        }

        let mut classes = ClassList::new();
        classes.add(class_names::MENU);
        classes.add(class_names::HIDDEN);

        Self {
            base,
            owner,
            title: None,
            items: Vec::new(),
            focused_index: None,
            selected_index: None,
            hidden: true,
            lock_showing: false,
            inactivity: None,
            classes,
        }
    }

    /// Set the header row. It never takes part in navigation.
    pub fn set_title(&mut self, text: &str) -> Result<()> {
        let title = ListBoxTitle::new(text);
        title.attach(self.base.id())?;
        self.title = Some(title);
        Ok(())
    }

    /// Append an item and return its index.
    ///
    /// A pre-selected item only keeps its selection if no earlier item holds
    /// one.
    pub fn add_item(&mut self, mut item: ListBoxItem) -> Result<usize> {
        let index = self.items.len();
        item.attach(index, self.base.id())?;
        if item.is_selected() {
            if self.selected_index.is_some() {
                item.set_selected(false);
            } else {
                self.selected_index = Some(index);
            }
        }
        self.items.push(item);
        Ok(index)
    }

    pub fn owner(&self) -> ObjectId {
        self.owner
    }

    pub fn title(&self) -> Option<&ListBoxTitle> {
        self.title.as_ref()
    }

    pub fn items(&self) -> &[ListBoxItem] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&ListBoxItem> {
        self.items.get(index)
    }

    /// Like [`item`](Self::item), but reports a bad index as an error.
    pub fn try_item(&self, index: usize) -> Result<&ListBoxItem> {
        self.items.get(index).ok_or(ListBoxError::IndexOutOfRange {
            index,
            len: self.items.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items that can be selected.
    pub fn selectable_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_selectable()).count()
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.focused_index
    }

    pub fn focused_item(&self) -> Option<&ListBoxItem> {
        self.focused_index.and_then(|index| self.items.get(index))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn selected_item(&self) -> Option<&ListBoxItem> {
        self.selected_index.and_then(|index| self.items.get(index))
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_showing_locked(&self) -> bool {
        self.lock_showing
    }

    pub fn is_timeout_suspended(&self) -> bool {
        self.inactivity.is_some()
    }

    pub fn classes(&self) -> &ClassList {
        &self.classes
    }

    pub fn dom_id(&self) -> String {
        dom_id(self.base.id())
    }

    /// Whether `id` is one of this popup's rows (items or title).
    pub fn owns_element(&self, id: ObjectId) -> bool {
        self.base.is_parent_of(id)
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Un-hide, resync every item and focus the selected one.
    ///
    /// Returns the focused item's id, or `None` when nothing is selected.
    pub fn show(&mut self, player: &dyn PlayerContext) -> Option<ObjectId> {
        self.hidden = false;
        self.classes.remove(class_names::HIDDEN);

        for item in &mut self.items {
            item.update(player);
        }
        // Several items may match the player; the first one wins.
        self.selected_index = self.items.iter().position(ListBoxItem::is_selected);
        if let Some(first) = self.selected_index {
            for item in self.items.iter_mut().skip(first + 1) {
                item.set_selected(false);
            }
        }

        tracing::trace!(target: targets::POPUP, selected = ?self.selected_index, "popup shown");
        match self.selected_index {
            Some(index) => self.focus(index as i32),
            None => None,
        }
    }

    /// Hide. Focus and selection are kept for the next show.
    pub fn hide(&mut self) {
        self.hidden = true;
        self.classes.add(class_names::HIDDEN);
        tracing::trace!(target: targets::POPUP, "popup hidden");
    }

    /// Keep the popup visible while the pointer is elsewhere.
    pub fn lock_showing(&mut self) {
        self.lock_showing = true;
        self.classes.add(class_names::LOCK_SHOWING);
    }

    pub fn unlock_showing(&mut self) {
        self.lock_showing = false;
        self.classes.remove(class_names::LOCK_SHOWING);
    }

    // =========================================================================
    // Focus and selection
    // =========================================================================

    /// Move virtual focus.
    ///
    /// A negative `index` keeps the current focus (or takes the first item
    /// when nothing has focus yet); an index past the end clamps to the last
    /// item. Re-focusing the focused item is a no-op. Returns the id of the
    /// item that has focus afterwards, `None` only for an empty list.
    pub fn focus(&mut self, index: i32) -> Option<ObjectId> {
        if index >= 0 && self.focused_index == Some(index as usize) {
            return self.focused_item().map(Object::object_id);
        }

        let last = self.items.len().checked_sub(1)?;
        let target = if index < 0 {
            self.focused_index.unwrap_or(0)
        } else {
            (index as usize).min(last)
        };

        if let Some(previous) = self.focused_index.and_then(|i| self.items.get_mut(i)) {
            previous.set_active(false);
        }

        let item = self.items.get_mut(target)?;
        item.set_active(true);
        self.focused_index = Some(target);
        tracing::trace!(target: targets::POPUP, index = target, "item focused");
        Some(item.object_id())
    }

    pub fn step_forward(&mut self) -> Option<ObjectId> {
        let target = self.focused_index.map_or(0, |index| index as i32 + 1);
        self.focus(target)
    }

    /// Step back. With no focus yet this lands on the first item, same as
    /// [`step_forward`](Self::step_forward).
    pub fn step_back(&mut self) -> Option<ObjectId> {
        let target = self.focused_index.map_or(0, |index| index as i32 - 1);
        self.focus(target)
    }

    /// Select the focused item and deselect every other one.
    ///
    /// With `trigger_close` the result carries a [`ListBoxRequest::Commit`]
    /// for the owning button. Fails without touching any state when nothing
    /// has focus or the focused item is not selectable.
    pub fn select(&mut self, trigger_close: bool) -> Result<Option<ListBoxRequest>> {
        let index = self.focused_index.ok_or(ListBoxError::NoFocusedItem)?;
        if !self.try_item(index)?.is_selectable() {
            return Err(ListBoxError::NotSelectable { index });
        }

        for (i, item) in self.items.iter_mut().enumerate() {
            item.set_selected(i == index);
        }
        self.selected_index = Some(index);

        tracing::debug!(target: targets::POPUP, index, trigger_close, "item selected");
        Ok(trigger_close.then_some(ListBoxRequest::Commit { index }))
    }

    // =========================================================================
    // Inactivity timeout
    // =========================================================================

    /// Stop the control bar from going idle while the popup is open.
    ///
    /// Calling again while suspended keeps the originally saved timeout.
    pub fn disable_timeout(&mut self, player: &SharedPlayer) {
        if self.inactivity.is_some() {
            tracing::trace!(target: targets::POPUP, "inactivity timeout already suspended");
            return;
        }
        self.inactivity = Some(InactivitySuspension::acquire(SharedPlayer::clone(player)));
    }

    /// Restore the timeout saved by [`disable_timeout`](Self::disable_timeout).
    /// No-op if it was never suspended.
    pub fn re_enable_timeout(&mut self) {
        if let Some(suspension) = self.inactivity.take() {
            suspension.release();
        }
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Arrow navigation inside the popup. Returns `true` if the key was used.
    pub fn handle_key_down(&mut self, event: &mut KeyPressEvent) -> bool {
        match POPUP_KEYS.action(event.key) {
            Some(PopupKeyAction::StepBack) => {
                event.base.accept();
                self.step_back();
                true
            }
            Some(PopupKeyAction::StepForward) => {
                event.base.accept();
                self.step_forward();
                true
            }
            Some(PopupKeyAction::Consume) => {
                event.base.accept();
                true
            }
            None => {
                #[cfg(debug_assertions)]
                tracing::debug!(target: targets::POPUP, key = ?event.key, "key not handled by popup");
                false
            }
        }
    }

    /// Pointer moved onto part of the popup. Items (or their text) take focus.
    pub fn handle_mouse_enter(&mut self, target: HoverTarget) -> bool {
        let index = match target {
            HoverTarget::Item(index) | HoverTarget::ItemText(index) => index,
            HoverTarget::Title | HoverTarget::Popup => return false,
        };
        if index >= self.items.len() {
            return false;
        }
        self.focus(index as i32);
        true
    }

    /// An item lost input focus to `related`.
    ///
    /// Moving between rows of this popup is ignored. Leaving for anything
    /// other than the owning button while it is pressed closes the popup
    /// without stealing focus back.
    pub fn handle_blur(&self, related: Option<ObjectId>, owner_pressed: bool) -> Option<ListBoxRequest> {
        if related.is_some_and(|id| self.owns_element(id)) {
            return None;
        }
        if owner_pressed && related != Some(self.owner) {
            tracing::trace!(target: targets::POPUP, ?related, "focus left popup");
            return Some(ListBoxRequest::Close { return_focus: false });
        }
        None
    }

    /// Close after a tap or click on the item at `index`.
    pub fn handle_tap_click(&self, index: usize) -> Option<ListBoxRequest> {
        let item = self.items.get(index)?;
        Some(ListBoxRequest::Close {
            return_focus: item.returns_focus(),
        })
    }

    /// Full pointer activation of the item at `index`.
    ///
    /// For a selectable item this yields `[Commit, Close]`; anything else
    /// yields nothing.
    pub fn handle_item_click(&mut self, index: usize) -> Vec<ListBoxRequest> {
        let Some(item) = self.items.get_mut(index) else {
            tracing::warn!(target: targets::POPUP, index, "click on unknown item");
            return Vec::new();
        };
        let Some(activated) = item.on_click() else {
            return Vec::new();
        };

        self.focus(activated as i32);
        let mut requests = Vec::with_capacity(2);
        match self.select(true) {
            Ok(request) => requests.extend(request),
            Err(err) => {
                tracing::error!(target: targets::POPUP, %err, index, "item click could not select");
                return requests;
            }
        }
        requests.extend(self.handle_tap_click(activated));
        requests
    }
}

impl Object for ListBox {
    fn object_id(&self) -> ObjectId {
        self.base.id()
    }
}

impl Accessible for ListBox {
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::ListBox
    }

    fn is_accessible_hidden(&self) -> bool {
        self.hidden
    }

    fn accessible_set_size(&self) -> Option<usize> {
        Some(self.items.len())
    }
}
