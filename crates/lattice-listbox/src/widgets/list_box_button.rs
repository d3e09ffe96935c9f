//! Trigger button of a listbox dropdown.
//!
//! [`ListBoxButton`] is the combobox element of the pattern. It owns the
//! [`ListBox`] popup, opens and closes it, routes keyboard input to it and
//! applies the [`ListBoxRequest`]s it sends back. What the items are and what
//! selecting one means is left to a [`ListBoxDelegate`].
//!
//! # States
//!
//! The button is either CLOSED (`pressed == false`, popup hidden) or OPEN
//! (`pressed == true`, popup shown with its showing-lock engaged and the
//! player's inactivity timeout suspended). A disabled button stays CLOSED.
//!
//! # Example
//!
//! ```ignore
//! use lattice_listbox::widgets::{ListBoxButton, ListBoxDelegate};
//!
//! let mut button = ListBoxButton::new(Box::new(MyDelegate), player, options);
//! button.selection_committed.connect(|selection| {
//!     println!("picked {}", selection.label);
//! });
//!
//! button.event(&mut ListBoxEvent::Click);
//! assert!(button.is_pressed());
//! ```

use std::fmt;
use std::sync::Arc;

use lattice_listbox_core::logging::targets;
use lattice_listbox_core::{
    Object, ObjectBase, ObjectId, PerfSpan, Property, Signal, global_registry,
};

use crate::accessibility::{Accessible, AccessibleRole, dom_id};
use crate::class_list::{ClassList, class_names};
use crate::error::Result;
use crate::events::{HoverTarget, Key, KeyPressEvent, KeyReleaseEvent, ListBoxEvent};
use crate::keyboard::{BUTTON_KEYS, ButtonKeyAction, SUBMENU_KEYS, SubmenuKeyAction};
use crate::listener::{DocumentListeners, ListenerGuard};
use crate::options::ListBoxButtonOptions;
use crate::player::{PlayerContext, SharedPlayer};

use super::list_box::{ListBox, ListBoxRequest};
use super::list_box_item::ListBoxItem;

// ============================================================================
// Delegate
// ============================================================================

/// Supplies the items of a [`ListBoxButton`] and reacts to selections.
pub trait ListBoxDelegate: Send + Sync {
    /// Build the popup's items. Called on construction and every
    /// [`ListBoxButton::update`].
    fn create_items(&self, player: &dyn PlayerContext) -> Vec<ListBoxItem>;

    /// Apply a committed selection.
    fn handle_selection(&mut self, item: &ListBoxItem, player: &dyn PlayerContext) {
        let _ = player;
        tracing::error!(
            target: targets::BUTTON,
            item = item.label(),
            "list box delegate does not implement handle_selection"
        );
    }

    /// Extra classes for the button element.
    fn build_css_class(&self) -> String {
        String::new()
    }

    /// Extra classes for the wrapper element.
    fn build_wrapper_css_class(&self) -> String {
        String::new()
    }
}

/// Payload of [`ListBoxButton::selection_committed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListBoxSelection {
    pub index: usize,
    pub label: String,
    pub value: String,
}

// ============================================================================
// ListBoxButton
// ============================================================================

/// The trigger of a listbox dropdown.
pub struct ListBoxButton {
    base: ObjectBase,
    delegate: Box<dyn ListBoxDelegate>,
    player: SharedPlayer,
    options: ListBoxButtonOptions,
    popup: ListBox,
    pressed: Property<bool>,
    enabled: bool,
    hidden: bool,
    hover: bool,
    hide_threshold: usize,
    input_focus: Option<ObjectId>,
    listeners: DocumentListeners,
    document_listener: Option<ListenerGuard>,
    value_text: Arc<Property<String>>,
    classes: ClassList,
    button_classes: ClassList,

    /// Emitted when the popup opens (`true`) or closes (`false`).
    pub pressed_changed: Signal<bool>,
    /// Emitted after the delegate handled a committed selection.
    pub selection_committed: Signal<ListBoxSelection>,
}

impl ListBoxButton {
    /// Create a button and build its popup.
    pub fn new(
        delegate: Box<dyn ListBoxDelegate>,
        player: SharedPlayer,
        options: ListBoxButtonOptions,
    ) -> Self {
        let base = ObjectBase::new::<Self>();
        let popup = ListBox::new(base.id());

        let mut classes = ClassList::parse(&delegate.build_wrapper_css_class());
        classes.add(class_names::MENU_BUTTON);
        classes.add(if options.inline {
            class_names::MENU_BUTTON_INLINE
        } else {
            class_names::MENU_BUTTON_POPUP
        });
        let button_classes = ClassList::parse(&delegate.build_css_class());

        let mut button = Self {
            base,
            delegate,
            player,
            options,
            popup,
            pressed: Property::new(false),
            enabled: true,
            hidden: false,
            hover: false,
            hide_threshold: 0,
            input_focus: None,
            listeners: DocumentListeners::new(),
            document_listener: None,
            value_text: Arc::new(Property::new(String::new())),
            classes,
            button_classes,
            pressed_changed: Signal::new(),
            selection_committed: Signal::new(),
        };
        button.update();
        button
    }

    /// Share a document listener registry with other buttons on the page.
    ///
    /// A live registration moves over to the new registry.
    pub fn with_document_listeners(mut self, listeners: DocumentListeners) -> Self {
        if self.document_listener.take().is_some() {
            self.document_listener = Some(listeners.register(self.base.id()));
        }
        self.listeners = listeners;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn popup(&self) -> &ListBox {
        &self.popup
    }

    pub fn popup_mut(&mut self) -> &mut ListBox {
        &mut self.popup
    }

    pub fn player(&self) -> &SharedPlayer {
        &self.player
    }

    pub fn options(&self) -> &ListBoxButtonOptions {
        &self.options
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed.get()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_hovered(&self) -> bool {
        self.hover
    }

    /// Threshold applied by the last [`update`](Self::update).
    pub fn hide_threshold(&self) -> usize {
        self.hide_threshold
    }

    /// Accessible name of the button.
    pub fn control_text(&self) -> &str {
        &self.options.control_text
    }

    pub fn set_control_text(&mut self, text: impl Into<String>) {
        self.options.control_text = text.into();
    }

    /// Current value shown on the button (e.g. `"1.5x"`).
    pub fn value_text(&self) -> String {
        self.value_text.get()
    }

    pub fn set_value_text(&self, text: impl Into<String>) {
        self.value_text.set(text.into());
    }

    /// Shared handle to the value text, for slots that update it.
    pub fn value_text_handle(&self) -> Arc<Property<String>> {
        Arc::clone(&self.value_text)
    }

    /// Classes of the wrapper element.
    pub fn classes(&self) -> &ClassList {
        &self.classes
    }

    /// Classes of the button element.
    pub fn button_classes(&self) -> &ClassList {
        &self.button_classes
    }

    pub fn dom_id(&self) -> String {
        dom_id(self.base.id())
    }

    /// Element that currently has input focus, as far as this widget knows.
    pub fn input_focus(&self) -> Option<ObjectId> {
        self.input_focus
    }

    pub fn has_focus(&self) -> bool {
        self.input_focus == Some(self.base.id())
    }

    /// The item announced via `aria-activedescendant`: the popup's focused
    /// item while open, nothing while closed.
    pub fn active_descendant(&self) -> Option<ObjectId> {
        if self.is_pressed() {
            self.popup.focused_item().map(Object::object_id)
        } else {
            None
        }
    }

    pub fn is_document_listener_registered(&self) -> bool {
        self.document_listener.is_some()
    }

    // =========================================================================
    // Popup lifecycle
    // =========================================================================

    /// Rebuild the popup from the delegate and reapply visibility.
    ///
    /// The old popup is dropped, which destroys its rows and restores any
    /// inactivity timeout it had suspended.
    pub fn update(&mut self) {
        let _span = PerfSpan::new("list_box_button::update");

        let popup = self.create_menu();
        drop(std::mem::replace(&mut self.popup, popup));
        self.set_pressed(false);
        self.input_focus = self.input_focus.filter(|id| global_registry().contains(*id));

        let count = self.popup.selectable_count();
        self.set_hidden(count <= self.hide_threshold);
        tracing::debug!(
            target: targets::BUTTON,
            items = count,
            threshold = self.hide_threshold,
            hidden = self.hidden,
            "popup rebuilt"
        );
    }

    fn create_menu(&mut self) -> ListBox {
        let mut popup = ListBox::new(self.base.id());
        self.hide_threshold = self.options.effective_hide_threshold();

        if let Some(title) = &self.options.title
            && let Err(err) = popup.set_title(title)
        {
            tracing::warn!(target: targets::BUTTON, %err, "could not add popup title");
        }

        for item in self.delegate.create_items(self.player.as_ref()) {
            if let Err(err) = popup.add_item(item) {
                tracing::error!(target: targets::BUTTON, %err, "could not add popup item");
            }
        }
        popup
    }

    /// Show or hide the whole widget.
    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
        self.classes.toggle(class_names::HIDDEN, hidden);
    }

    fn set_pressed(&mut self, pressed: bool) {
        if self.pressed.set(pressed) {
            tracing::trace!(target: targets::BUTTON, pressed, "pressed changed");
            self.pressed_changed.emit(pressed);
        }
    }

    /// Open the popup.
    pub fn press_button(&mut self) {
        if !self.enabled {
            tracing::trace!(target: targets::BUTTON, "press ignored while disabled");
            return;
        }

        self.set_pressed(true);
        let active = self.popup.show(self.player.as_ref());
        tracing::trace!(target: targets::BUTTON, active = ?active, "popup opened");
        self.popup.lock_showing();
        self.popup.disable_timeout(&self.player);

        if !self.options.focus_popup_on_open {
            return;
        }
        if self.options.platform.suppresses_popup_focus() {
            tracing::trace!(target: targets::BUTTON, "popup focus skipped on framed touch device");
            return;
        }
        self.input_focus = Some(
            self.popup
                .focused_item()
                .map_or(self.popup.object_id(), Object::object_id),
        );
    }

    /// Close the popup, refocusing the button unless `skip_focus`.
    pub fn unpress_button(&mut self, skip_focus: bool) {
        if !self.enabled {
            return;
        }

        self.set_pressed(false);
        self.popup.unlock_showing();
        self.popup.hide();
        self.popup.re_enable_timeout();

        if !skip_focus {
            self.focus();
        }
    }

    /// Toggle open/closed.
    pub fn handle_click(&mut self) {
        if self.is_pressed() {
            self.unpress_button(false);
        } else {
            self.press_button();
        }
    }

    /// Run the delegate's selection handling for the item at `index`.
    pub fn handle_selection(&mut self, index: usize) -> Result<()> {
        let item = self.popup.try_item(index)?;
        self.delegate.handle_selection(item, self.player.as_ref());

        let selection = ListBoxSelection {
            index,
            label: item.label().to_owned(),
            value: item.value().to_owned(),
        };
        self.selection_committed.emit(selection);
        Ok(())
    }

    /// Apply requests produced by the popup, in order.
    ///
    /// Commits run the selection handling; the popup is then closed once,
    /// honouring the last close request's focus preference. Returns `true`
    /// if anything was applied.
    pub fn apply_requests(&mut self, requests: impl IntoIterator<Item = ListBoxRequest>) -> bool {
        let mut close = None;
        for request in requests {
            match request {
                ListBoxRequest::Commit { index } => {
                    if let Err(err) = self.handle_selection(index) {
                        tracing::error!(target: targets::BUTTON, %err, index, "selection handling failed");
                    }
                    close.get_or_insert(true);
                }
                ListBoxRequest::Close { return_focus } => close = Some(return_focus),
            }
        }

        match close {
            Some(return_focus) => {
                self.unpress_button(!return_focus);
                true
            }
            None => false,
        }
    }

    /// Commit the focused item and close.
    fn commit_focused(&mut self) {
        match self.popup.select(true) {
            Ok(request) => {
                self.apply_requests(request);
            }
            Err(err) => {
                tracing::error!(target: targets::BUTTON, %err, "could not commit focused item");
                self.unpress_button(false);
            }
        }
    }

    /// Disable the button. Closes the popup first.
    pub fn disable(&mut self) {
        self.unpress_button(false);
        self.enabled = false;
        self.classes.add(class_names::DISABLED);
    }

    pub fn enable(&mut self) {
        self.enabled = true;
        self.classes.remove(class_names::DISABLED);
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Give input focus to the button element.
    pub fn focus(&mut self) {
        self.input_focus = Some(self.base.id());
    }

    pub fn blur(&mut self) {
        if self.has_focus() {
            self.input_focus = None;
        }
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    /// Keys pressed while the button element has focus.
    pub fn handle_key_down(&mut self, event: &mut KeyPressEvent) -> bool {
        let Some(action) = BUTTON_KEYS.action(event.key) else {
            #[cfg(debug_assertions)]
            tracing::debug!(target: targets::BUTTON, key = ?event.key, "key not handled by list box button");
            return false;
        };

        match action {
            ButtonKeyAction::Leave => {
                if self.is_pressed() {
                    self.unpress_button(true);
                }
                false
            }
            ButtonKeyAction::Dismiss => {
                if self.is_pressed() {
                    self.unpress_button(false);
                }
                event.base.accept();
                self.focus();
                true
            }
            ButtonKeyAction::OpenStepForward | ButtonKeyAction::OpenStepBack => {
                event.base.accept();
                if !self.is_pressed() {
                    self.press_button();
                }
                if self.is_pressed() {
                    if action == ButtonKeyAction::OpenStepForward {
                        self.popup.step_forward();
                    } else {
                        self.popup.step_back();
                    }
                }
                true
            }
            ButtonKeyAction::Activate => {
                event.base.accept();
                if self.is_pressed() {
                    self.commit_focused();
                } else {
                    self.press_button();
                }
                true
            }
        }
    }

    /// Keys pressed while focus is somewhere inside the popup, after the
    /// popup's own handler declined them.
    pub fn handle_submenu_key_down(&mut self, event: &mut KeyPressEvent) -> bool {
        match SUBMENU_KEYS.action(event.key) {
            Some(SubmenuKeyAction::Leave) => {
                if self.is_pressed() {
                    self.unpress_button(true);
                }
                false
            }
            Some(SubmenuKeyAction::Dismiss) => {
                if self.is_pressed() {
                    self.unpress_button(false);
                }
                event.base.accept();
                self.focus();
                true
            }
            None => false,
        }
    }

    /// Keys pressed while focus is inside the popup.
    pub fn handle_popup_key_down(&mut self, event: &mut KeyPressEvent) -> bool {
        if !self.accepts_popup_input() {
            return false;
        }
        if self.popup.handle_key_down(event) {
            return true;
        }
        self.handle_submenu_key_down(event)
    }

    /// Key released anywhere on the page while the document listener is
    /// registered. Tab or Escape closes a hover-opened popup.
    pub fn handle_document_key_up(&mut self, event: &mut KeyReleaseEvent) -> bool {
        if self.document_listener.is_none() || !matches!(event.key, Key::Tab | Key::Escape) {
            return false;
        }
        self.unpress_button(true);
        self.document_listener = None;
        event.base.accept();
        true
    }

    // =========================================================================
    // Pointer
    // =========================================================================

    pub fn handle_mouse_enter(&mut self) {
        self.hover = true;
        self.classes.add(class_names::HOVER);
        if !self.is_pressed() {
            self.press_button();
        }
        if self.document_listener.is_none() {
            self.document_listener = Some(self.listeners.register(self.base.id()));
        }
    }

    pub fn handle_mouse_leave(&mut self) {
        self.hover = false;
        self.classes.remove(class_names::HOVER);
        self.unpress_button(true);
        self.document_listener = None;
    }

    /// Pointer activation of the popup item at `index`.
    pub fn handle_item_click(&mut self, index: usize) -> bool {
        if !self.accepts_popup_input() {
            return false;
        }
        let requests = self.popup.handle_item_click(index);
        self.apply_requests(requests)
    }

    /// An item lost input focus to `related`.
    pub fn handle_item_blur(&mut self, related: Option<ObjectId>) -> bool {
        self.input_focus = related;
        let request = self.popup.handle_blur(related, self.is_pressed());
        self.apply_requests(request)
    }

    pub fn handle_popup_hover(&mut self, target: HoverTarget) -> bool {
        self.accepts_popup_input() && self.popup.handle_mouse_enter(target)
    }

    /// Input routed to popup rows only counts while the popup is open.
    fn accepts_popup_input(&self) -> bool {
        if self.enabled && self.is_pressed() {
            return true;
        }
        tracing::trace!(target: targets::BUTTON, enabled = self.enabled, "popup input ignored while closed");
        false
    }

    /// Release listeners and close. Dropping the button does the rest.
    pub fn dispose(&mut self) {
        self.handle_mouse_leave();
        self.blur();
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Route an input event. Returns `true` if it was handled.
    pub fn event(&mut self, event: &mut ListBoxEvent) -> bool {
        match event {
            ListBoxEvent::Click | ListBoxEvent::Tap => {
                self.handle_click();
                true
            }
            ListBoxEvent::KeyPress(e) => self.handle_key_down(e),
            ListBoxEvent::PopupKeyPress(e) => self.handle_popup_key_down(e),
            ListBoxEvent::DocumentKeyRelease(e) => self.handle_document_key_up(e),
            ListBoxEvent::MouseEnter => {
                self.handle_mouse_enter();
                true
            }
            ListBoxEvent::MouseLeave => {
                self.handle_mouse_leave();
                true
            }
            ListBoxEvent::PopupHover(target) => self.handle_popup_hover(*target),
            ListBoxEvent::ItemClick(index) => self.handle_item_click(*index),
            ListBoxEvent::ItemBlur { related } => self.handle_item_blur(*related),
        }
    }

    /// AccessKit nodes for the button, popup and rows.
    #[cfg(feature = "accessibility")]
    pub fn accessibility_nodes(&self) -> Vec<(accesskit::NodeId, accesskit::Node)> {
        use crate::accessibility::object_id_to_node_id;

        let rows: Vec<ObjectId> = self
            .popup
            .title()
            .map(Object::object_id)
            .into_iter()
            .chain(self.popup.items().iter().map(Object::object_id))
            .collect();

        let mut nodes = Vec::with_capacity(rows.len() + 2);
        nodes.push((
            object_id_to_node_id(self.base.id()),
            self.build_accessible_node(&[self.popup.object_id()]),
        ));
        nodes.push((
            object_id_to_node_id(self.popup.object_id()),
            self.popup.build_accessible_node(&rows),
        ));
        if let Some(title) = self.popup.title() {
            nodes.push((object_id_to_node_id(title.object_id()), title.build_accessible_node(&[])));
        }
        for item in self.popup.items() {
            nodes.push((object_id_to_node_id(item.object_id()), item.build_accessible_node(&[])));
        }
        nodes
    }
}

impl Object for ListBoxButton {
    fn object_id(&self) -> ObjectId {
        self.base.id()
    }
}

impl Accessible for ListBoxButton {
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::ComboBox
    }

    fn accessible_name(&self) -> Option<String> {
        let text = self.control_text();
        (!text.is_empty()).then(|| text.to_owned())
    }

    fn accessible_value(&self) -> Option<String> {
        let value = self.value_text();
        (!value.is_empty()).then_some(value)
    }

    fn is_accessible_expanded(&self) -> Option<bool> {
        Some(self.is_pressed())
    }

    fn accessible_popup_role(&self) -> Option<AccessibleRole> {
        Some(AccessibleRole::ListBox)
    }

    fn accessible_controls(&self) -> Vec<ObjectId> {
        vec![self.popup.object_id()]
    }

    fn accessible_active_descendant(&self) -> Option<ObjectId> {
        self.active_descendant()
    }

    fn is_accessible_disabled(&self) -> bool {
        !self.enabled
    }

    fn is_accessible_hidden(&self) -> bool {
        self.hidden
    }

    fn is_accessible_clickable(&self) -> bool {
        self.enabled
    }
}

impl fmt::Debug for ListBoxButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListBoxButton")
            .field("id", &self.base.id())
            .field("pressed", &self.is_pressed())
            .field("enabled", &self.enabled)
            .field("hidden", &self.hidden)
            .field("popup", &self.popup)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(ListBoxButton: Send, Sync);
