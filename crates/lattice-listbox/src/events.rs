//! Input events consumed by the listbox widgets.
//!
//! Hosts translate their native pointer, keyboard and focus notifications
//! into [`ListBoxEvent`]s and feed them to
//! [`ListBoxButton::event`](crate::widgets::ListBoxButton::event).

use lattice_listbox_core::ObjectId;

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held.
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Check if no modifiers are pressed.
    pub fn none(&self) -> bool {
        !self.shift && !self.control && !self.alt && !self.meta
    }
}

/// Common data for all widget events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventBase {
    accepted: bool,
}

impl EventBase {
    pub fn new() -> Self {
        Self { accepted: false }
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Accept the event. Hosts should suppress the platform default action.
    pub fn accept(&mut self) {
        self.accepted = true;
    }

    /// Ignore the event, allowing further propagation.
    pub fn ignore(&mut self) {
        self.accepted = false;
    }
}

/// Keys the listbox family reacts to.
///
/// Anything else arrives as [`Key::Character`] or [`Key::Unknown`] and is
/// passed through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Enter,
    Space,
    Tab,
    Escape,
    Home,
    End,
    PageUp,
    PageDown,
    /// A single printable character.
    Character(char),
    /// A named key with no meaning to the listbox.
    Unknown,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value to a key.
    ///
    /// Accepts the legacy names some engines still report (`"Up"`, `"Esc"`,
    /// `"Spacebar"`) alongside the standard ones.
    pub fn from_dom_key(name: &str) -> Self {
        match name {
            "ArrowUp" | "Up" => Key::ArrowUp,
            "ArrowDown" | "Down" => Key::ArrowDown,
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "Enter" | "Return" => Key::Enter,
            " " | "Spacebar" | "Space" => Key::Space,
            "Tab" => Key::Tab,
            "Escape" | "Esc" => Key::Escape,
            "Home" => Key::Home,
            "End" => Key::End,
            "PageUp" => Key::PageUp,
            "PageDown" => Key::PageDown,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Character(c),
                    _ => Key::Unknown,
                }
            }
        }
    }

    /// Whether this is one of the four arrow keys.
    pub fn is_arrow(&self) -> bool {
        matches!(
            self,
            Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight
        )
    }
}

/// Key press event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPressEvent {
    /// Base event data.
    pub base: EventBase,
    /// The key that was pressed.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
    /// Whether this is a key repeat event (key held down).
    pub is_repeat: bool,
}

impl KeyPressEvent {
    pub fn new(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self {
            base: EventBase::new(),
            key,
            modifiers,
            is_repeat: false,
        }
    }

    /// Build an unmodified press from a DOM key name.
    pub fn from_dom_key(name: &str) -> Self {
        Self::new(Key::from_dom_key(name), KeyboardModifiers::NONE)
    }
}

/// Key release event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyReleaseEvent {
    /// Base event data.
    pub base: EventBase,
    /// The key that was released.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl KeyReleaseEvent {
    pub fn new(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self {
            base: EventBase::new(),
            key,
            modifiers,
        }
    }

    pub fn from_dom_key(name: &str) -> Self {
        Self::new(Key::from_dom_key(name), KeyboardModifiers::NONE)
    }
}

/// Where the pointer entered inside an open popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoverTarget {
    /// The item row itself.
    Item(usize),
    /// The text span nested inside an item row.
    ItemText(usize),
    /// The non-selectable title row.
    Title,
    /// Popup padding outside any row.
    Popup,
}

/// Every event the trigger button and its popup react to.
#[derive(Debug, Clone, PartialEq)]
pub enum ListBoxEvent {
    /// Click on the trigger button.
    Click,
    /// Tap on the trigger button (touch platforms).
    Tap,
    /// Key press while the trigger button has input focus.
    KeyPress(KeyPressEvent),
    /// Key press while focus is inside the popup.
    PopupKeyPress(KeyPressEvent),
    /// Key release seen by the document-level listener.
    DocumentKeyRelease(KeyReleaseEvent),
    /// Pointer entered the button wrapper.
    MouseEnter,
    /// Pointer left the button wrapper.
    MouseLeave,
    /// Pointer entered part of the popup.
    PopupHover(HoverTarget),
    /// Click or tap on the item at `index`.
    ItemClick(usize),
    /// An item lost input focus; `related` is where focus went, if anywhere.
    ItemBlur { related: Option<ObjectId> },
}
