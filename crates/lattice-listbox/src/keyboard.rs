//! Key to action tables.
//!
//! Each handler in the listbox family looks its key up in a static table
//! instead of matching on raw keys, so the bindings can be read (and tested)
//! in one place.

use crate::events::Key;

/// Actions of the popup's own key handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupKeyAction {
    StepBack,
    StepForward,
    /// Swallow the key so the platform does not scroll or submit.
    Consume,
}

/// Actions of the trigger button's key handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKeyAction {
    /// Focus is about to leave; close without refocusing.
    Leave,
    /// Close and keep focus on the button.
    Dismiss,
    OpenStepForward,
    OpenStepBack,
    /// Open when closed, otherwise commit the focused item.
    Activate,
}

/// Actions of the key handler that runs while focus is inside the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmenuKeyAction {
    Leave,
    Dismiss,
}

/// A static key binding table.
#[derive(Debug, Clone, Copy)]
pub struct KeyMap<A: 'static> {
    bindings: &'static [(Key, A)],
}

impl<A: Copy> KeyMap<A> {
    pub const fn new(bindings: &'static [(Key, A)]) -> Self {
        Self { bindings }
    }

    /// The action bound to `key`, if any.
    pub fn action(&self, key: Key) -> Option<A> {
        self.bindings
            .iter()
            .find(|(bound, _)| *bound == key)
            .map(|(_, action)| *action)
    }

    pub fn bindings(&self) -> &'static [(Key, A)] {
        self.bindings
    }
}

/// Up and Right move back; Down and Left move forward.
pub const POPUP_KEYS: KeyMap<PopupKeyAction> = KeyMap::new(&[
    (Key::ArrowUp, PopupKeyAction::StepBack),
    (Key::ArrowRight, PopupKeyAction::StepBack),
    (Key::ArrowDown, PopupKeyAction::StepForward),
    (Key::ArrowLeft, PopupKeyAction::StepForward),
    (Key::Enter, PopupKeyAction::Consume),
    (Key::Space, PopupKeyAction::Consume),
]);

pub const BUTTON_KEYS: KeyMap<ButtonKeyAction> = KeyMap::new(&[
    (Key::Tab, ButtonKeyAction::Leave),
    (Key::Escape, ButtonKeyAction::Dismiss),
    (Key::ArrowDown, ButtonKeyAction::OpenStepForward),
    (Key::ArrowUp, ButtonKeyAction::OpenStepBack),
    (Key::Space, ButtonKeyAction::Activate),
    (Key::Enter, ButtonKeyAction::Activate),
]);

pub const SUBMENU_KEYS: KeyMap<SubmenuKeyAction> = KeyMap::new(&[
    (Key::Tab, SubmenuKeyAction::Leave),
    (Key::Escape, SubmenuKeyAction::Dismiss),
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_bindings() {
        assert_eq!(POPUP_KEYS.action(Key::ArrowRight), Some(PopupKeyAction::StepBack));
        assert_eq!(POPUP_KEYS.action(Key::ArrowLeft), Some(PopupKeyAction::StepForward));
        assert_eq!(POPUP_KEYS.action(Key::Space), Some(PopupKeyAction::Consume));
        assert_eq!(POPUP_KEYS.action(Key::Tab), None);
        assert_eq!(POPUP_KEYS.action(Key::Character('j')), None);
    }

    #[test]
    fn test_button_bindings() {
        assert_eq!(BUTTON_KEYS.action(Key::Enter), Some(ButtonKeyAction::Activate));
        assert_eq!(BUTTON_KEYS.action(Key::ArrowUp), Some(ButtonKeyAction::OpenStepBack));
        assert_eq!(BUTTON_KEYS.action(Key::ArrowLeft), None);
        assert_eq!(BUTTON_KEYS.action(Key::Home), None);
    }

    #[test]
    fn test_submenu_bindings() {
        assert_eq!(SUBMENU_KEYS.bindings().len(), 2);
        assert_eq!(SUBMENU_KEYS.action(Key::Escape), Some(SubmenuKeyAction::Dismiss));
        assert_eq!(SUBMENU_KEYS.action(Key::Enter), None);
    }

    #[test]
    fn test_tables_have_no_duplicate_keys() {
        fn keys<A: Copy + 'static>(map: KeyMap<A>) -> Vec<Key> {
            map.bindings().iter().map(|(key, _)| *key).collect()
        }
        for table in [keys(POPUP_KEYS), keys(BUTTON_KEYS), keys(SUBMENU_KEYS)] {
            for (i, key) in table.iter().enumerate() {
                assert!(!table[i + 1..].contains(key), "{key:?} bound twice");
            }
        }
    }
}
