//! Style class bookkeeping.
//!
//! The widgets do not render. They keep a [`ClassList`] per element so the
//! host's stylesheet can react to state (`is-selected`, `is-hidden`, ...).

use std::fmt;

/// Class names applied by the widgets.
pub mod class_names {
    pub const MENU_BUTTON: &str = "menu-button";
    pub const MENU_BUTTON_POPUP: &str = "menu-button-popup";
    pub const MENU_BUTTON_INLINE: &str = "menu-button-inline";
    pub const MENU: &str = "menu";
    pub const MENU_ITEM: &str = "menu-item";
    pub const MENU_TITLE: &str = "menu-title";
    pub const SELECTED: &str = "is-selected";
    pub const ACTIVE: &str = "is-active";
    pub const HIDDEN: &str = "is-hidden";
    pub const HOVER: &str = "is-hover";
    pub const DISABLED: &str = "is-disabled";
    pub const LOCK_SHOWING: &str = "lock-showing";
    pub const PLAYBACK_RATE: &str = "playback-rate";
}

/// An ordered set of class names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    classes: Vec<String>,
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whitespace separated class string, skipping duplicates.
    pub fn parse(classes: &str) -> Self {
        let mut list = Self::new();
        for class in classes.split_whitespace() {
            list.add(class);
        }
        list
    }

    /// Add a class. Returns `false` if it was already present.
    pub fn add(&mut self, class: &str) -> bool {
        if class.is_empty() || self.contains(class) {
            return false;
        }
        self.classes.push(class.to_owned());
        true
    }

    /// Remove a class. Returns `false` if it was absent.
    pub fn remove(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        self.classes.len() != before
    }

    /// Add or remove `class` depending on `on`.
    pub fn toggle(&mut self, class: &str, on: bool) {
        if on {
            self.add(class);
        } else {
            self.remove(class);
        }
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.classes.join(" "))
    }
}
