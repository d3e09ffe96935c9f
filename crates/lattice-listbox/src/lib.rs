//! Lattice ListBox - accessible dropdowns for media player control bars.
//!
//! A [`ListBoxButton`] (ARIA combobox) toggles a [`ListBox`] popup (ARIA
//! listbox) of [`ListBoxItem`]s. Keyboard, pointer and focus input flows in
//! through [`ListBoxEvent`]; state flows out as [`AriaAttributes`], class
//! lists, signals and, with the `accessibility` feature, AccessKit nodes.
//!
//! # Example
//!
//! ```
//! use lattice_listbox::prelude::*;
//!
//! let player = MediaPlayerState::shared(MediaPlayerConfig::default());
//! let mut rate = PlaybackRateButton::new(player.clone());
//!
//! rate.button_mut().event(&mut ListBoxEvent::Click);
//! assert!(rate.button().is_pressed());
//!
//! let mut up = KeyPressEvent::from_dom_key("ArrowUp");
//! rate.button_mut().handle_key_down(&mut up);
//! let mut enter = KeyPressEvent::from_dom_key("Enter");
//! rate.button_mut().handle_key_down(&mut enter);
//!
//! assert_eq!(player.playback_rate(), 1.5);
//! assert_eq!(rate.button().value_text(), "1.5x");
//! ```

pub use lattice_listbox_core::*;

pub mod accessibility;
pub mod class_list;
pub mod error;
pub mod events;
pub mod keyboard;
pub mod listener;
pub mod options;
pub mod player;
pub mod widgets;

pub use accessibility::{Accessible, AccessibleRole, AriaAttributes};
pub use class_list::ClassList;
pub use error::{ListBoxError, Result};
pub use events::{HoverTarget, Key, KeyPressEvent, KeyReleaseEvent, ListBoxEvent};
pub use listener::{DocumentListeners, ListenerGuard};
pub use options::{ListBoxButtonOptions, PlatformInfo};
pub use player::{
    InactivitySuspension, MediaPlayerConfig, MediaPlayerState, PlayerContext, SharedPlayer,
};
pub use widgets::{
    ItemSync, ListBox, ListBoxButton, ListBoxDelegate, ListBoxItem, ListBoxItemOptions,
    ListBoxRequest, ListBoxSelection, ListBoxTitle, PlaybackRateButton, PlaybackRateDelegate,
};

/// Common imports.
pub mod prelude {
    pub use crate::accessibility::Accessible;
    pub use crate::events::{Key, KeyPressEvent, KeyReleaseEvent, ListBoxEvent};
    pub use crate::options::ListBoxButtonOptions;
    pub use crate::player::{MediaPlayerConfig, MediaPlayerState, PlayerContext, SharedPlayer};
    pub use crate::widgets::{
        ListBoxButton, ListBoxDelegate, ListBoxItem, ListBoxItemOptions, PlaybackRateButton,
    };
}
