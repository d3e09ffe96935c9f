//! Listbox widgets.
//!
//! - [`ListBoxItem`]: one option in the popup
//! - [`ListBox`]: the popup list
//! - [`ListBoxButton`]: the trigger button (combobox)
//! - [`PlaybackRateButton`]: a ready-made playback-rate dropdown

mod list_box;
mod list_box_button;
mod list_box_item;
mod playback_rate;

pub use list_box::{ListBox, ListBoxRequest};
pub use list_box_button::{ListBoxButton, ListBoxDelegate, ListBoxSelection};
pub use list_box_item::{ItemSync, ListBoxItem, ListBoxItemOptions, ListBoxTitle};
pub use playback_rate::{
    CONTROL_TEXT as PLAYBACK_RATE_CONTROL_TEXT, PlaybackRateButton, PlaybackRateDelegate,
    PlaybackRateItem, format_rate, parse_rate,
};
