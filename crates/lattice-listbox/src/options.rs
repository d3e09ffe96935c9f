//! Configuration for listbox buttons.
//!
//! Options deserialize with `#[serde(default)]`, so a host can ship a
//! partial TOML or JSON block and get defaults for the rest.

use serde::{Deserialize, Serialize};

/// Facts about the platform the widget runs on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformInfo {
    /// Touch-first device.
    pub touch: bool,
    /// Running inside an embedded frame.
    pub in_frame: bool,
}

impl PlatformInfo {
    /// Moving focus into a popup inside a frame on touch devices scrolls the
    /// host page, so it is skipped there.
    pub fn suppresses_popup_focus(&self) -> bool {
        self.touch && self.in_frame
    }
}

/// Options for a [`ListBoxButton`](crate::widgets::ListBoxButton).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListBoxButtonOptions {
    /// Header row text; adds one to the hide threshold.
    pub title: Option<String>,
    /// Accessible name of the button.
    pub control_text: String,
    /// Render the popup inline instead of as a floating popup.
    pub inline: bool,
    /// Hide the button when it has this many selectable items or fewer.
    pub hide_threshold: usize,
    /// Move input focus into the popup when it opens.
    pub focus_popup_on_open: bool,
    pub platform: PlatformInfo,
}

impl Default for ListBoxButtonOptions {
    fn default() -> Self {
        Self {
            title: None,
            control_text: String::new(),
            inline: false,
            hide_threshold: 0,
            focus_popup_on_open: true,
            platform: PlatformInfo::default(),
        }
    }
}

impl ListBoxButtonOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_control_text(mut self, text: impl Into<String>) -> Self {
        self.control_text = text.into();
        self
    }

    pub fn with_inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }

    pub fn with_hide_threshold(mut self, threshold: usize) -> Self {
        self.hide_threshold = threshold;
        self
    }

    pub fn with_focus_popup_on_open(mut self, focus: bool) -> Self {
        self.focus_popup_on_open = focus;
        self
    }

    pub fn with_platform(mut self, platform: PlatformInfo) -> Self {
        self.platform = platform;
        self
    }

    /// Effective threshold, counting the title row. Saturates at `usize::MAX`.
    pub fn effective_hide_threshold(&self) -> usize {
        self.hide_threshold.saturating_add(usize::from(self.title.is_some()))
    }
}
