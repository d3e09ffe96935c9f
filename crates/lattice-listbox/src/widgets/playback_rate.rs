//! Playback-rate menu built on [`ListBoxButton`].
//!
//! Lists the player's rates fastest first (`"2x"`, `"1.5x"`, `"1x"`, ...),
//! marks the current one selected and applies a picked rate to the player.
//! The button shows the current rate as its value and hides itself when the
//! loaded media cannot change rate.

use std::sync::{Arc, Weak};

use lattice_listbox_core::ConnectionGuard;
use lattice_listbox_core::logging::targets;

use crate::class_list::class_names;
use crate::options::ListBoxButtonOptions;
use crate::player::{PlayerContext, SharedPlayer};

use super::list_box_button::{ListBoxButton, ListBoxDelegate};
use super::list_box_item::{ItemSync, ListBoxItem, ListBoxItemOptions};

/// Accessible name of the playback-rate button.
pub const CONTROL_TEXT: &str = "Playback Rate";

/// Label for a rate: `1.5` becomes `"1.5x"`, `1.0` becomes `"1x"`.
pub fn format_rate(rate: f64) -> String {
    format!("{rate}x")
}

/// Parse a rate with or without the trailing `x`.
pub fn parse_rate(text: &str) -> Option<f64> {
    let text = text.trim();
    let number = text.strip_suffix('x').unwrap_or(text);
    number.parse().ok().filter(|rate: &f64| rate.is_finite())
}

/// Keeps an item selected exactly when the player runs at its rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackRateItem {
    pub rate: f64,
}

impl ItemSync for PlaybackRateItem {
    fn is_current(&self, player: &dyn PlayerContext) -> bool {
        (player.playback_rate() - self.rate).abs() < f64::EPSILON
    }
}

/// Delegate that fills a [`ListBoxButton`] with playback rates.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaybackRateDelegate;

impl ListBoxDelegate for PlaybackRateDelegate {
    fn create_items(&self, player: &dyn PlayerContext) -> Vec<ListBoxItem> {
        player
            .playback_rates()
            .into_iter()
            .rev()
            .map(|rate| {
                let sync = PlaybackRateItem { rate };
                let options = ListBoxItemOptions::new(format_rate(rate))
                    .with_value(rate.to_string())
                    .with_selected(sync.is_current(player));
                ListBoxItem::new(options).with_sync(sync)
            })
            .collect()
    }

    fn handle_selection(&mut self, item: &ListBoxItem, player: &dyn PlayerContext) {
        match parse_rate(item.value()) {
            Some(rate) => player.set_playback_rate(rate),
            None => tracing::warn!(
                target: targets::PLAYER,
                value = item.value(),
                "selected item is not a playback rate"
            ),
        }
    }

    fn build_css_class(&self) -> String {
        class_names::PLAYBACK_RATE.to_owned()
    }

    fn build_wrapper_css_class(&self) -> String {
        class_names::PLAYBACK_RATE.to_owned()
    }
}

/// The playback-rate dropdown.
#[derive(Debug)]
pub struct PlaybackRateButton {
    button: ListBoxButton,
    /// Rates the current popup was built from.
    rates: Vec<f64>,
    _rate_connection: Option<ConnectionGuard<f64>>,
}

impl PlaybackRateButton {
    pub fn new(player: SharedPlayer) -> Self {
        Self::with_options(player, ListBoxButtonOptions::new())
    }

    /// Build with custom options. An empty control text falls back to
    /// [`CONTROL_TEXT`].
    pub fn with_options(player: SharedPlayer, mut options: ListBoxButtonOptions) -> Self {
        if options.control_text.is_empty() {
            options.control_text = CONTROL_TEXT.to_owned();
        }

        let rates = player.playback_rates();
        let button = ListBoxButton::new(Box::new(PlaybackRateDelegate), player.clone(), options);

        let rate_connection = player.rate_changed_signal().map(|signal| {
            let value_text = button.value_text_handle();
            let weak: Weak<dyn PlayerContext> = Arc::downgrade(&player);
            signal.connect_scoped(move |rate| {
                let supported = weak.upgrade().is_some_and(|p| rate_supported(p.as_ref()));
                if supported {
                    value_text.set(format_rate(*rate));
                }
            })
        });

        let mut this = Self {
            button,
            rates,
            _rate_connection: rate_connection,
        };
        this.update_visibility();
        this
    }

    pub fn button(&self) -> &ListBoxButton {
        &self.button
    }

    pub fn button_mut(&mut self) -> &mut ListBoxButton {
        &mut self.button
    }

    /// Whether the player can change rate and offers at least one rate.
    pub fn playback_rate_supported(&self) -> bool {
        rate_supported(self.button.player().as_ref())
    }

    /// Show the menu when rates are supported, hide it otherwise.
    ///
    /// The popup is only rebuilt when the offered rates changed, so an open
    /// menu stays open across a reload with the same rates.
    pub fn update_visibility(&mut self) {
        if self.playback_rate_supported() {
            let rates = self.button.player().playback_rates();
            if rates == self.rates {
                let hidden = self.button.popup().selectable_count() <= self.button.hide_threshold();
                self.button.set_hidden(hidden);
            } else {
                tracing::debug!(target: targets::PLAYER, ?rates, "playback rates changed, rebuilding menu");
                self.button.update();
                self.rates = rates;
            }
            self.update_rate();
        } else {
            self.button.set_hidden(true);
            tracing::debug!(target: targets::PLAYER, "playback rate not supported, button hidden");
        }
    }

    /// A new source started loading; its capabilities may differ.
    pub fn on_load_start(&mut self) {
        self.update_visibility();
    }

    /// Refresh the value text from the player's current rate.
    pub fn update_rate(&self) {
        if self.playback_rate_supported() {
            let rate = self.button.player().playback_rate();
            self.button.set_value_text(format_rate(rate));
        }
    }
}

fn rate_supported(player: &dyn PlayerContext) -> bool {
    player.supports_playback_rate() && !player.playback_rates().is_empty()
}
