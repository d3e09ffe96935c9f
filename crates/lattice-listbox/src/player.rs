//! Host player services consumed by the listbox widgets.
//!
//! The widgets never own the media player. They talk to it through
//! [`PlayerContext`], shared as an `Arc<dyn PlayerContext>`, and only touch
//! two concerns: the control-bar inactivity timeout (suspended while a popup
//! is open) and the playback rate (for the playback-rate menu).
//!
//! [`MediaPlayerState`] is an in-memory implementation for hosts that keep
//! player state themselves, and for tests.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use lattice_listbox_core::logging::targets;
use lattice_listbox_core::{Property, Signal};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Services the host media player exposes to the widgets.
///
/// Methods take `&self`; implementations use interior mutability.
pub trait PlayerContext: Send + Sync {
    /// Current control-bar inactivity timeout. Zero means "never go idle".
    fn inactivity_timeout(&self) -> Duration;

    fn set_inactivity_timeout(&self, timeout: Duration);

    /// Mark the user as active (`true`) or let the player go idle (`false`).
    fn set_user_active(&self, active: bool);

    fn playback_rate(&self) -> f64;

    fn set_playback_rate(&self, rate: f64);

    /// Rates offered in the playback-rate menu, in ascending order.
    fn playback_rates(&self) -> Vec<f64>;

    /// Whether the current media technology can change rate at all.
    fn supports_playback_rate(&self) -> bool;

    /// Signal emitted after the playback rate changes, if the host has one.
    fn rate_changed_signal(&self) -> Option<Arc<Signal<f64>>> {
        None
    }
}

/// Shared handle to the host player.
pub type SharedPlayer = Arc<dyn PlayerContext>;

/// Keeps the player's inactivity timeout suspended while alive.
///
/// Acquiring saves the current timeout, sets it to zero and marks the user
/// active. Dropping restores the saved timeout and lets the player go idle
/// again.
#[must_use = "dropping the suspension restores the timeout immediately"]
pub struct InactivitySuspension {
    player: SharedPlayer,
    saved: Duration,
}

impl InactivitySuspension {
    pub fn acquire(player: SharedPlayer) -> Self {
        let saved = player.inactivity_timeout();
        player.set_inactivity_timeout(Duration::ZERO);
        player.set_user_active(true);
        tracing::trace!(target: targets::PLAYER, ?saved, "inactivity timeout suspended");
        Self { player, saved }
    }

    /// The timeout that will be restored.
    pub fn saved_timeout(&self) -> Duration {
        self.saved
    }

    /// Restore the timeout now.
    pub fn release(self) {}
}

impl Drop for InactivitySuspension {
    fn drop(&mut self) {
        self.player.set_inactivity_timeout(self.saved);
        self.player.set_user_active(false);
        tracing::trace!(target: targets::PLAYER, saved = ?self.saved, "inactivity timeout restored");
    }
}

impl fmt::Debug for InactivitySuspension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InactivitySuspension")
            .field("saved", &self.saved)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// In-memory player
// ============================================================================

/// Initial state for [`MediaPlayerState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaPlayerConfig {
    /// Inactivity timeout in milliseconds.
    pub inactivity_timeout_ms: u64,
    pub playback_rates: Vec<f64>,
    pub supports_playback_rate: bool,
    pub playback_rate: f64,
}

impl Default for MediaPlayerConfig {
    fn default() -> Self {
        Self {
            inactivity_timeout_ms: 2000,
            playback_rates: vec![0.5, 1.0, 1.5, 2.0],
            supports_playback_rate: true,
            playback_rate: 1.0,
        }
    }
}

/// A [`PlayerContext`] backed by plain properties.
pub struct MediaPlayerState {
    inactivity_timeout: Property<Duration>,
    user_active: Property<bool>,
    playback_rate: Property<f64>,
    playback_rates: RwLock<Vec<f64>>,
    supports_playback_rate: Property<bool>,

    /// Emitted when the playback rate changes.
    pub rate_changed: Arc<Signal<f64>>,
    /// Emitted when the user-active flag flips.
    pub user_active_changed: Signal<bool>,
}

impl MediaPlayerState {
    pub fn new(config: MediaPlayerConfig) -> Self {
        Self {
            inactivity_timeout: Property::new(Duration::from_millis(config.inactivity_timeout_ms)),
            user_active: Property::new(false),
            playback_rate: Property::new(config.playback_rate),
            playback_rates: RwLock::new(config.playback_rates),
            supports_playback_rate: Property::new(config.supports_playback_rate),
            rate_changed: Arc::new(Signal::new()),
            user_active_changed: Signal::new(),
        }
    }

    /// Wrap in an `Arc` ready to hand to widgets.
    pub fn shared(config: MediaPlayerConfig) -> Arc<Self> {
        Arc::new(Self::new(config))
    }

    pub fn is_user_active(&self) -> bool {
        self.user_active.get()
    }

    pub fn set_playback_rates(&self, rates: Vec<f64>) {
        *self.playback_rates.write() = rates;
    }

    /// Called by the host when a new source loads with different capabilities.
    pub fn set_supports_playback_rate(&self, supported: bool) {
        self.supports_playback_rate.set(supported);
    }
}

impl Default for MediaPlayerState {
    fn default() -> Self {
        Self::new(MediaPlayerConfig::default())
    }
}

impl PlayerContext for MediaPlayerState {
    fn inactivity_timeout(&self) -> Duration {
        self.inactivity_timeout.get()
    }

    fn set_inactivity_timeout(&self, timeout: Duration) {
        self.inactivity_timeout.set(timeout);
    }

    fn set_user_active(&self, active: bool) {
        if self.user_active.set(active) {
            self.user_active_changed.emit(active);
        }
    }

    fn playback_rate(&self) -> f64 {
        self.playback_rate.get()
    }

    fn set_playback_rate(&self, rate: f64) {
        if self.playback_rate.set(rate) {
            tracing::debug!(target: targets::PLAYER, rate, "playback rate changed");
            self.rate_changed.emit(rate);
        }
    }

    fn playback_rates(&self) -> Vec<f64> {
        self.playback_rates.read().clone()
    }

    fn supports_playback_rate(&self) -> bool {
        self.supports_playback_rate.get()
    }

    fn rate_changed_signal(&self) -> Option<Arc<Signal<f64>>> {
        Some(Arc::clone(&self.rate_changed))
    }
}

impl fmt::Debug for MediaPlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaPlayerState")
            .field("inactivity_timeout", &self.inactivity_timeout)
            .field("user_active", &self.user_active)
            .field("playback_rate", &self.playback_rate)
            .finish_non_exhaustive()
    }
}

static_assertions::assert_impl_all!(MediaPlayerState: Send, Sync);
static_assertions::assert_impl_all!(InactivitySuspension: Send, Sync);
