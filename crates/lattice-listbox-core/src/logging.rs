//! Logging facilities for Lattice ListBox.
//!
//! Everything is instrumented with `tracing`. Install any subscriber to see
//! the output, and filter by the constants in [`targets`]:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("lattice_listbox::popup=trace,lattice_listbox::button=debug")
//!     .init();
//! ```

/// Target names for log filtering.
pub mod targets {
    /// Object registry lifecycle.
    pub const OBJECT: &str = "lattice_listbox_core::object";
    /// Signal emission.
    pub const SIGNAL: &str = "lattice_listbox_core::signal";
    /// Trigger button state machine.
    pub const BUTTON: &str = "lattice_listbox::button";
    /// Popup list focus and selection.
    pub const POPUP: &str = "lattice_listbox::popup";
    /// Individual items.
    pub const ITEM: &str = "lattice_listbox::item";
    /// Host player interaction (inactivity timeout, playback rate).
    pub const PLAYER: &str = "lattice_listbox::player";
    /// Performance spans.
    pub const PERF: &str = "lattice_listbox::perf";
}

/// An info-level span that stays entered until the guard drops.
///
/// ```ignore
/// let _span = PerfSpan::new("list_box_button::update");
/// // ... rebuild the popup ...
/// ```
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}

impl std::fmt::Debug for PerfSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PerfSpan").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perf_span_without_subscriber() {
        let _span = PerfSpan::new("test_operation");
    }

    #[test]
    fn test_targets_are_namespaced() {
        for target in [targets::BUTTON, targets::POPUP, targets::ITEM, targets::PLAYER] {
            assert!(target.starts_with("lattice_listbox::"));
        }
    }
}
