//! End-to-end behaviour of the button, popup and items together.

use std::sync::Arc;
use std::time::Duration;

use lattice_listbox::accessibility::aria::names;
use lattice_listbox::prelude::*;
use lattice_listbox::{HoverTarget, ListBox, ListBoxRequest, Object, Signal};
use parking_lot::Mutex;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Mock player
// ============================================================================

/// Player that records every call it receives.
struct MockPlayer {
    timeout: Mutex<Duration>,
    rate: Mutex<f64>,
    calls: Mutex<Vec<String>>,
    rate_changed: Arc<Signal<f64>>,
}

impl MockPlayer {
    fn new(timeout_ms: u64) -> Arc<Self> {
        Arc::new(Self {
            timeout: Mutex::new(Duration::from_millis(timeout_ms)),
            rate: Mutex::new(1.0),
            calls: Mutex::new(Vec::new()),
            rate_changed: Arc::new(Signal::new()),
        })
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

impl PlayerContext for MockPlayer {
    fn inactivity_timeout(&self) -> Duration {
        *self.timeout.lock()
    }

    fn set_inactivity_timeout(&self, timeout: Duration) {
        self.calls.lock().push(format!("timeout={}", timeout.as_millis()));
        *self.timeout.lock() = timeout;
    }

    fn set_user_active(&self, active: bool) {
        self.calls.lock().push(format!("active={active}"));
    }

    fn playback_rate(&self) -> f64 {
        *self.rate.lock()
    }

    fn set_playback_rate(&self, rate: f64) {
        *self.rate.lock() = rate;
        self.rate_changed.emit(rate);
    }

    fn playback_rates(&self) -> Vec<f64> {
        vec![0.5, 1.0, 2.0]
    }

    fn supports_playback_rate(&self) -> bool {
        true
    }

    fn rate_changed_signal(&self) -> Option<Arc<Signal<f64>>> {
        Some(Arc::clone(&self.rate_changed))
    }
}

// ============================================================================
// Delegate
// ============================================================================

struct Rates {
    items: Vec<(&'static str, bool)>,
    handled: Arc<Mutex<Vec<String>>>,
}

impl ListBoxDelegate for Rates {
    fn create_items(&self, _player: &dyn PlayerContext) -> Vec<ListBoxItem> {
        self.items
            .iter()
            .map(|(label, selected)| {
                ListBoxItem::new(ListBoxItemOptions::new(*label).with_selected(*selected))
            })
            .collect()
    }

    fn handle_selection(&mut self, item: &ListBoxItem, _player: &dyn PlayerContext) {
        self.handled.lock().push(item.label().to_owned());
    }
}

struct Fixture {
    button: ListBoxButton,
    player: Arc<MockPlayer>,
    handled: Arc<Mutex<Vec<String>>>,
}

fn setup_with(items: Vec<(&'static str, bool)>, options: ListBoxButtonOptions) -> Fixture {
    init_tracing();
    let player = MockPlayer::new(2000);
    let handled = Arc::new(Mutex::new(Vec::new()));
    let delegate = Rates {
        items,
        handled: Arc::clone(&handled),
    };
    let button = ListBoxButton::new(Box::new(delegate), player.clone(), options);
    Fixture {
        button,
        player,
        handled,
    }
}

/// `[Rate 0.5x, Rate 1x (selected), Rate 2x]`
fn setup() -> Fixture {
    setup_with(
        vec![("Rate 0.5x", false), ("Rate 1x", true), ("Rate 2x", false)],
        ListBoxButtonOptions::new().with_control_text("Playback Rate"),
    )
}

fn focused_label(button: &ListBoxButton) -> Option<&str> {
    button.popup().focused_item().map(ListBoxItem::label)
}

fn assert_closed(fixture: &Fixture) {
    let button = &fixture.button;
    assert!(!button.is_pressed());
    assert!(button.popup().is_hidden());
    assert!(!button.popup().is_showing_locked());
    assert!(!button.popup().is_timeout_suspended());
    assert_eq!(fixture.player.inactivity_timeout(), Duration::from_millis(2000));
    assert_eq!(
        button.aria_attributes().get(names::EXPANDED),
        Some("false")
    );
    assert!(!button.aria_attributes().contains(names::ACTIVEDESCENDANT));
}

fn press(key: &str) -> KeyPressEvent {
    KeyPressEvent::from_dom_key(key)
}

// ============================================================================
// Properties
// ============================================================================

#[test]
fn test_single_active_item() {
    let (_owner, mut popup) = standalone_popup(6);
    for index in [3, -1, 0, 9, -4, 2, 2, 5, 1] {
        popup.focus(index);
        let active = popup.items().iter().filter(|item| item.is_active()).count();
        assert!(active <= 1, "{active} active items after focus({index})");
    }
}

#[test]
fn test_single_selected_item() {
    let (_owner, mut popup) = standalone_popup(5);
    for index in [0, 4, 2, 2, 1, 3] {
        popup.focus(index);
        popup.select(false).unwrap();
        let selected = popup.items().iter().filter(|item| item.is_selected()).count();
        assert_eq!(selected, 1);
    }
}

#[test]
fn test_focus_clamps() {
    let (_owner, mut popup) = standalone_popup(3);
    popup.focus(3);
    assert_eq!(popup.focused_index(), Some(2));
    popup.focus(i32::MAX);
    assert_eq!(popup.focused_index(), Some(2));

    let (_owner, mut popup) = standalone_popup(3);
    popup.focus(-7);
    assert_eq!(popup.focused_index(), Some(0));
}

#[test]
fn test_every_close_path_converges() {
    type Close = fn(&mut ListBoxButton);
    let paths: [(&str, Close); 5] = [
        ("click", |button| {
            button.event(&mut ListBoxEvent::Click);
        }),
        ("escape", |button| {
            button.handle_key_down(&mut press("Escape"));
        }),
        ("outside blur", |button| {
            button.event(&mut ListBoxEvent::ItemBlur { related: None });
        }),
        ("item click", |button| {
            button.event(&mut ListBoxEvent::ItemClick(2));
        }),
        ("tab", |button| {
            button.handle_key_down(&mut press("Tab"));
        }),
    ];

    for (name, close) in paths {
        let mut fixture = setup();
        fixture.button.press_button();
        assert!(fixture.button.is_pressed(), "{name}: did not open");
        assert_eq!(fixture.player.inactivity_timeout(), Duration::ZERO);

        close(&mut fixture.button);
        assert_closed(&fixture);
    }
}

#[test]
fn test_re_enable_timeout_twice() {
    let fixture = setup();
    let player: SharedPlayer = fixture.player.clone();
    let (_owner, mut popup) = standalone_popup(1);

    popup.disable_timeout(&player);
    popup.re_enable_timeout();
    let after_first = fixture.player.inactivity_timeout();
    let calls = fixture.player.calls().len();

    popup.re_enable_timeout();
    assert_eq!(fixture.player.inactivity_timeout(), after_first);
    assert_eq!(fixture.player.calls().len(), calls);
}

#[test]
fn test_disabled_blocks_open() {
    let mut fixture = setup();
    fixture.button.disable();
    fixture.button.press_button();
    assert!(!fixture.button.is_pressed());
    fixture.button.event(&mut ListBoxEvent::Click);
    fixture.button.handle_key_down(&mut press("ArrowDown"));
    assert!(!fixture.button.is_pressed());
    assert!(fixture.player.calls().is_empty());
}

// ============================================================================
// Walkthroughs
// ============================================================================

#[test]
fn test_open_focuses_selected() {
    let mut fixture = setup();
    fixture.button.press_button();

    assert!(fixture.button.is_pressed());
    assert_eq!(focused_label(&fixture.button), Some("Rate 1x"));
    let focused = fixture.button.popup().items()[1].dom_id();
    assert_eq!(
        fixture.button.aria_attributes().get(names::ACTIVEDESCENDANT),
        Some(focused.as_str())
    );
    assert_eq!(
        fixture.player.calls(),
        vec!["timeout=0".to_string(), "active=true".to_string()]
    );
}

#[test]
fn test_arrow_down_advances_then_clamps() {
    let mut fixture = setup();
    fixture.button.press_button();

    fixture.button.handle_key_down(&mut press("ArrowDown"));
    assert_eq!(focused_label(&fixture.button), Some("Rate 2x"));
    fixture.button.handle_key_down(&mut press("ArrowDown"));
    assert_eq!(focused_label(&fixture.button), Some("Rate 2x"));
}

#[test]
fn test_enter_commits_focused_item() {
    let mut fixture = setup();
    fixture.button.press_button();

    let mut enter = press("Enter");
    assert!(fixture.button.handle_key_down(&mut enter));
    assert!(enter.base.is_accepted());
    assert_eq!(*fixture.handled.lock(), vec!["Rate 1x".to_string()]);
    assert_closed(&fixture);
    assert!(fixture.button.has_focus());
}

#[test]
fn test_no_selectable_items_hides_button() {
    let mut fixture = setup_with(
        vec![],
        ListBoxButtonOptions::new().with_hide_threshold(0),
    );
    fixture.button.update();
    assert!(fixture.button.is_hidden());

    let fixture = setup_with(vec![("only", false)], ListBoxButtonOptions::new());
    assert!(!fixture.button.is_hidden());
}

#[test]
fn test_hover_overrides_keyboard_focus() {
    let mut fixture = setup();
    fixture.button.press_button();
    fixture.button.handle_key_down(&mut press("ArrowUp"));
    assert_eq!(focused_label(&fixture.button), Some("Rate 0.5x"));

    fixture
        .button
        .event(&mut ListBoxEvent::PopupHover(HoverTarget::Item(2)));
    assert_eq!(focused_label(&fixture.button), Some("Rate 2x"));
    let active: Vec<bool> = fixture.button.popup().items().iter().map(ListBoxItem::is_active).collect();
    assert_eq!(active, vec![false, false, true]);
}

// ============================================================================
// Wider flows
// ============================================================================

#[test]
fn test_hover_open_then_document_tab() {
    let mut fixture = setup();
    fixture.button.event(&mut ListBoxEvent::MouseEnter);
    assert!(fixture.button.is_pressed());
    assert!(fixture.button.is_document_listener_registered());

    let mut release = KeyReleaseEvent::from_dom_key("Tab");
    assert!(fixture.button.event(&mut ListBoxEvent::DocumentKeyRelease(release.clone())));
    assert!(!fixture.button.handle_document_key_up(&mut release));
    assert_closed(&fixture);
    assert!(!fixture.button.is_document_listener_registered());
}

#[test]
fn test_popup_keyboard_round_trip() {
    let mut fixture = setup();
    fixture.button.handle_key_down(&mut press(" "));
    assert!(fixture.button.is_pressed());

    assert!(fixture.button.event(&mut ListBoxEvent::PopupKeyPress(press("Left"))));
    assert_eq!(focused_label(&fixture.button), Some("Rate 2x"));
    fixture.button.handle_key_down(&mut press("Space"));
    assert_eq!(*fixture.handled.lock(), vec!["Rate 2x".to_string()]);
    assert_eq!(fixture.button.popup().selected_index(), Some(2));

    fixture.button.handle_key_down(&mut press("ArrowUp"));
    assert!(fixture.button.is_pressed());
    assert_eq!(focused_label(&fixture.button), Some("Rate 1x"));
}

#[test]
fn test_playback_rate_button_with_mock_player() {
    init_tracing();
    let player = MockPlayer::new(4000);
    let mut rate = PlaybackRateButton::new(player.clone());
    assert_eq!(rate.button().value_text(), "1x");

    rate.button_mut().event(&mut ListBoxEvent::Click);
    assert_eq!(focused_label(rate.button()), Some("1x"));
    rate.button_mut().event(&mut ListBoxEvent::ItemClick(0));

    assert_eq!(player.playback_rate(), 2.0);
    assert_eq!(rate.button().value_text(), "2x");
    assert!(!rate.button().is_pressed());
    assert_eq!(player.inactivity_timeout(), Duration::from_millis(4000));
}

#[test]
fn test_requests_from_item_click() {
    let mut fixture = setup();
    fixture.button.press_button();
    let requests = fixture.button.popup_mut().handle_item_click(0);
    assert_eq!(
        requests,
        vec![
            ListBoxRequest::Commit { index: 0 },
            ListBoxRequest::Close { return_focus: true },
        ]
    );
    assert!(fixture.button.apply_requests(requests));
    assert_eq!(*fixture.handled.lock(), vec!["Rate 0.5x".to_string()]);
    assert_closed(&fixture);
}

// ============================================================================
// Helpers
// ============================================================================

struct Owner(lattice_listbox::ObjectBase);

impl Object for Owner {
    fn object_id(&self) -> lattice_listbox::ObjectId {
        self.0.id()
    }
}

fn standalone_popup(count: usize) -> (Owner, ListBox) {
    let owner = Owner(lattice_listbox::ObjectBase::new::<Owner>());
    let mut popup = ListBox::new(owner.object_id());
    for i in 0..count {
        popup
            .add_item(ListBoxItem::new(ListBoxItemOptions::new(format!("item {i}"))))
            .unwrap();
    }
    (owner, popup)
}
