//! Integration tests for objects, properties and signals working together.

use std::sync::Arc;

use lattice_listbox_core::{Object, ObjectBase, ObjectId, Property, Signal, global_registry};
use parking_lot::Mutex;

// A popup-like object that owns rows and reports focus moves.
struct Popup {
    base: ObjectBase,
    focused: Property<Option<usize>>,
    focus_changed: Signal<Option<usize>>,
}

impl Popup {
    fn new() -> Self {
        Self {
            base: ObjectBase::new::<Self>(),
            focused: Property::new(None),
            focus_changed: Signal::new(),
        }
    }

    fn focus(&self, index: usize) {
        if self.focused.set(Some(index)) {
            self.focus_changed.emit(Some(index));
        }
    }
}

impl Object for Popup {
    fn object_id(&self) -> ObjectId {
        self.base.id()
    }
}

struct Row {
    base: ObjectBase,
}

impl Row {
    fn new(popup: &Popup) -> Self {
        let base = ObjectBase::new::<Self>();
        base.set_parent(Some(popup.object_id())).unwrap();
        Self { base }
    }
}

impl Object for Row {
    fn object_id(&self) -> ObjectId {
        self.base.id()
    }
}

#[test]
fn test_rows_destroyed_with_popup() {
    let popup = Popup::new();
    let rows: Vec<Row> = (0..3).map(|_| Row::new(&popup)).collect();
    let ids: Vec<ObjectId> = rows.iter().map(Object::object_id).collect();

    assert!(ids.iter().all(|id| global_registry().contains(*id)));
    assert!(rows.iter().all(|row| popup.base.is_parent_of(row.object_id())));

    drop(popup);
    assert!(ids.iter().all(|id| !global_registry().contains(*id)));
    drop(rows);
}

#[test]
fn test_focus_signal_only_on_change() {
    let popup = Popup::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    popup.focus_changed.connect(move |index| sink.lock().push(*index));

    popup.focus(1);
    popup.focus(1);
    popup.focus(2);
    assert_eq!(*seen.lock(), vec![Some(1), Some(2)]);
    assert_eq!(popup.focused.get(), Some(2));
}

#[test]
fn test_scoped_connection_follows_owner() {
    let signal = Arc::new(Signal::<f64>::new());
    let value = Arc::new(Property::new(String::new()));

    {
        let target = Arc::clone(&value);
        let _guard = signal.connect_scoped(move |rate| {
            target.set(format!("{rate}x"));
        });
        signal.emit(1.5);
        assert_eq!(value.get(), "1.5x");
        assert_eq!(signal.connection_count(), 1);
    }

    assert_eq!(signal.connection_count(), 0);
    signal.emit(2.0);
    assert_eq!(value.get(), "1.5x");
}

#[test]
fn test_blocked_signal() {
    let signal = Signal::<bool>::new();
    let hits = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&hits);
    signal.connect(move |_| *counter.lock() += 1);

    signal.set_blocked(true);
    signal.emit(true);
    signal.set_blocked(false);
    signal.emit(false);
    assert_eq!(*hits.lock(), 1);
}
