//! Core systems for Lattice ListBox.
//!
//! This crate provides the foundation the listbox widgets are built on:
//!
//! - **Object Model**: Stable ids, parent-child links, cascade destroy
//! - **Signal/Slot System**: Type-safe change notification
//! - **Property System**: Values with change detection
//! - **Logging**: `tracing` targets and performance spans
//!
//! # Example
//!
//! ```
//! use lattice_listbox_core::{Property, Signal};
//!
//! let rate = Property::new(1.0_f64);
//! let rate_changed = Signal::<f64>::new();
//! rate_changed.connect(|rate| println!("rate is now {rate}x"));
//!
//! if rate.set(1.5) {
//!     rate_changed.emit(1.5);
//! }
//! ```

pub mod error;
pub mod logging;
pub mod object;
pub mod property;
pub mod signal;

pub use error::SignalError;
pub use logging::PerfSpan;
pub use object::{
    Object, ObjectBase, ObjectError, ObjectId, ObjectRegistry, ObjectResult,
    SharedObjectRegistry, global_registry,
};
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
