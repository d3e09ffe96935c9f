//! Error types for the listbox widgets.

use lattice_listbox_core::ObjectError;
use thiserror::Error;

/// Errors that can occur while driving a listbox.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListBoxError {
    /// `select` was called before any item had focus.
    #[error("no item has focus; call focus() before select()")]
    NoFocusedItem,

    /// The focused item cannot be selected (e.g. a header row).
    #[error("item at index {index} is not selectable")]
    NotSelectable { index: usize },

    /// An index outside the popup's navigable items.
    #[error("item index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Object registry failure.
    #[error("object error: {0}")]
    Object(#[from] ObjectError),
}

/// Result type for listbox operations.
pub type Result<T> = std::result::Result<T, ListBoxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ListBoxError::NotSelectable { index: 2 }.to_string(),
            "item at index 2 is not selectable"
        );
        assert_eq!(
            ListBoxError::IndexOutOfRange { index: 5, len: 3 }.to_string(),
            "item index 5 out of range (len 3)"
        );
    }

    #[test]
    fn test_from_object_error() {
        let err: ListBoxError = ObjectError::InvalidObjectId.into();
        assert!(matches!(err, ListBoxError::Object(_)));
    }
}
