//! WAI-ARIA attribute sets.

use std::collections::BTreeMap;

/// Attribute names written by the widgets.
pub mod names {
    pub const ROLE: &str = "role";
    pub const HASPOPUP: &str = "aria-haspopup";
    pub const EXPANDED: &str = "aria-expanded";
    pub const CONTROLS: &str = "aria-controls";
    pub const ACTIVEDESCENDANT: &str = "aria-activedescendant";
    pub const SELECTED: &str = "aria-selected";
    pub const DISABLED: &str = "aria-disabled";
}

/// The ARIA attributes an element should carry right now.
///
/// An attribute absent from the set must be removed from the element, so a
/// host can diff two snapshots and apply the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AriaAttributes {
    attrs: BTreeMap<&'static str, String>,
}

impl AriaAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &'static str, value: impl Into<String>) {
        self.attrs.insert(name, value.into());
    }

    /// Store `"true"` or `"false"`.
    pub fn set_bool(&mut self, name: &'static str, value: bool) {
        self.set(name, if value { "true" } else { "false" });
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.attrs.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.attrs.iter().map(|(name, value)| (*name, value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_remove() {
        let mut attrs = AriaAttributes::new();
        attrs.set_bool(names::EXPANDED, false);
        attrs.set(names::ROLE, "combobox");
        assert_eq!(attrs.get(names::EXPANDED), Some("false"));
        assert_eq!(attrs.len(), 2);

        assert_eq!(attrs.remove(names::ROLE), Some("combobox".to_string()));
        assert!(!attrs.contains(names::ROLE));
    }

    #[test]
    fn test_iteration_is_sorted() {
        let mut attrs = AriaAttributes::new();
        attrs.set(names::ROLE, "option");
        attrs.set_bool(names::SELECTED, true);
        let keys: Vec<_> = attrs.iter().map(|(name, _)| name).collect();
        assert_eq!(keys, vec!["aria-selected", "role"]);
    }
}
