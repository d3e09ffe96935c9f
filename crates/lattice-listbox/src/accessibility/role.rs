//! Accessibility roles used by the listbox family.

/// The accessibility role of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum AccessibleRole {
    /// No specific role; nothing is announced.
    #[default]
    Unknown,
    /// A push button.
    Button,
    /// The trigger of a dropdown list.
    ComboBox,
    /// The popup list.
    ListBox,
    /// One option in the popup list.
    ListBoxOption,
    /// Static text such as a title row.
    Label,
}

impl AccessibleRole {
    /// The WAI-ARIA `role` value, if the role has one.
    pub fn aria_role(self) -> Option<&'static str> {
        match self {
            AccessibleRole::Unknown | AccessibleRole::Label => None,
            AccessibleRole::Button => Some("button"),
            AccessibleRole::ComboBox => Some("combobox"),
            AccessibleRole::ListBox => Some("listbox"),
            AccessibleRole::ListBoxOption => Some("option"),
        }
    }

    /// Convert to AccessKit's Role enum.
    #[cfg(feature = "accessibility")]
    pub fn to_accesskit_role(self) -> accesskit::Role {
        use accesskit::Role;
        match self {
            AccessibleRole::Unknown => Role::Unknown,
            AccessibleRole::Button => Role::Button,
            AccessibleRole::ComboBox => Role::ComboBox,
            AccessibleRole::ListBox => Role::ListBox,
            AccessibleRole::ListBoxOption => Role::ListBoxOption,
            AccessibleRole::Label => Role::Label,
        }
    }
}

#[cfg(feature = "accessibility")]
impl From<AccessibleRole> for accesskit::Role {
    fn from(role: AccessibleRole) -> Self {
        role.to_accesskit_role()
    }
}
