//! Placeholder-aware globals values.
//!
//! Templates ship values such as `<postman-api-key>` that have not been bound
//! yet. Reading a value through [`Binding`] keeps that distinction in the
//! type instead of in string checks scattered across callers.

/// A non-empty globals value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Template placeholder, e.g. `<repo_workspace_name>`
    Placeholder(String),
    /// Real value
    Bound(String),
}

impl Binding {
    /// Classify a raw value. Empty values are absent, not placeholders.
    pub fn from_value(value: &str) -> Option<Self> {
        if value.is_empty() {
            None
        } else if value.starts_with('<') {
            Some(Self::Placeholder(value.to_string()))
        } else {
            Some(Self::Bound(value.to_string()))
        }
    }

    /// The bound value, if any.
    pub fn bound(&self) -> Option<&str> {
        match self {
            Self::Bound(v) => Some(v),
            Self::Placeholder(_) => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }

    /// Raw text, placeholder or not.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Placeholder(v) | Self::Bound(v) => v,
        }
    }
}
