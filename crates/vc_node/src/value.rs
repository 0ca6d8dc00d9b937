use alloc::string::String;

// -----------------------------------------------------------------------------
// ConfigValue

/// A single `name = value` entry of a [`ConfigNode`](crate::ConfigNode).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigValue {
    name: String,
    value: String,
}

impl ConfigValue {
    /// Creates a new entry.
    #[inline]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns the entry name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw string value.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns `true` if the entry is stored under `name`.
    #[inline]
    pub fn is_named(&self, name: &str) -> bool {
        self.name == name
    }
}
