//! Engine settings and per-member overrides.

use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::member::FieldMeta;

// -----------------------------------------------------------------------------
// ArrayHandling

/// How a sequence of scalars is laid out in a node.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrayHandling {
    /// One value holding every element joined with the separator:
    /// `tags = a,b,c`.
    #[default]
    SingleValue,
    /// One value per element, all under the member name:
    /// `tag = a`, `tag = b`.
    SeparateValues,
}

// -----------------------------------------------------------------------------
// SerializerSettings

/// Settings of a (de)serialization call.
///
/// The value is immutable in use: per-member overrides produce a new value
/// through [`with_overrides`](Self::with_overrides).
///
/// Hosts can keep these in their own configuration files:
///
/// ```
/// use vc_config::{ArrayHandling, SerializerSettings};
///
/// let settings: SerializerSettings =
///     serde_json::from_str(r#"{ "array_handling": "SeparateValues" }"#).unwrap();
///
/// assert_eq!(settings.array_handling, ArrayHandling::SeparateValues);
/// assert_eq!(settings.array_separator, ',');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializerSettings {
    pub array_handling: ArrayHandling,
    pub array_separator: char,
}

impl SerializerSettings {
    /// `SingleValue` with `,` as separator.
    pub const DEFAULT: Self = Self {
        array_handling: ArrayHandling::SingleValue,
        array_separator: ',',
    };

    #[inline]
    pub const fn with_array_handling(mut self, array_handling: ArrayHandling) -> Self {
        self.array_handling = array_handling;
        self
    }

    #[inline]
    pub const fn with_array_separator(mut self, array_separator: char) -> Self {
        self.array_separator = array_separator;
        self
    }

    /// Returns a copy with the overrides declared by `meta` applied.
    ///
    /// Only the settings `meta` actually sets are replaced; `self` is left
    /// untouched.
    ///
    /// ```
    /// use vc_config::{ArrayHandling, SerializerSettings};
    /// use vc_config::member::FieldMeta;
    ///
    /// let base = SerializerSettings::DEFAULT;
    /// let meta = FieldMeta::new().with_separator(';');
    ///
    /// let merged = base.with_overrides(&meta);
    /// assert_eq!(merged.array_separator, ';');
    /// assert_eq!(merged.array_handling, ArrayHandling::SingleValue);
    /// assert_eq!(base.array_separator, ',');
    /// ```
    pub const fn with_overrides(self, meta: &FieldMeta) -> Self {
        let mut merged = self;
        if let Some(array_handling) = meta.array_handling {
            merged.array_handling = array_handling;
        }
        if let Some(separator) = meta.separator {
            merged.array_separator = separator;
        }
        merged
    }

    /// Splits a joined sequence value into its trimmed, non-empty pieces.
    ///
    /// ```
    /// use vc_config::SerializerSettings;
    ///
    /// let pieces = SerializerSettings::DEFAULT.split_array("a, b ,c,,");
    /// assert_eq!(pieces, ["a", "b", "c"]);
    /// ```
    pub fn split_array<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split(self.array_separator)
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .collect()
    }

    /// Joins saved elements into a single value.
    pub fn join_array(&self, pieces: &[String]) -> String {
        let mut joined = String::new();
        for (index, piece) in pieces.iter().enumerate() {
            if index > 0 {
                joined.push(self.array_separator);
            }
            joined.push_str(piece);
        }
        joined
    }
}

impl Default for SerializerSettings {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::{ArrayHandling, SerializerSettings};
    use crate::member::FieldMeta;
    use alloc::string::String;
    use alloc::vec;

    #[test]
    fn join_has_no_padding() {
        let pieces = vec![String::from("a"), String::from("b"), String::from("c")];
        assert_eq!(SerializerSettings::DEFAULT.join_array(&pieces), "a,b,c");

        let piped = SerializerSettings::DEFAULT.with_array_separator('|');
        assert_eq!(piped.join_array(&pieces), "a|b|c");
        assert_eq!(piped.join_array(&[]), "");
    }

    #[test]
    fn overrides_are_pure() {
        let base = SerializerSettings::DEFAULT.with_array_separator(';');
        let meta = FieldMeta::new().with_array_handling(ArrayHandling::SeparateValues);

        let merged = base.with_overrides(&meta);
        assert_eq!(merged.array_handling, ArrayHandling::SeparateValues);
        assert_eq!(merged.array_separator, ';');
        assert_eq!(base.array_handling, ArrayHandling::SingleValue);

        assert_eq!(base.with_overrides(&FieldMeta::new()), base);
    }

    #[test]
    fn settings_from_json() {
        let settings: SerializerSettings =
            serde_json::from_str(r#"{ "array_separator": "|" }"#).unwrap();
        assert_eq!(settings.array_separator, '|');
        assert_eq!(settings.array_handling, ArrayHandling::SingleValue);

        let text = serde_json::to_string(&SerializerSettings::DEFAULT).unwrap();
        assert_eq!(text, r#"{"array_handling":"SingleValue","array_separator":","}"#);
    }
}
