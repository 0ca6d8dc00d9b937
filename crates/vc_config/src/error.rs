use alloc::boxed::Box;
use alloc::string::String;

use thiserror::Error;

use crate::parser::ParserKind;

// -----------------------------------------------------------------------------
// ConfigError

/// A failure that aborts a whole (de)serialization call.
///
/// Only required members and invalid arguments produce it. Every other
/// per-member problem is a [`MemberError`], reported through a
/// [`Diagnostic`](crate::Diagnostic) while the walk continues.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum ConfigError {
    /// A required member was absent from the node, or could not be loaded.
    #[error("missing required field `{field}` of `{owner}`")]
    MissingField {
        owner: &'static str,
        field: &'static str,
        #[source]
        cause: Option<MemberError>,
    },
    /// A required member had no value to write, or could not be saved.
    #[error("required field `{field}` of `{owner}` has no value to save")]
    MissingValue {
        owner: &'static str,
        field: &'static str,
        #[source]
        cause: Option<MemberError>,
    },
    #[error("node name must not be empty")]
    EmptyNodeName,
}

impl ConfigError {
    /// Returns the effective member name carried by the missing variants.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField { field, .. } | Self::MissingValue { field, .. } => Some(*field),
            Self::EmptyNodeName => None,
        }
    }
}

// -----------------------------------------------------------------------------
// MemberError

/// A soft failure confined to one member.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum MemberError {
    #[error("type `{0}` cannot be mapped")]
    UnsupportedType(&'static str),
    #[error("no {kind} parser available for `{ty}`")]
    NoParser { kind: ParserKind, ty: &'static str },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("cannot build `{ty}`: expected {expected} elements, found {found}")]
    Collect {
        ty: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("member value is not a `{expected}`")]
    TypeMismatch { expected: &'static str },
}

// -----------------------------------------------------------------------------
// ParseError

/// Error returned by parser plugins.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum ParseError {
    #[error("cannot parse `{value}` as `{ty}`")]
    InvalidValue { value: String, ty: &'static str },
    #[error("value handed to the parser is not a `{expected}`")]
    TypeMismatch { expected: &'static str },
    /// A nested object failed with a hard error.
    #[error("nested object: {0}")]
    Nested(Box<ConfigError>),
    #[error("{0}")]
    Custom(String),
}

impl ParseError {
    /// Creates an [`InvalidValue`](Self::InvalidValue) error.
    #[inline]
    pub fn invalid_value(value: &str, ty: &'static str) -> Self {
        Self::InvalidValue {
            value: value.into(),
            ty,
        }
    }

    /// Creates a [`Custom`](Self::Custom) error.
    #[inline]
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}

impl From<ConfigError> for ParseError {
    #[inline]
    fn from(value: ConfigError) -> Self {
        Self::Nested(Box::new(value))
    }
}

// -----------------------------------------------------------------------------
// ParserInitError

/// A parser factory failed; the plugin is left out of the database.
#[derive(Debug, Error, Clone)]
#[error("parser initialization failed: {reason}")]
pub struct ParserInitError {
    reason: String,
}

impl ParserInitError {
    #[inline]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    #[inline]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, MemberError, ParseError};
    use alloc::string::ToString;
    use core::error::Error;

    #[test]
    fn missing_field_keeps_cause() {
        let err = ConfigError::MissingField {
            owner: "Engine",
            field: "thrust",
            cause: Some(ParseError::invalid_value("abc", "f32").into()),
        };

        assert_eq!(err.to_string(), "missing required field `thrust` of `Engine`");
        assert_eq!(err.field(), Some("thrust"));
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "cannot parse `abc` as `f32`");
    }

    #[test]
    fn nested_config_error() {
        let err: ParseError = ConfigError::EmptyNodeName.into();
        let member: MemberError = err.into();
        assert_eq!(member.to_string(), "nested object: node name must not be empty");
    }
}
