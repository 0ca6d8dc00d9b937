//! Parser plugins and the registry resolving them.
//!
//! ## Menu
//!
//! - [`ConfigValueParser`]: converts a scalar type to and from a string.
//!     - [`TypedValueParser`]: the statically typed way to write one.
//! - [`ConfigNodeParser`]: converts a complex type to and from a child node.
//! - [`ParserRegistration`]: the declaration of a plugin: its type, target
//!   type, priority and factory. Submitted with [`submit_parser!`](crate::submit_parser)
//!   under the `auto_register` feature.
//! - [`ParserFilter`]: one catalog of plugins, resolving the best parser for a type.
//! - [`ParserDatabase`]: the value and node catalogs.
//! - Builtins: [`FromStrParser`], [`BoolParser`], [`RawNodeParser`], [`NodeObjectParser`].
//!
//! ## Resolution
//!
//! For a requested type, a parser declared for exactly that type always wins,
//! whatever its priority. Otherwise every parser whose target the type is
//! assignable to (see [`TypeInfo::bases`]) is a candidate, and the one with
//! the strictly highest priority is chosen. Candidates are scanned in parser
//! type path order, so equal priorities resolve to the first in that order.

// -----------------------------------------------------------------------------
// Modules

mod builtin;
mod database;
mod filter;
mod registration;

// -----------------------------------------------------------------------------
// Exports

pub use builtin::{BoolParser, FromStrParser, NodeObjectParser, RawNodeParser};
pub use database::ParserDatabase;
pub use filter::{ParserEntry, ParserFilter};
pub use registration::{ParserInstance, ParserRegistration};

use alloc::boxed::Box;
use alloc::string::String;
use core::any::{Any, type_name};
use core::fmt;

use vc_node::ConfigNode;

use crate::info::{TypeInfo, Typed};
use crate::{ParseError, SerializeContext, SerializerSettings};

// -----------------------------------------------------------------------------
// ParserKind

/// The catalog a parser belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParserKind {
    Value,
    Node,
}

impl fmt::Display for ParserKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value => f.pad("value"),
            Self::Node => f.pad("node"),
        }
    }
}

// -----------------------------------------------------------------------------
// ConfigValueParser

/// Converts values of a scalar type to and from strings.
///
/// `target` is the info of the requested (nullable-stripped) type. It is the
/// declared target of the parser, or a type assignable to it.
pub trait ConfigValueParser: Send + Sync + 'static {
    fn parse(
        &self,
        value: &str,
        target: &'static TypeInfo,
        settings: &SerializerSettings,
    ) -> Result<Box<dyn Any>, ParseError>;

    fn save(
        &self,
        value: &dyn Any,
        target: &'static TypeInfo,
        settings: &SerializerSettings,
    ) -> Result<String, ParseError>;
}

/// A [`ConfigValueParser`] for one concrete type.
///
/// # Examples
///
/// ```
/// use vc_config::{ParseError, SerializerSettings, impl_config_scalar};
/// use vc_config::parser::{ParserDatabase, ParserRegistration, TypedValueParser};
/// use vc_config::info::Typed;
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Rgb(u8, u8, u8);
/// impl_config_scalar!(Rgb);
///
/// #[derive(Default)]
/// struct HexParser;
///
/// impl TypedValueParser for HexParser {
///     type Target = Rgb;
///
///     fn parse_value(&self, value: &str, _: &SerializerSettings) -> Result<Rgb, ParseError> {
///         let hex = value.trim_start_matches('#');
///         let bits = u32::from_str_radix(hex, 16)
///             .map_err(|_| ParseError::invalid_value(value, "Rgb"))?;
///         Ok(Rgb((bits >> 16) as u8, (bits >> 8) as u8, bits as u8))
///     }
///
///     fn save_value(&self, value: &Rgb, _: &SerializerSettings) -> Result<String, ParseError> {
///         Ok(format!("#{:02x}{:02x}{:02x}", value.0, value.1, value.2))
///     }
/// }
///
/// let database = ParserDatabase::from_registrations([ParserRegistration::value::<HexParser, Rgb>()]);
/// let parser = database.values().resolve(Rgb::type_info()).unwrap();
///
/// let settings = SerializerSettings::DEFAULT;
/// let parsed = parser.parse("#ff8000", Rgb::type_info(), &settings).unwrap();
/// assert_eq!(parsed.downcast_ref::<Rgb>(), Some(&Rgb(255, 128, 0)));
/// assert_eq!(parser.save(&Rgb(1, 2, 3), Rgb::type_info(), &settings).unwrap(), "#010203");
/// ```
pub trait TypedValueParser: Send + Sync + 'static {
    type Target: Any;

    fn parse_value(
        &self,
        value: &str,
        settings: &SerializerSettings,
    ) -> Result<Self::Target, ParseError>;

    fn save_value(
        &self,
        value: &Self::Target,
        settings: &SerializerSettings,
    ) -> Result<String, ParseError>;
}

impl<P: TypedValueParser> ConfigValueParser for P {
    #[inline]
    fn parse(
        &self,
        value: &str,
        _target: &'static TypeInfo,
        settings: &SerializerSettings,
    ) -> Result<Box<dyn Any>, ParseError> {
        let parsed = self.parse_value(value, settings)?;
        Ok(Box::new(parsed))
    }

    fn save(
        &self,
        value: &dyn Any,
        _target: &'static TypeInfo,
        settings: &SerializerSettings,
    ) -> Result<String, ParseError> {
        match value.downcast_ref::<P::Target>() {
            Some(value) => self.save_value(value, settings),
            None => Err(ParseError::TypeMismatch {
                expected: type_name::<P::Target>(),
            }),
        }
    }
}

// -----------------------------------------------------------------------------
// ConfigNodeParser

/// Converts values of a complex type to and from child nodes.
///
/// The context carries the settings of the member being processed, so
/// members of nested objects inherit them.
pub trait ConfigNodeParser: Send + Sync + 'static {
    fn parse(
        &self,
        node: &ConfigNode,
        target: &'static TypeInfo,
        cx: &mut SerializeContext<'_>,
    ) -> Result<Box<dyn Any>, ParseError>;

    /// Appends the contents of `value` to `node`, a fresh node already named
    /// after the member.
    fn save(
        &self,
        node: &mut ConfigNode,
        value: &dyn Any,
        target: &'static TypeInfo,
        cx: &mut SerializeContext<'_>,
    ) -> Result<(), ParseError>;
}

/// Returns a [`ParseError::TypeMismatch`] naming `T`.
#[inline]
pub(crate) fn mismatch<T: ?Sized + Typed>() -> ParseError {
    ParseError::TypeMismatch {
        expected: type_name::<T>(),
    }
}
