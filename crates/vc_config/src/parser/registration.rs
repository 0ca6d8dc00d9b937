use alloc::boxed::Box;
use core::fmt;

use crate::ParserInitError;
use crate::info::Type;
use crate::parser::{ConfigNodeParser, ConfigValueParser, ParserKind};

// -----------------------------------------------------------------------------
// ParserInstance

/// A constructed parser, tagged with the catalog it belongs to.
pub enum ParserInstance {
    Value(Box<dyn ConfigValueParser>),
    Node(Box<dyn ConfigNodeParser>),
}

impl ParserInstance {
    #[inline]
    pub const fn kind(&self) -> ParserKind {
        match self {
            Self::Value(_) => ParserKind::Value,
            Self::Node(_) => ParserKind::Node,
        }
    }
}

impl fmt::Debug for ParserInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ParserInstance").field(&self.kind()).finish()
    }
}

// -----------------------------------------------------------------------------
// ParserRegistration

/// The declaration of a parser plugin.
///
/// Every function is `const`, so registrations can be submitted statically:
///
/// ```
/// use vc_config::parser::{FromStrParser, ParserRegistration};
///
/// const REGISTRATION: ParserRegistration =
///     ParserRegistration::value::<FromStrParser<u8>, u8>().with_priority(3);
///
/// assert_eq!(REGISTRATION.priority(), 3);
/// assert!(REGISTRATION.target().is::<u8>());
/// ```
#[derive(Clone, Copy)]
pub struct ParserRegistration {
    parser_type: Type,
    target: Type,
    priority: i32,
    factory: fn() -> Result<ParserInstance, ParserInitError>,
}

impl ParserRegistration {
    /// Declares the value parser `P` for the target `T`, built with `P::default()`.
    ///
    /// `T` may be unsized, such as a `dyn Trait` implemented by the scalars
    /// the parser handles.
    #[inline]
    pub const fn value<P: ConfigValueParser + Default, T: ?Sized + 'static>() -> Self {
        Self {
            parser_type: Type::of::<P>(),
            target: Type::of::<T>(),
            priority: 0,
            factory: default_value_factory::<P>,
        }
    }

    /// Declares the node parser `P` for the target `T`, built with `P::default()`.
    #[inline]
    pub const fn node<P: ConfigNodeParser + Default, T: ?Sized + 'static>() -> Self {
        Self {
            parser_type: Type::of::<P>(),
            target: Type::of::<T>(),
            priority: 0,
            factory: default_node_factory::<P>,
        }
    }

    /// Sets the priority among assignable candidates; higher wins, default 0.
    #[inline]
    pub const fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Replaces the factory building the parser.
    ///
    /// A factory returning an error excludes the plugin from the database.
    #[inline]
    pub const fn with_factory(
        mut self,
        factory: fn() -> Result<ParserInstance, ParserInitError>,
    ) -> Self {
        self.factory = factory;
        self
    }

    #[inline]
    pub const fn parser_type(&self) -> Type {
        self.parser_type
    }

    #[inline]
    pub const fn target(&self) -> Type {
        self.target
    }

    #[inline]
    pub const fn priority(&self) -> i32 {
        self.priority
    }

    /// Builds the parser.
    #[inline]
    pub fn instantiate(&self) -> Result<ParserInstance, ParserInitError> {
        (self.factory)()
    }
}

impl fmt::Debug for ParserRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserRegistration")
            .field("parser_type", &self.parser_type)
            .field("target", &self.target)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

fn default_value_factory<P: ConfigValueParser + Default>() -> Result<ParserInstance, ParserInitError>
{
    Ok(ParserInstance::Value(Box::new(P::default())))
}

fn default_node_factory<P: ConfigNodeParser + Default>() -> Result<ParserInstance, ParserInitError> {
    Ok(ParserInstance::Node(Box::new(P::default())))
}

// -----------------------------------------------------------------------------
// auto_register

#[cfg(feature = "auto_register")]
inventory::collect!(ParserRegistration);

/// Submits [`ParserRegistration`]s to the global
/// [`ParserDatabase`](crate::parser::ParserDatabase).
///
/// Requires the `auto_register` feature. The registrations are collected
/// when the global database is first used.
///
/// ```
/// use vc_config::{ParseError, SerializerSettings, submit_parser};
/// use vc_config::info::Typed;
/// use vc_config::parser::{ParserDatabase, ParserRegistration, TypedValueParser};
///
/// #[derive(Default)]
/// struct YesNoParser;
///
/// impl TypedValueParser for YesNoParser {
///     type Target = bool;
///
///     fn parse_value(&self, value: &str, _: &SerializerSettings) -> Result<bool, ParseError> {
///         match value {
///             "yes" => Ok(true),
///             "no" => Ok(false),
///             _ => Err(ParseError::invalid_value(value, "bool")),
///         }
///     }
///
///     fn save_value(&self, value: &bool, _: &SerializerSettings) -> Result<String, ParseError> {
///         Ok(if *value { "yes" } else { "no" }.into())
///     }
/// }
///
/// // Replaces the builtin `bool` parser: the higher priority keeps the exact slot.
/// submit_parser!(ParserRegistration::value::<YesNoParser, bool>().with_priority(1));
///
/// let parser = ParserDatabase::instance().values().resolve(bool::type_info()).unwrap();
/// let saved = parser.save(&true, bool::type_info(), &SerializerSettings::DEFAULT).unwrap();
/// assert_eq!(saved, "yes");
/// ```
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! submit_parser {
    ($($registration:expr),+ $(,)?) => {
        $(
            $crate::__macro_exports::inventory::submit! {
                $registration
            }
        )+
    };
}
