use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::any::{Any, type_name};
use core::fmt::Display;
use core::marker::PhantomData;
use core::str::FromStr;

use vc_node::ConfigNode;

use crate::info::TypeInfo;
use crate::parser::{ConfigNodeParser, ParserRegistration, TypedValueParser};
use crate::{NodeObject, ParseError, SerializeContext, SerializerSettings};

// -----------------------------------------------------------------------------
// FromStrParser

/// Value parser relying on [`FromStr`] and [`Display`].
///
/// ```
/// use vc_config::SerializerSettings;
/// use vc_config::parser::{FromStrParser, TypedValueParser};
///
/// let parser = FromStrParser::<f32>::default();
/// let settings = SerializerSettings::DEFAULT;
///
/// assert_eq!(parser.parse_value("1.5", &settings).unwrap(), 1.5);
/// assert_eq!(parser.save_value(&2.0, &settings).unwrap(), "2");
/// assert!(parser.parse_value("abc", &settings).is_err());
/// ```
pub struct FromStrParser<T>(PhantomData<fn() -> T>);

impl<T> Default for FromStrParser<T> {
    #[inline]
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<T: FromStr + Display + Any> TypedValueParser for FromStrParser<T> {
    type Target = T;

    fn parse_value(&self, value: &str, _settings: &SerializerSettings) -> Result<T, ParseError> {
        value
            .parse()
            .map_err(|_| ParseError::invalid_value(value, type_name::<T>()))
    }

    #[inline]
    fn save_value(&self, value: &T, _settings: &SerializerSettings) -> Result<String, ParseError> {
        Ok(value.to_string())
    }
}

// -----------------------------------------------------------------------------
// BoolParser

/// Value parser for `bool`, accepting `true` and `false` in any case.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoolParser;

impl TypedValueParser for BoolParser {
    type Target = bool;

    fn parse_value(&self, value: &str, _settings: &SerializerSettings) -> Result<bool, ParseError> {
        if value.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if value.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ParseError::invalid_value(value, "bool"))
        }
    }

    #[inline]
    fn save_value(&self, value: &bool, _settings: &SerializerSettings) -> Result<String, ParseError> {
        Ok(value.to_string())
    }
}

// -----------------------------------------------------------------------------
// RawNodeParser

/// Node parser for [`ConfigNode`] members: the child node is copied as is.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawNodeParser;

impl ConfigNodeParser for RawNodeParser {
    fn parse(
        &self,
        node: &ConfigNode,
        _target: &'static TypeInfo,
        _cx: &mut SerializeContext<'_>,
    ) -> Result<Box<dyn Any>, ParseError> {
        Ok(Box::new(node.clone()))
    }

    fn save(
        &self,
        node: &mut ConfigNode,
        value: &dyn Any,
        _target: &'static TypeInfo,
        _cx: &mut SerializeContext<'_>,
    ) -> Result<(), ParseError> {
        let value = value
            .downcast_ref::<ConfigNode>()
            .ok_or_else(super::mismatch::<ConfigNode>)?;
        node.append_contents(value);
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// NodeObjectParser

/// Fallback node parser for every type assignable to `dyn NodeObject`.
///
/// Builds a default instance of the requested type and lets it load itself.
/// Registered with the lowest priority, so any other assignable parser wins.
#[derive(Debug, Default, Clone, Copy)]
pub struct NodeObjectParser;

impl ConfigNodeParser for NodeObjectParser {
    fn parse(
        &self,
        node: &ConfigNode,
        target: &'static TypeInfo,
        cx: &mut SerializeContext<'_>,
    ) -> Result<Box<dyn Any>, ParseError> {
        let mismatch = || ParseError::TypeMismatch {
            expected: target.type_path(),
        };
        let info = target.as_node().ok_or_else(mismatch)?;

        let mut value = info.construct();
        let object = info.as_object_mut(&mut *value).ok_or_else(mismatch)?;
        object.load_node(node, cx)?;
        Ok(value)
    }

    fn save(
        &self,
        node: &mut ConfigNode,
        value: &dyn Any,
        target: &'static TypeInfo,
        cx: &mut SerializeContext<'_>,
    ) -> Result<(), ParseError> {
        let mismatch = || ParseError::TypeMismatch {
            expected: target.type_path(),
        };
        let info = target.as_node().ok_or_else(mismatch)?;

        let object = info.as_object(value).ok_or_else(mismatch)?;
        object.save_node(node, cx)?;
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Builtin registrations

const BUILTIN_PARSERS: &[ParserRegistration] = &[
    ParserRegistration::value::<BoolParser, bool>(),
    ParserRegistration::value::<FromStrParser<char>, char>(),
    ParserRegistration::value::<FromStrParser<String>, String>(),
    ParserRegistration::value::<FromStrParser<u8>, u8>(),
    ParserRegistration::value::<FromStrParser<u16>, u16>(),
    ParserRegistration::value::<FromStrParser<u32>, u32>(),
    ParserRegistration::value::<FromStrParser<u64>, u64>(),
    ParserRegistration::value::<FromStrParser<u128>, u128>(),
    ParserRegistration::value::<FromStrParser<usize>, usize>(),
    ParserRegistration::value::<FromStrParser<i8>, i8>(),
    ParserRegistration::value::<FromStrParser<i16>, i16>(),
    ParserRegistration::value::<FromStrParser<i32>, i32>(),
    ParserRegistration::value::<FromStrParser<i64>, i64>(),
    ParserRegistration::value::<FromStrParser<i128>, i128>(),
    ParserRegistration::value::<FromStrParser<isize>, isize>(),
    ParserRegistration::value::<FromStrParser<f32>, f32>(),
    ParserRegistration::value::<FromStrParser<f64>, f64>(),
    ParserRegistration::node::<RawNodeParser, ConfigNode>(),
    ParserRegistration::node::<NodeObjectParser, dyn NodeObject>().with_priority(i32::MIN),
];

impl ParserRegistration {
    /// Returns the registrations of the builtin parsers.
    ///
    /// They are always part of the global database; include them when
    /// building a custom one with
    /// [`ParserDatabase::from_registrations`](crate::parser::ParserDatabase::from_registrations).
    #[inline]
    pub const fn builtins() -> &'static [ParserRegistration] {
        BUILTIN_PARSERS
    }
}
