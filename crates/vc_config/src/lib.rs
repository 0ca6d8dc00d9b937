//! Bidirectional mapping between [`ConfigNode`] documents and typed object graphs.
//!
//! ## Menu
//!
//! - [`info`]: static type descriptors ([`Typed`](info::Typed), [`TypeInfo`](info::TypeInfo)),
//!   deciding whether a member is a scalar, a nested node object, an array or a collection.
//! - [`settings`]: [`SerializerSettings`] and the per-member [`FieldMeta`](member::FieldMeta) merge.
//! - [`parser`]: value/node parser plugins and the [`ParserDatabase`](parser::ParserDatabase)
//!   resolving the best parser for a type.
//! - [`member`]: member descriptor tables generated by [`derive::ConfigObject`].
//! - [`ConfigSerializer`]: the (de)serialization engine.
//!
//! ## Example
//!
//! ```
//! use vc_config::{ConfigSerializer, derive::ConfigObject};
//! use vc_node::ConfigNode;
//!
//! #[derive(ConfigObject, Default, Debug, PartialEq)]
//! struct Engine {
//!     #[config(required)]
//!     name: String,
//!     #[config(name = "maxThrust")]
//!     max_thrust: f32,
//!     #[config]
//!     tags: Vec<String>,
//!     #[config]
//!     gimbal: Option<u8>,
//! }
//!
//! let engine = Engine {
//!     name: "LV-T30".into(),
//!     max_thrust: 215.0,
//!     tags: vec!["liquid".into(), "booster".into()],
//!     gimbal: None,
//! };
//!
//! let node = ConfigSerializer::new().serialize(&engine, "ENGINE").unwrap();
//! assert_eq!(node.get_value("maxThrust"), Some("215"));
//! assert_eq!(node.get_value("tags"), Some("liquid,booster"));
//! assert!(!node.has_value("gimbal"));
//!
//! let loaded: Engine = ConfigSerializer::new().deserialize(&node).unwrap();
//! assert_eq!(loaded, engine);
//! ```
//!
//! ## auto_register
//!
//! With the `auto_register` feature (default), parser plugins declared with
//! [`submit_parser!`] anywhere in the final binary are collected through the
//! [`inventory`] crate when the global [`ParserDatabase`](parser::ParserDatabase)
//! is first used. Without it, only the builtin parsers are available globally,
//! and custom databases are built with
//! [`ParserDatabase::from_registrations`](parser::ParserDatabase::from_registrations).
//!
//! [`ConfigNode`]: vc_node::ConfigNode
//! [`inventory`]: https://docs.rs/inventory
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Generated code refers to `::vc_config`, which must also resolve inside this crate.
extern crate self as vc_config;

// -----------------------------------------------------------------------------
// alloc

// Heap types are named through `alloc`.
extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod hash;
mod object;
mod report;
mod serializer;

pub mod impls;
pub mod info;
pub mod member;
pub mod parser;
pub mod settings;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use error::{ConfigError, MemberError, ParseError, ParserInitError};
pub use hash::TypeIdMap;
pub use object::{ConfigCallbacks, ConfigObject, NodeObject};
pub use report::{Diagnostic, Report};
pub use serializer::{ConfigSerializer, SerializeContext};
pub use settings::{ArrayHandling, SerializerSettings};

pub use vc_config_derive as derive;

/// Serializes `instance` into a new node named `node_name` with the global
/// parser database and default settings.
///
/// See [`ConfigSerializer::serialize`].
#[inline]
pub fn serialize<T: ConfigObject>(
    instance: &T,
    node_name: &str,
) -> Result<vc_node::ConfigNode, ConfigError> {
    ConfigSerializer::new().serialize(instance, node_name)
}

/// Deserializes a new `T` from `node` with the global parser database and
/// default settings.
///
/// See [`ConfigSerializer::deserialize`].
#[inline]
pub fn deserialize<T: ConfigObject>(node: &vc_node::ConfigNode) -> Result<T, ConfigError> {
    ConfigSerializer::new().deserialize(node)
}
