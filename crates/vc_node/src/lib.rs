//! Hierarchical key/value document used by `vc_config`.
//!
//! A [`ConfigNode`] is an ordered tree node: it owns a name, a list of named
//! string values and a list of named child nodes. Names are not unique, a
//! node may hold several values (or children) under the same name, and the
//! insertion order is always preserved.
//!
//! ```
//! use vc_node::ConfigNode;
//!
//! let mut part = ConfigNode::new("PART");
//! part.add_value("name", "engine");
//! part.add_value("tag", "a");
//! part.add_value("tag", "b");
//!
//! let mut module = ConfigNode::new("MODULE");
//! module.add_value("thrust", "215");
//! part.add_node(module);
//!
//! assert_eq!(part.get_value("name"), Some("engine"));
//! assert_eq!(part.get_values("tag").collect::<Vec<_>>(), ["a", "b"]);
//! assert_eq!(part.get_node("MODULE").and_then(|m| m.try_parse_value::<u32>("thrust")), Some(215));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod display;
mod node;
mod value;

// -----------------------------------------------------------------------------
// Top-level exports

pub use node::ConfigNode;
pub use value::ConfigValue;
