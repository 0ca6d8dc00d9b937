use core::any::Any;

use vc_node::ConfigNode;

use crate::info::Typed;
use crate::member::Member;
use crate::{ConfigError, SerializeContext};

// -----------------------------------------------------------------------------
// NodeObject

/// A type loaded from and saved to a child node.
///
/// Implement it by hand (together with [`impl_config_node!`](crate::impl_config_node))
/// for full control over the node layout; `#[derive(ConfigObject)]`
/// implements it by walking the member table.
///
/// Every hooked or mapped type is assignable to `dyn NodeObject`, the target
/// of the builtin fallback node parser.
pub trait NodeObject: Any {
    /// Loads `self` from `node`.
    fn load_node(
        &mut self,
        node: &ConfigNode,
        cx: &mut SerializeContext<'_>,
    ) -> Result<(), ConfigError>;

    /// Appends the contents of `self` to `node`.
    fn save_node(
        &self,
        node: &mut ConfigNode,
        cx: &mut SerializeContext<'_>,
    ) -> Result<(), ConfigError>;
}

// -----------------------------------------------------------------------------
// ConfigCallbacks

/// Lifecycle hooks of mapped objects.
///
/// `#[derive(ConfigObject)]` emits an empty impl unless
/// `#[config(callbacks)]` is given.
///
/// # Ordering
///
/// - [`on_post_deserialize`](Self::on_post_deserialize) runs once per object
///   after all of its members loaded. It does not run when loading the object
///   fails.
/// - [`on_pre_serialize`](Self::on_pre_serialize) runs once per object,
///   before any of its members are saved; for a nested object, once a node
///   parser was found for it.
///   It has already run when saving the object then fails, in which case
///   the object is left out of the output.
///
/// # Saving derived state
///
/// `on_pre_serialize` takes `&self`: serialization only borrows the object
/// graph, so the hook cannot write members. Sync derived state into members
/// through `&mut` before calling the serializer; the hook itself can only
/// update non-member state held in a [`Cell`](core::cell::Cell) or
/// [`RefCell`](core::cell::RefCell).
pub trait ConfigCallbacks {
    /// Called after every member has been loaded.
    fn on_post_deserialize(&mut self) {}

    /// Called before the members are saved.
    fn on_pre_serialize(&self) {}
}

// -----------------------------------------------------------------------------
// ConfigObject

/// A type mapped member by member. Use `#[derive(ConfigObject)]`.
///
/// # Examples
///
/// ```
/// use vc_config::{ConfigObject, derive::ConfigObject};
///
/// #[derive(ConfigObject, Default)]
/// struct Tank {
///     #[config(name = "Capacity", required)]
///     capacity: f64,
///     // not opted in
///     cache: u32,
///     #[config]
///     tags: Vec<String>,
/// }
///
/// let names: Vec<_> = Tank::members().iter().map(|m| m.effective_name()).collect();
/// assert_eq!(names, ["Capacity", "tags"]);
/// assert!(Tank::members()[0].is_required());
/// ```
pub trait ConfigObject: NodeObject + ConfigCallbacks + Typed + Default {
    /// Returns the serializable members, in declaration order.
    fn members() -> &'static [Member<Self>];
}
