//! Static type descriptors driving the (de)serialization dispatch.
//!
//! ## Menu
//!
//! - [`Type`]: a `TypeId` together with the type path, usable for unsized
//!   targets such as `dyn NodeObject`.
//! - [`Typed`]: a trait for obtaining the static [`TypeInfo`] of a mappable type.
//! - [`TypeInfo`]: the classification of a type, one of:
//!     - [`NullableInfo`]: an optional wrapper (`Option<T>`), stripped before dispatch.
//!     - [`ScalarInfo`]: a type stored as a single string value.
//!     - [`NodeInfo`]: a type stored as a child node (raw node, hooked or mapped object).
//!     - [`SequenceInfo`]: an array or an addable collection of one element type.
//! - [`TypeKind`]: the dispatch category of a nullable-stripped type.
//! - [`NonGenericTypeInfoCell`] and [`GenericTypeCell`]: static storage used by
//!   `Typed` implementations.

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod node_info;
mod nullable_info;
mod scalar_info;
mod sequence_info;
mod type_info;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeCell, NonGenericTypeInfoCell};
pub use node_info::{NodeInfo, NodeOrigin};
pub use nullable_info::NullableInfo;
pub use scalar_info::ScalarInfo;
pub use sequence_info::{ConfigSequence, SequenceInfo};
pub use type_info::{TypeInfo, TypeKind};

use core::any::{Any, TypeId};
use core::fmt;

// -----------------------------------------------------------------------------
// Type

/// The identity of a type: its [`TypeId`] and its path.
///
/// Equality and hashing only consider the `TypeId`.
///
/// ```
/// use core::any::TypeId;
/// use vc_config::info::Type;
///
/// let ty = Type::of::<String>();
/// assert_eq!(ty.id(), TypeId::of::<String>());
/// assert_eq!(ty.path(), "alloc::string::String");
/// ```
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    path: fn() -> &'static str,
}

impl Type {
    #[inline]
    pub const fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: core::any::type_name::<T>,
        }
    }

    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the full type path, as given by [`core::any::type_name`].
    #[inline]
    pub fn path(&self) -> &'static str {
        (self.path)()
    }

    /// Returns `true` if this is the type `T`.
    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl core::hash::Hash for Type {
    #[inline]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.path())
    }
}

// -----------------------------------------------------------------------------
// Typed

/// A type with static [`TypeInfo`], usable as a member type.
///
/// Implemented for primitives, `String`, `Option`, the std sequences,
/// [`ConfigNode`](vc_node::ConfigNode), and through
/// [`derive::ConfigObject`](crate::derive::ConfigObject),
/// [`impl_config_scalar!`](crate::impl_config_scalar) and
/// [`impl_config_node!`](crate::impl_config_node) for user types.
///
/// # Examples
///
/// ```
/// use vc_config::info::{TypeKind, Typed};
///
/// assert_eq!(u32::type_info().kind(), TypeKind::Scalar);
/// assert_eq!(<Option<Vec<u32>>>::type_info().kind(), TypeKind::Collection);
/// assert_eq!(<[u8; 4]>::type_info().kind(), TypeKind::Array);
/// ```
pub trait Typed: Any {
    fn type_info() -> &'static TypeInfo;
}
