use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::info::Type;
use crate::{ConfigObject, NodeObject};

// -----------------------------------------------------------------------------
// NodeOrigin

/// How a node type maps to a child node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeOrigin {
    /// The raw document node itself.
    Raw,
    /// A type loading and saving itself through [`NodeObject`].
    Hooked,
    /// A type mapped member by member through [`ConfigObject`].
    Mapped,
}

// -----------------------------------------------------------------------------
// NodeInfo

/// Info of a type stored as a child node.
///
/// Hooked and mapped types are assignable to `dyn NodeObject`, which is the
/// target of the fallback node parser.
#[derive(Clone)]
pub struct NodeInfo {
    ty: Type,
    bases: Vec<Type>,
    origin: NodeOrigin,
    construct: fn() -> Box<dyn Any>,
    as_object: fn(&dyn Any) -> Option<&dyn NodeObject>,
    as_object_mut: fn(&mut dyn Any) -> Option<&mut dyn NodeObject>,
    post_deserialize: Option<fn(&mut dyn Any)>,
    pre_serialize: Option<fn(&dyn Any)>,
}

impl NodeInfo {
    /// Creates the info of a raw document node type.
    pub fn raw<T: Any + Default>() -> Self {
        Self {
            ty: Type::of::<T>(),
            bases: Vec::new(),
            origin: NodeOrigin::Raw,
            construct: construct::<T>,
            as_object: |_| None,
            as_object_mut: |_| None,
            post_deserialize: None,
            pre_serialize: None,
        }
    }

    /// Creates the info of a type with its own load/save hooks.
    pub fn hooked<T: NodeObject + Default>() -> Self {
        Self {
            ty: Type::of::<T>(),
            bases: vec![Type::of::<dyn NodeObject>()],
            origin: NodeOrigin::Hooked,
            construct: construct::<T>,
            as_object: as_object::<T>,
            as_object_mut: as_object_mut::<T>,
            post_deserialize: None,
            pre_serialize: None,
        }
    }

    /// Creates the info of a derived, member-mapped type.
    pub fn mapped<T: ConfigObject>() -> Self {
        Self {
            ty: Type::of::<T>(),
            bases: vec![Type::of::<dyn NodeObject>()],
            origin: NodeOrigin::Mapped,
            construct: construct::<T>,
            as_object: as_object::<T>,
            as_object_mut: as_object_mut::<T>,
            post_deserialize: Some(post_deserialize::<T>),
            pre_serialize: Some(pre_serialize::<T>),
        }
    }

    /// Declares target types this node type is assignable to, in addition to
    /// itself (and `dyn NodeObject`).
    pub fn with_bases(mut self, bases: impl IntoIterator<Item = Type>) -> Self {
        self.bases.extend(bases);
        self
    }

    #[inline(always)]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn bases(&self) -> &[Type] {
        &self.bases
    }

    #[inline]
    pub const fn origin(&self) -> NodeOrigin {
        self.origin
    }

    /// Creates a default-initialized instance.
    #[inline]
    pub fn construct(&self) -> Box<dyn Any> {
        (self.construct)()
    }

    /// Views `value` as a [`NodeObject`].
    ///
    /// Returns `None` for raw nodes, and when `value` is not of this type.
    #[inline]
    pub fn as_object<'a>(&self, value: &'a dyn Any) -> Option<&'a dyn NodeObject> {
        (self.as_object)(value)
    }

    /// Mutable version of [`as_object`](Self::as_object).
    #[inline]
    pub fn as_object_mut<'a>(&self, value: &'a mut dyn Any) -> Option<&'a mut dyn NodeObject> {
        (self.as_object_mut)(value)
    }

    /// Runs the post-deserialize hook of a mapped type. No-op otherwise.
    #[inline]
    pub fn post_deserialize(&self, value: &mut dyn Any) {
        if let Some(hook) = self.post_deserialize {
            hook(value);
        }
    }

    /// Runs the pre-serialize hook of a mapped type. No-op otherwise.
    #[inline]
    pub fn pre_serialize(&self, value: &dyn Any) {
        if let Some(hook) = self.pre_serialize {
            hook(value);
        }
    }
}

impl fmt::Debug for NodeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeInfo")
            .field("ty", &self.ty)
            .field("bases", &self.bases)
            .field("origin", &self.origin)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Thunks

fn construct<T: Any + Default>() -> Box<dyn Any> {
    Box::new(T::default())
}

fn as_object<T: NodeObject>(value: &dyn Any) -> Option<&dyn NodeObject> {
    value.downcast_ref::<T>().map(|v| v as &dyn NodeObject)
}

fn as_object_mut<T: NodeObject>(value: &mut dyn Any) -> Option<&mut dyn NodeObject> {
    value.downcast_mut::<T>().map(|v| v as &mut dyn NodeObject)
}

fn post_deserialize<T: ConfigObject>(value: &mut dyn Any) {
    if let Some(object) = value.downcast_mut::<T>() {
        object.on_post_deserialize();
    }
}

fn pre_serialize<T: ConfigObject>(value: &dyn Any) {
    if let Some(object) = value.downcast_ref::<T>() {
        object.on_pre_serialize();
    }
}
