use core::any::TypeId;
use core::fmt;

use crate::info::{NodeInfo, NullableInfo, ScalarInfo, SequenceInfo, Type};

// -----------------------------------------------------------------------------
// TypeKind

/// The dispatch category of a type, once optional wrappers are stripped.
///
/// Exactly one category applies to every [`Typed`](crate::info::Typed) type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Stored as one string value.
    Scalar,
    /// Stored as one child node.
    Node,
    /// Fixed or boxed slice of elements.
    Array,
    /// Growable collection of elements.
    Collection,
}

impl TypeKind {
    /// Returns `true` for arrays and collections.
    #[inline]
    pub const fn is_sequence(self) -> bool {
        matches!(self, Self::Array | Self::Collection)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => f.pad("Scalar"),
            Self::Node => f.pad("Node"),
            Self::Array => f.pad("Array"),
            Self::Collection => f.pad("Collection"),
        }
    }
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Static classification of a mappable type.
///
/// Obtained through [`Typed::type_info`](crate::info::Typed::type_info).
/// The optional wrapper is a distinct variant so the engine can rewrap
/// parsed values; [`strip_nullable`](Self::strip_nullable) removes it.
#[derive(Debug)]
pub enum TypeInfo {
    Nullable(NullableInfo),
    Scalar(ScalarInfo),
    Node(NodeInfo),
    Array(SequenceInfo),
    Collection(SequenceInfo),
}

impl TypeInfo {
    /// Returns the underlying [`Type`].
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Nullable(info) => info.ty(),
            Self::Scalar(info) => info.ty(),
            Self::Node(info) => info.ty(),
            Self::Array(info) | Self::Collection(info) => info.ty(),
        }
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.ty().id()
    }

    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    /// Removes every optional layer: `Option<Option<u8>>` yields the info of `u8`.
    pub fn strip_nullable(&'static self) -> &'static TypeInfo {
        let mut info = self;
        while let Self::Nullable(nullable) = info {
            info = nullable.inner();
        }
        info
    }

    /// Returns the category of the nullable-stripped type.
    ///
    /// ```
    /// use vc_config::info::{TypeKind, Typed};
    /// use vc_node::ConfigNode;
    ///
    /// assert_eq!(<Option<String>>::type_info().kind(), TypeKind::Scalar);
    /// assert_eq!(ConfigNode::type_info().kind(), TypeKind::Node);
    /// assert_eq!(<Box<[f32]>>::type_info().kind(), TypeKind::Array);
    /// ```
    pub fn kind(&'static self) -> TypeKind {
        match self.strip_nullable() {
            Self::Scalar(_) => TypeKind::Scalar,
            Self::Node(_) => TypeKind::Node,
            Self::Array(_) => TypeKind::Array,
            Self::Collection(_) => TypeKind::Collection,
            // `strip_nullable` never returns a nullable info.
            Self::Nullable(_) => TypeKind::Scalar,
        }
    }

    /// Returns the additional target types this type is assignable to.
    pub fn bases(&self) -> &[Type] {
        match self {
            Self::Scalar(info) => info.bases(),
            Self::Node(info) => info.bases(),
            Self::Nullable(_) | Self::Array(_) | Self::Collection(_) => &[],
        }
    }

    /// Returns `true` if a value of this type is accepted by a parser declared
    /// for `target`: the type itself or one of its [`bases`](Self::bases).
    pub fn is_assignable_to(&self, target: TypeId) -> bool {
        self.type_id() == target || self.bases().iter().any(|base| base.id() == target)
    }

    #[inline]
    pub const fn as_nullable(&self) -> Option<&NullableInfo> {
        match self {
            Self::Nullable(info) => Some(info),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_scalar(&self) -> Option<&ScalarInfo> {
        match self {
            Self::Scalar(info) => Some(info),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_node(&self) -> Option<&NodeInfo> {
        match self {
            Self::Node(info) => Some(info),
            _ => None,
        }
    }

    /// Returns the sequence info of arrays and collections.
    #[inline]
    pub const fn as_sequence(&self) -> Option<&SequenceInfo> {
        match self {
            Self::Array(info) | Self::Collection(info) => Some(info),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::NodeObject;
    use crate::info::{TypeKind, Typed};
    use alloc::collections::BTreeSet;
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::any::TypeId;
    use vc_node::ConfigNode;

    #[test]
    fn classification() {
        assert_eq!(i64::type_info().kind(), TypeKind::Scalar);
        assert_eq!(char::type_info().kind(), TypeKind::Scalar);
        assert_eq!(<Option<Option<bool>>>::type_info().kind(), TypeKind::Scalar);
        assert_eq!(ConfigNode::type_info().kind(), TypeKind::Node);
        assert_eq!(<Vec<String>>::type_info().kind(), TypeKind::Collection);
        assert_eq!(<BTreeSet<u8>>::type_info().kind(), TypeKind::Collection);
        assert_eq!(<[u8; 3]>::type_info().kind(), TypeKind::Array);
    }

    #[test]
    fn strip_nullable_removes_all_layers() {
        let info = <Option<Option<u16>>>::type_info();
        assert!(info.as_nullable().is_some());
        assert!(info.strip_nullable().ty().is::<u16>());
        assert!(u16::type_info().strip_nullable().ty().is::<u16>());
    }

    #[test]
    fn sequence_element_is_stripped() {
        let info = <Vec<Option<i32>>>::type_info().as_sequence().unwrap();
        assert!(info.item().ty().is::<Option<i32>>());
        assert!(info.element().ty().is::<i32>());
    }

    #[test]
    fn raw_node_is_not_a_node_object() {
        let info = ConfigNode::type_info();
        assert!(info.is_assignable_to(TypeId::of::<ConfigNode>()));
        assert!(!info.is_assignable_to(TypeId::of::<dyn NodeObject>()));
    }
}
