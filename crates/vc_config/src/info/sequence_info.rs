use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::MemberError;
use crate::info::{Type, TypeInfo, Typed};

type IterFn = for<'a> fn(&'a dyn Any) -> Option<Vec<&'a dyn Any>>;
type CollectFn = fn(Vec<Box<dyn Any>>) -> Result<Box<dyn Any>, MemberError>;

// -----------------------------------------------------------------------------
// ConfigSequence

/// A sequence usable as a member type.
///
/// Implemented for the std arrays and collections; the [`Typed`] impl of a
/// sequence wraps [`SequenceInfo::new`] into [`TypeInfo::Array`] or
/// [`TypeInfo::Collection`].
pub trait ConfigSequence: Any + Sized {
    /// The declared element type, optional wrapper included.
    type Item: Typed;

    /// Element count of fixed-size arrays.
    const FIXED_LEN: Option<usize> = None;

    /// Borrows every element, in iteration order.
    fn items(&self) -> Vec<&Self::Item>;

    /// Builds the sequence from owned elements.
    fn from_items(items: Vec<Self::Item>) -> Result<Self, MemberError>;
}

// -----------------------------------------------------------------------------
// SequenceInfo

/// Info of an array or an addable collection.
///
/// The sequence is read element by element and rebuilt from a list of boxed
/// elements, each of the declared [`item`](Self::item) type.
#[derive(Clone, Copy)]
pub struct SequenceInfo {
    ty: Type,
    item: fn() -> &'static TypeInfo,
    fixed_len: Option<usize>,
    iter: IterFn,
    collect: CollectFn,
}

impl SequenceInfo {
    /// Creates the info of the sequence `S`.
    pub fn new<S: ConfigSequence>() -> Self {
        Self {
            ty: Type::of::<S>(),
            item: S::Item::type_info,
            fixed_len: S::FIXED_LEN,
            iter: erased_iter::<S>,
            collect: erased_collect::<S>,
        }
    }

    #[inline(always)]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the info of the declared element type, optional wrapper included.
    #[inline]
    pub fn item(&self) -> &'static TypeInfo {
        (self.item)()
    }

    /// Returns the info of the nullable-stripped element type.
    #[inline]
    pub fn element(&self) -> &'static TypeInfo {
        self.item().strip_nullable()
    }

    /// Returns the element count of fixed-size arrays.
    #[inline]
    pub const fn fixed_len(&self) -> Option<usize> {
        self.fixed_len
    }

    /// Borrows every element of `value`, or `None` if `value` is not of this type.
    #[inline]
    pub fn iter<'a>(&self, value: &'a dyn Any) -> Option<Vec<&'a dyn Any>> {
        (self.iter)(value)
    }

    /// Builds the sequence from elements of the [`item`](Self::item) type.
    #[inline]
    pub fn collect(&self, items: Vec<Box<dyn Any>>) -> Result<Box<dyn Any>, MemberError> {
        (self.collect)(items)
    }
}

impl fmt::Debug for SequenceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequenceInfo")
            .field("ty", &self.ty)
            .field("item", self.item().ty())
            .field("fixed_len", &self.fixed_len)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Thunks

fn erased_iter<S: ConfigSequence>(value: &dyn Any) -> Option<Vec<&dyn Any>> {
    let sequence = value.downcast_ref::<S>()?;
    Some(
        sequence
            .items()
            .into_iter()
            .map(|item| item as &dyn Any)
            .collect(),
    )
}

fn erased_collect<S: ConfigSequence>(
    items: Vec<Box<dyn Any>>,
) -> Result<Box<dyn Any>, MemberError> {
    let mut typed = Vec::with_capacity(items.len());
    for item in items {
        match item.downcast::<S::Item>() {
            Ok(item) => typed.push(*item),
            Err(_) => {
                return Err(MemberError::TypeMismatch {
                    expected: core::any::type_name::<S::Item>(),
                });
            }
        }
    }
    let sequence = S::from_items(typed)?;
    Ok(Box::new(sequence))
}
