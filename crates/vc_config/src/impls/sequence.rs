use alloc::boxed::Box;
use alloc::collections::{BTreeSet, LinkedList, VecDeque};
use alloc::vec::Vec;
use core::hash::{BuildHasher, Hash};
use std::collections::HashSet;

use crate::MemberError;
use crate::info::{ConfigSequence, GenericTypeCell, SequenceInfo, TypeInfo, Typed};

// -----------------------------------------------------------------------------
// Collections

macro_rules! impl_collection {
    ($ty:ident <T $(, $s:ident)?> where $($bounds:tt)*) => {
        impl<T: Typed $(, $s)?> ConfigSequence for $ty<T $(, $s)?>
        where
            $($bounds)*
        {
            type Item = T;

            #[inline]
            fn items(&self) -> Vec<&T> {
                self.iter().collect()
            }

            #[inline]
            fn from_items(items: Vec<T>) -> Result<Self, MemberError> {
                Ok(items.into_iter().collect())
            }
        }

        impl<T: Typed $(, $s)?> Typed for $ty<T $(, $s)?>
        where
            $($bounds)*
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeCell = GenericTypeCell::new();
                CELL.get_or_insert::<Self, _>(|| TypeInfo::Collection(SequenceInfo::new::<Self>()))
            }
        }
    };
}

impl_collection!(Vec<T> where);
impl_collection!(VecDeque<T> where);
impl_collection!(LinkedList<T> where);
impl_collection!(BTreeSet<T> where T: Ord);
impl_collection!(HashSet<T, S> where T: Eq + Hash, S: BuildHasher + Default + 'static);

// -----------------------------------------------------------------------------
// Arrays

impl<T: Typed> ConfigSequence for Box<[T]> {
    type Item = T;

    #[inline]
    fn items(&self) -> Vec<&T> {
        self.iter().collect()
    }

    #[inline]
    fn from_items(items: Vec<T>) -> Result<Self, MemberError> {
        Ok(items.into_boxed_slice())
    }
}

impl<T: Typed> Typed for Box<[T]> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeCell = GenericTypeCell::new();
        CELL.get_or_insert::<Self, _>(|| TypeInfo::Array(SequenceInfo::new::<Self>()))
    }
}

impl<T: Typed, const N: usize> ConfigSequence for [T; N] {
    type Item = T;

    const FIXED_LEN: Option<usize> = Some(N);

    #[inline]
    fn items(&self) -> Vec<&T> {
        self.iter().collect()
    }

    fn from_items(items: Vec<T>) -> Result<Self, MemberError> {
        <[T; N]>::try_from(items).map_err(|items| MemberError::Collect {
            ty: core::any::type_name::<Self>(),
            expected: N,
            found: items.len(),
        })
    }
}

impl<T: Typed, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeCell = GenericTypeCell::new();
        CELL.get_or_insert::<Self, _>(|| TypeInfo::Array(SequenceInfo::new::<Self>()))
    }
}
