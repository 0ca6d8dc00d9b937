use alloc::vec::Vec;

use crate::info::Type;

/// Info of a type stored as a single string value.
#[derive(Debug, Clone)]
pub struct ScalarInfo {
    ty: Type,
    bases: Vec<Type>,
}

impl ScalarInfo {
    #[inline]
    pub const fn new<T: ?Sized + 'static>() -> Self {
        Self {
            ty: Type::of::<T>(),
            bases: Vec::new(),
        }
    }

    /// Declares target types this scalar is assignable to, in addition to itself.
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
}
