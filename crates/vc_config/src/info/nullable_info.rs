use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use crate::info::{Type, TypeInfo, Typed};

/// Info of an optional wrapper (`Option<T>`).
///
/// `None` is the absence of a value: it is never written, and it is what an
/// absent optional member keeps.
#[derive(Clone, Copy)]
pub struct NullableInfo {
    ty: Type,
    inner: fn() -> &'static TypeInfo,
    unwrap: fn(&dyn Any) -> Option<&dyn Any>,
    wrap: fn(Box<dyn Any>) -> Result<Box<dyn Any>, Box<dyn Any>>,
}

impl NullableInfo {
    /// Creates the info of `Option<T>`.
    pub fn new<T: Typed>() -> Self {
        Self {
            ty: Type::of::<Option<T>>(),
            inner: T::type_info,
            unwrap: unwrap_option::<T>,
            wrap: wrap_option::<T>,
        }
    }

    #[inline(always)]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the info of the wrapped type.
    #[inline]
    pub fn inner(&self) -> &'static TypeInfo {
        (self.inner)()
    }

    /// Returns the wrapped value, or `None` if `value` is `None`.
    ///
    /// Also returns `None` when `value` is not of this type.
    #[inline]
    pub fn unwrap<'a>(&self, value: &'a dyn Any) -> Option<&'a dyn Any> {
        (self.unwrap)(value)
    }

    /// Wraps a value of the inner type into `Some`.
    ///
    /// Returns the value back if it is not of the inner type.
    #[inline]
    pub fn wrap(&self, value: Box<dyn Any>) -> Result<Box<dyn Any>, Box<dyn Any>> {
        (self.wrap)(value)
    }
}

impl fmt::Debug for NullableInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NullableInfo")
            .field("ty", &self.ty)
            .field("inner", self.inner().ty())
            .finish()
    }
}

fn unwrap_option<T: Any>(value: &dyn Any) -> Option<&dyn Any> {
    value
        .downcast_ref::<Option<T>>()?
        .as_ref()
        .map(|inner| inner as &dyn Any)
}

fn wrap_option<T: Any>(value: Box<dyn Any>) -> Result<Box<dyn Any>, Box<dyn Any>> {
    let inner = value.downcast::<T>()?;
    Ok(Box::new(Some(*inner)))
}

#[cfg(test)]
mod tests {
    use crate::info::Typed;
    use alloc::boxed::Box;
    use core::any::Any;

    #[test]
    fn wrap_and_unwrap() {
        let info = <Option<u8>>::type_info().as_nullable().unwrap();

        let some: Option<u8> = Some(3);
        let inner = info.unwrap(&some).unwrap();
        assert_eq!(inner.downcast_ref::<u8>(), Some(&3));
        assert!(info.unwrap(&None::<u8>).is_none());

        let wrapped = info.wrap(Box::new(4_u8)).unwrap();
        assert_eq!(wrapped.downcast_ref::<Option<u8>>(), Some(&Some(4)));

        let rejected = info.wrap(Box::new("text") as Box<dyn Any>).unwrap_err();
        assert!(rejected.is::<&str>());
    }
}
