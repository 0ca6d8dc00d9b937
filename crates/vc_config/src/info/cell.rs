//! Containers for static storage of type information.
//!
//! ## NonGenericTypeInfoCell
//!
//! For non generic types: an [`OnceLock`] holding the [`TypeInfo`].
//!
//! ## GenericTypeCell
//!
//! If the type is generic, the `static CELL` inside the function is shared by
//! every instantiation. The cell therefore holds a [`TypeIdMap`] behind a
//! [`RwLock`], keyed by the instantiated type. Each key owns a leaked
//! [`OnceLock`] slot, initialized after the map lock is released. Values are
//! leaked and live for the rest of the process.

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::TypeIdMap;
use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// NonGenericTypeInfoCell

/// Static storage of the [`TypeInfo`] of a non-generic type.
///
/// ```
/// use vc_config::info::{NonGenericTypeInfoCell, ScalarInfo, TypeInfo, Typed};
///
/// #[derive(Default)]
/// struct Meters(f64);
///
/// impl Typed for Meters {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Scalar(ScalarInfo::new::<Meters>()))
///     }
/// }
///
/// assert!(Meters::type_info().ty().is::<Meters>());
/// ```
pub struct NonGenericTypeInfoCell(OnceLock<TypeInfo>);

impl NonGenericTypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored info, initializing it with `f` on first access.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> TypeInfo) -> &TypeInfo {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericTypeCell

/// Static storage of per-type values for generic types.
///
/// Used for the [`TypeInfo`] of generic types and for the member tables of
/// derived objects.
///
/// ```
/// use vc_config::info::GenericTypeCell;
///
/// struct Stack<T>(Vec<T>);
///
/// fn describe<T: 'static>() -> &'static String {
///     static CELL: GenericTypeCell = GenericTypeCell::new();
///     CELL.get_or_insert::<Stack<T>, _>(|| format!("stack of {}", core::any::type_name::<T>()))
/// }
///
/// assert_eq!(describe::<u8>(), "stack of u8");
/// assert_eq!(describe::<bool>(), "stack of bool");
/// assert!(core::ptr::eq(describe::<u8>(), describe::<u8>()));
/// ```
pub struct GenericTypeCell(RwLock<TypeIdMap<&'static Slot>>);

type Slot = OnceLock<&'static (dyn Any + Send + Sync)>;

impl GenericTypeCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the value stored for `G`, initializing it with `f` on first access.
    ///
    /// `f` runs at most once per `G`, even under concurrent first access.
    /// It runs outside the map lock, so it may use this cell for other types.
    /// Every call for one `G` must produce the same value type `V`.
    #[inline(always)]
    pub fn get_or_insert<G: ?Sized + 'static, V: Any + Send + Sync>(
        &self,
        f: impl FnOnce() -> V,
    ) -> &'static V {
        let value = self.slot(TypeId::of::<G>()).get_or_init(|| {
            Box::leak(Box::new(f())) as &'static (dyn Any + Send + Sync)
        });
        value
            .downcast_ref()
            .expect("`GenericTypeCell` entries keep one value type per key")
    }

    #[inline(never)]
    fn slot(&self, type_id: TypeId) -> &'static Slot {
        let found = self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied();
        match found {
            Some(slot) => slot,
            None => *self
                .0
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .get_or_insert(type_id, || Box::leak(Box::new(Slot::new()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GenericTypeCell;
    use alloc::string::String;
    use core::any::type_name;
    use core::sync::atomic::{AtomicUsize, Ordering};

    static BUILDS: AtomicUsize = AtomicUsize::new(0);

    fn table<T: 'static>() -> &'static u32 {
        static CELL: GenericTypeCell = GenericTypeCell::new();
        CELL.get_or_insert::<T, _>(|| {
            BUILDS.fetch_add(1, Ordering::Relaxed);
            size_of::<T>() as u32
        })
    }

    #[test]
    fn builds_once_per_type() {
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    assert_eq!(*table::<u64>(), 8);
                    assert_eq!(*table::<u16>(), 2);
                });
            }
        });
        assert_eq!(BUILDS.load(Ordering::Relaxed), 2);
        assert!(core::ptr::eq(table::<u64>(), table::<u64>()));
    }

    fn label<T: 'static>(nested: bool) -> &'static String {
        static CELL: GenericTypeCell = GenericTypeCell::new();
        CELL.get_or_insert::<T, _>(|| {
            let mut text = String::from(type_name::<T>());
            if nested {
                text.push_str(" > ");
                text.push_str(label::<u16>(false));
            }
            text
        })
    }

    #[test]
    fn initializer_may_reenter() {
        let text = label::<u8>(true);
        assert_eq!(*text, "u8 > u16");
        assert!(core::ptr::eq(text, label::<u8>(false)));
        assert_eq!(*label::<u16>(true), "u16");
    }
}
