//! Member descriptors of mapped objects.
//!
//! A [`Member`] pairs one opted-in field with its [`FieldMeta`]. The table of
//! a type is generated by [`derive::ConfigObject`](crate::derive::ConfigObject),
//! built on first use and cached for the rest of the process.

use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use crate::ArrayHandling;
use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// FieldMeta

/// Per-member metadata, as declared by `#[config(...)]`.
///
/// ```
/// use vc_config::ArrayHandling;
/// use vc_config::member::FieldMeta;
///
/// const META: FieldMeta = FieldMeta::new()
///     .with_name("maxThrust")
///     .with_required(true)
///     .with_array_handling(ArrayHandling::SeparateValues);
///
/// assert_eq!(META.name, "maxThrust");
/// assert_eq!(META.separator, None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FieldMeta {
    /// Name override; empty means the storage name.
    pub name: &'static str,
    /// Absence of the member is a hard error.
    pub required: bool,
    /// Overrides [`SerializerSettings::array_handling`](crate::SerializerSettings::array_handling).
    pub array_handling: Option<ArrayHandling>,
    /// Overrides [`SerializerSettings::array_separator`](crate::SerializerSettings::array_separator).
    pub separator: Option<char>,
}

impl FieldMeta {
    #[inline]
    pub const fn new() -> Self {
        Self {
            name: "",
            required: false,
            array_handling: None,
            separator: None,
        }
    }

    #[inline]
    pub const fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    #[inline]
    pub const fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[inline]
    pub const fn with_array_handling(mut self, array_handling: ArrayHandling) -> Self {
        self.array_handling = Some(array_handling);
        self
    }

    #[inline]
    pub const fn with_separator(mut self, separator: char) -> Self {
        self.separator = Some(separator);
        self
    }
}

// -----------------------------------------------------------------------------
// Member

/// One serializable member of `T`.
///
/// The accessors work on the declared member type: `get` returns a reference
/// to the field, `set` takes a boxed value of the field type and hands it
/// back when it is of another type.
pub struct Member<T> {
    storage_name: &'static str,
    meta: FieldMeta,
    type_info: fn() -> &'static TypeInfo,
    get: fn(&T) -> &dyn Any,
    set: fn(&mut T, Box<dyn Any>) -> Result<(), Box<dyn Any>>,
}

impl<T> Member<T> {
    #[inline]
    pub const fn new(
        storage_name: &'static str,
        meta: FieldMeta,
        type_info: fn() -> &'static TypeInfo,
        get: fn(&T) -> &dyn Any,
        set: fn(&mut T, Box<dyn Any>) -> Result<(), Box<dyn Any>>,
    ) -> Self {
        Self {
            storage_name,
            meta,
            type_info,
            get,
            set,
        }
    }

    /// Returns the field identifier.
    #[inline]
    pub const fn storage_name(&self) -> &'static str {
        self.storage_name
    }

    /// Returns the name used in the node: the override, or the storage name.
    #[inline]
    pub const fn effective_name(&self) -> &'static str {
        if self.meta.name.is_empty() {
            self.storage_name
        } else {
            self.meta.name
        }
    }

    #[inline]
    pub const fn meta(&self) -> &FieldMeta {
        &self.meta
    }

    #[inline]
    pub const fn is_required(&self) -> bool {
        self.meta.required
    }

    /// Returns the info of the declared member type.
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    #[inline]
    pub fn get<'a>(&self, instance: &'a T) -> &'a dyn Any {
        (self.get)(instance)
    }

    /// Replaces the field value, returning `value` back if it is not of the
    /// declared member type.
    #[inline]
    pub fn set(&self, instance: &mut T, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        (self.set)(instance, value)
    }
}

impl<T> fmt::Debug for Member<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("storage_name", &self.storage_name)
            .field("meta", &self.meta)
            .field("type", self.type_info().ty())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldMeta, Member};
    use crate::ConfigObject;
    use crate::derive::ConfigObject;
    use crate::info::Typed;
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::any::Any;

    #[derive(Default)]
    struct Gauge {
        level: u8,
    }

    fn level() -> Member<Gauge> {
        Member::new(
            "level",
            FieldMeta::new().with_name("LEVEL"),
            u8::type_info,
            |this| &this.level,
            |this, value| {
                this.level = *value.downcast::<u8>()?;
                Ok(())
            },
        )
    }

    #[test]
    fn accessors() {
        let member = level();
        assert_eq!(member.effective_name(), "LEVEL");
        assert_eq!(member.storage_name(), "level");

        let mut gauge = Gauge::default();
        member.set(&mut gauge, Box::new(7_u8)).unwrap();
        assert_eq!(member.get(&gauge).downcast_ref::<u8>(), Some(&7));

        let rejected = member.set(&mut gauge, Box::new(7_u16) as Box<dyn Any>);
        assert!(rejected.is_err());
        assert_eq!(gauge.level, 7);
    }

    #[derive(ConfigObject, Default)]
    struct Valve {
        #[config(name = "Flow", required)]
        flow: f32,
        #[config]
        labels: Vec<String>,
        open: bool,
    }

    #[derive(ConfigObject, Default)]
    struct Holder<T: Typed + Default> {
        #[config]
        item: Option<T>,
    }

    #[test]
    fn derived_tables() {
        let members = Valve::members();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].effective_name(), "Flow");
        assert!(members[0].is_required());
        assert_eq!(members[1].storage_name(), "labels");

        let mut valve = Valve::default();
        members[0].set(&mut valve, Box::new(2.5_f32)).unwrap();
        assert_eq!(valve.flow, 2.5);
        assert!(!valve.open);

        let mut holder = Holder::<u8>::default();
        Holder::<u8>::members()[0]
            .set(&mut holder, Box::new(Some(3_u8)))
            .unwrap();
        assert_eq!(holder.item, Some(3));
        assert_eq!(Holder::<u16>::members()[0].storage_name(), "item");
    }
}
