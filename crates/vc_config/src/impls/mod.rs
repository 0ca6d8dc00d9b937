//! [`Typed`](crate::info::Typed) implementations for std types, and the
//! macros declaring user types.
//!
//! - scalars: integers, floats, `bool`, `char`, `String`;
//! - nullable: `Option<T>`;
//! - collections: `Vec`, `VecDeque`, `LinkedList`, `BTreeSet`, `HashSet`;
//! - arrays: `[T; N]`, `Box<[T]>`;
//! - nodes: [`ConfigNode`](vc_node::ConfigNode).

mod node;
mod option;
mod scalar;
mod sequence;

/// Implements [`Typed`](crate::info::Typed) for a type stored as one string value.
///
/// Target types the scalar is assignable to can follow a colon. A value
/// parser must be registered for the type itself or for one of them.
///
/// ```
/// use vc_config::impl_config_scalar;
/// use vc_config::info::{TypeKind, Typed};
///
/// trait Unit {}
///
/// #[derive(Default)]
/// struct Meters(f64);
/// impl Unit for Meters {}
///
/// impl_config_scalar!(Meters: dyn Unit);
///
/// let info = Meters::type_info();
/// assert_eq!(info.kind(), TypeKind::Scalar);
/// assert!(info.is_assignable_to(core::any::TypeId::of::<dyn Unit>()));
/// ```
#[macro_export]
macro_rules! impl_config_scalar {
    ($ty:ty $(: $($base:ty),+ $(,)?)?) => {
        impl $crate::info::Typed for $ty {
            fn type_info() -> &'static $crate::info::TypeInfo {
                static CELL: $crate::info::NonGenericTypeInfoCell =
                    $crate::info::NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    $crate::info::TypeInfo::Scalar(
                        $crate::info::ScalarInfo::new::<$ty>()
                            $(.with_bases([$($crate::info::Type::of::<$base>()),+]))?,
                    )
                })
            }
        }
    };
}

/// Implements [`Typed`](crate::info::Typed) for a [`NodeObject`](crate::NodeObject)
/// loading and saving itself.
///
/// The type must implement `Default`. Target types the node is assignable to
/// can follow a colon; `dyn NodeObject` is always included.
///
/// ```
/// use vc_config::{ConfigError, NodeObject, SerializeContext, impl_config_node};
/// use vc_config::info::{NodeOrigin, Typed};
/// use vc_node::ConfigNode;
///
/// #[derive(Default)]
/// struct Curve(Vec<(f32, f32)>);
///
/// impl NodeObject for Curve {
///     fn load_node(&mut self, node: &ConfigNode, _: &mut SerializeContext<'_>) -> Result<(), ConfigError> {
///         for key in node.get_values("key") {
///             if let Some((t, v)) = key.split_once(' ') {
///                 self.0.push((t.parse().unwrap_or(0.0), v.parse().unwrap_or(0.0)));
///             }
///         }
///         Ok(())
///     }
///
///     fn save_node(&self, node: &mut ConfigNode, _: &mut SerializeContext<'_>) -> Result<(), ConfigError> {
///         for (t, v) in &self.0 {
///             node.add_value("key", format!("{t} {v}"));
///         }
///         Ok(())
///     }
/// }
///
/// impl_config_node!(Curve);
///
/// assert_eq!(Curve::type_info().as_node().unwrap().origin(), NodeOrigin::Hooked);
/// ```
#[macro_export]
macro_rules! impl_config_node {
    ($ty:ty $(: $($base:ty),+ $(,)?)?) => {
        impl $crate::info::Typed for $ty {
            fn type_info() -> &'static $crate::info::TypeInfo {
                static CELL: $crate::info::NonGenericTypeInfoCell =
                    $crate::info::NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    $crate::info::TypeInfo::Node(
                        $crate::info::NodeInfo::hooked::<$ty>()
                            $(.with_bases([$($crate::info::Type::of::<$base>()),+]))?,
                    )
                })
            }
        }
    };
}
