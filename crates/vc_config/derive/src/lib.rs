//! See [`ConfigObject`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static CONFIG_ATTRIBUTE_NAME: &str = "config";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Config Object Derivation
///
/// `#[derive(ConfigObject)]` implements the following traits:
///
/// - `Typed`: a mapped node info, cached once per type.
/// - `ConfigObject`: the member table, built on first use.
/// - `NodeObject`: loads and saves the members through the serializer.
/// - `ConfigCallbacks`: empty, see [Callbacks](#callbacks).
///
/// The type must be a struct with named fields (or a unit struct) and
/// implement `Default`.
///
/// ## Members
///
/// Only fields marked with `#[config]` are members, in declaration order.
/// Fields of reference, raw pointer, trait object, `impl Trait` or
/// `PhantomData` type are skipped even when marked.
///
/// ```rust, ignore
/// #[derive(ConfigObject, Default)]
/// struct Engine {
///     #[config(name = "maxThrust", required)]
///     max_thrust: f32,
///     #[config(array_handling = SeparateValues)]
///     propellant: Vec<String>,
///     #[config(separator = ';')]
///     modes: Vec<String>,
///     // not a member
///     heat: f64,
/// }
/// ```
///
/// Available field options:
///
/// - `name = "..."`: the name in the node; the field name by default.
/// - `required`: a missing or failing member is a hard error.
/// - `array_handling = SingleValue | SeparateValues`: overrides the settings.
/// - `separator = 'c'`: overrides the settings.
///
/// ## Callbacks
///
/// With `#[config(callbacks)]`, no `ConfigCallbacks` impl is generated and
/// the type provides its own:
///
/// ```rust, ignore
/// #[derive(ConfigObject, Default)]
/// #[config(callbacks)]
/// struct Tank {
///     #[config]
///     capacity: f64,
///     level: f64,
/// }
///
/// impl ConfigCallbacks for Tank {
///     fn on_post_deserialize(&mut self) {
///         self.level = self.capacity;
///     }
/// }
/// ```
///
/// ## Extends
///
/// `#[config(extends(dyn Part))]` makes the type assignable to `dyn Part`,
/// so node parsers registered for `dyn Part` apply to it.
///
/// These attributes can only be applied at the type level.
#[proc_macro_derive(ConfigObject, attributes(config))]
pub fn derive_config_object(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::ConfigStruct::from_input(&ast) {
        Ok(info) => impls::impl_config_object(&info).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
