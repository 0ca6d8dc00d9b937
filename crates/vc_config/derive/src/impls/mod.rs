//! Code generation of `#[derive(ConfigObject)]`.

// -----------------------------------------------------------------------------
// Modules

mod trait_config_object;
mod trait_node_object;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ConfigStruct;

pub(crate) use trait_config_object::impl_trait_config_object;
pub(crate) use trait_node_object::{impl_trait_callbacks, impl_trait_node_object};
pub(crate) use trait_typed::impl_trait_typed;

/// Generate every implementation of a derived type.
pub(crate) fn impl_config_object(info: &ConfigStruct) -> TokenStream {
    let typed_impl = impl_trait_typed(info);
    let config_object_impl = impl_trait_config_object(info);
    let node_object_impl = impl_trait_node_object(info);
    let callbacks_impl = impl_trait_callbacks(info);

    quote! {
        #typed_impl
        #config_object_impl
        #node_object_impl
        #callbacks_impl
    }
}
