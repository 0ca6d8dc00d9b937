use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ConfigStruct;

/// Generate implementation code for `NodeObject`, walking the member table.
pub(crate) fn impl_trait_node_object(info: &ConfigStruct) -> TokenStream {
    let vc_config_path = info.vc_config_path();
    let node_object_ = crate::path::node_object_(vc_config_path);
    let config_error_ = crate::path::config_error_(vc_config_path);
    let context_ = crate::path::serialize_context_(vc_config_path);
    let exports_ = crate::path::macro_exports_(vc_config_path);

    let ident = info.ident();
    let (impl_generics, ty_generics, where_clause) = info.split_generics();

    quote! {
        impl #impl_generics #node_object_ for #ident #ty_generics #where_clause {
            fn load_node(
                &mut self,
                node: &#exports_::ConfigNode,
                cx: &mut #context_<'_>,
            ) -> #exports_::Result<(), #config_error_> {
                cx.load_members(node, self)
            }

            fn save_node(
                &self,
                node: &mut #exports_::ConfigNode,
                cx: &mut #context_<'_>,
            ) -> #exports_::Result<(), #config_error_> {
                cx.save_members(self, node)
            }
        }
    }
}

/// Generate an empty `ConfigCallbacks` implementation, unless the type
/// declares `#[config(callbacks)]`.
pub(crate) fn impl_trait_callbacks(info: &ConfigStruct) -> TokenStream {
    if info.attrs().callbacks {
        return crate::utils::empty();
    }

    let callbacks_ = crate::path::config_callbacks_(info.vc_config_path());
    let ident = info.ident();
    let (impl_generics, ty_generics, where_clause) = info.split_generics();

    quote! {
        impl #impl_generics #callbacks_ for #ident #ty_generics #where_clause {}
    }
}
