use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ConfigStruct;

/// Generate implementation code for `Typed`
///
/// The info describes a mapped node assignable to `dyn NodeObject` and to
/// every type listed in `#[config(extends(...))]`.
pub(crate) fn impl_trait_typed(info: &ConfigStruct) -> TokenStream {
    let vc_config_path = info.vc_config_path();
    let typed_ = crate::path::typed_(vc_config_path);
    let type_info_ = crate::path::type_info_(vc_config_path);
    let type_ = crate::path::type_(vc_config_path);
    let node_info_ = crate::path::node_info_(vc_config_path);

    let extends = info.attrs().extends.iter().map(|ty| {
        quote! {
            #type_::of::<#ty>()
        }
    });

    let type_info_tokens = quote! {
        #type_info_::Node(
            #node_info_::mapped::<Self>().with_bases([#(#extends),*])
        )
    };

    let inner_cell_tokens = if info.is_generic() {
        let info_cell = crate::path::generic_type_cell_(vc_config_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_insert::<Self, _>(|| {
                #type_info_tokens
            })
        }
    } else {
        let info_cell = crate::path::non_generic_type_info_cell_(vc_config_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_init(|| {
                #type_info_tokens
            })
        }
    };

    let ident = info.ident();
    let (impl_generics, ty_generics, where_clause) = info.split_generics();

    quote! {
        impl #impl_generics #typed_ for #ident #ty_generics #where_clause {
            fn type_info() -> &'static #type_info_ {
                #inner_cell_tokens
            }
        }
    }
}
