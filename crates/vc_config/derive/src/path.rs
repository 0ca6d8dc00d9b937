//! Paths of the `vc_config` items referenced by generated code.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `vc_config` crate.
///
/// 1. For crates that depend on `vc_config`, `::vc_config` is returned.
/// 2. For crates that depend on `vc_conf`, `::vc_conf::config` is returned.
/// 3. Otherwise `::vc_config` is returned, which may be incorrect.
///
/// Reading the manifest is not cheap: call it once per derive and pass the
/// path along.
pub(crate) fn vc_config() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_config"))
}

// -----------------------------------------------------------------------------
// Items

#[inline(always)]
pub(crate) fn macro_exports_(vc_config_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_config_path::__macro_exports
    }
}

#[inline(always)]
pub(crate) fn typed_(vc_config_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_config_path::info::Typed
    }
}

#[inline(always)]
pub(crate) fn type_info_(vc_config_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_config_path::info::TypeInfo
    }
}

#[inline(always)]
pub(crate) fn type_(vc_config_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_config_path::info::Type
    }
}

#[inline(always)]
pub(crate) fn node_info_(vc_config_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_config_path::info::NodeInfo
    }
}

#[inline(always)]
pub(crate) fn generic_type_cell_(vc_config_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_config_path::info::GenericTypeCell
    }
}

#[inline(always)]
pub(crate) fn non_generic_type_info_cell_(vc_config_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_config_path::info::NonGenericTypeInfoCell
    }
}

#[inline(always)]
pub(crate) fn member_(vc_config_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_config_path::member::Member
    }
}

#[inline(always)]
pub(crate) fn field_meta_(vc_config_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_config_path::member::FieldMeta
    }
}

#[inline(always)]
pub(crate) fn array_handling_(vc_config_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_config_path::ArrayHandling
    }
}

#[inline(always)]
pub(crate) fn config_object_(vc_config_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_config_path::ConfigObject
    }
}

#[inline(always)]
pub(crate) fn node_object_(vc_config_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_config_path::NodeObject
    }
}

#[inline(always)]
pub(crate) fn config_callbacks_(vc_config_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_config_path::ConfigCallbacks
    }
}

#[inline(always)]
pub(crate) fn config_error_(vc_config_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_config_path::ConfigError
    }
}

#[inline(always)]
pub(crate) fn serialize_context_(vc_config_path: &syn::Path) -> TokenStream {
    quote! {
        #vc_config_path::SerializeContext
    }
}
