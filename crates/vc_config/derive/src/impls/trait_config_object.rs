use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{ConfigField, ConfigStruct};

/// Generate the `FieldMeta` expression of a member, similar to:
///
/// ```ignore
/// _path_::FieldMeta::new()
///     .with_name("maxThrust")
///     .with_required(true)
/// ```
fn field_meta_expression(field: &ConfigField, vc_config_path: &syn::Path) -> TokenStream {
    let field_meta_ = crate::path::field_meta_(vc_config_path);
    let attrs = &field.attrs;

    let with_name = attrs.name.as_ref().map(|name| quote!(.with_name(#name)));
    let with_required = attrs.required.then(|| quote!(.with_required(true)));
    let with_array_handling = attrs.array_handling.as_ref().map(|handling| {
        let array_handling_ = crate::path::array_handling_(vc_config_path);
        quote!(.with_array_handling(#array_handling_::#handling))
    });
    let with_separator = attrs.separator.as_ref().map(|sep| quote!(.with_separator(#sep)));

    quote! {
        #field_meta_::new()
            #with_name
            #with_required
            #with_array_handling
            #with_separator
    }
}

/// Generate implementation code for `ConfigObject`
///
/// The member table is built on first use and cached per type.
pub(crate) fn impl_trait_config_object(info: &ConfigStruct) -> TokenStream {
    let vc_config_path = info.vc_config_path();
    let config_object_ = crate::path::config_object_(vc_config_path);
    let typed_ = crate::path::typed_(vc_config_path);
    let member_ = crate::path::member_(vc_config_path);
    let cell_ = crate::path::generic_type_cell_(vc_config_path);
    let exports_ = crate::path::macro_exports_(vc_config_path);

    let members = info.fields().iter().map(|field| {
        let ident = field.ident;
        let ty = field.ty;
        let storage_name = ident.to_string();
        let meta = field_meta_expression(field, vc_config_path);

        quote! {
            #member_::<Self>::new(
                #storage_name,
                #meta,
                <#ty as #typed_>::type_info,
                |this| &this.#ident,
                |this, value| {
                    this.#ident = *#exports_::Box::<dyn #exports_::Any>::downcast::<#ty>(value)?;
                    #exports_::Result::Ok(())
                },
            )
        }
    });

    let ident = info.ident();
    let (impl_generics, ty_generics, where_clause) = info.split_generics();

    quote! {
        impl #impl_generics #config_object_ for #ident #ty_generics #where_clause {
            fn members() -> &'static [#member_<Self>] {
                static CELL: #cell_ = #cell_::new();
                CELL.get_or_insert::<Self, _>(|| {
                    #exports_::Vec::from([#(#members),*])
                })
                .as_slice()
            }
        }
    }
}
