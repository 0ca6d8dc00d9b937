use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Generics, Ident, Path, Type, WhereClause, parse_quote};

use super::{FieldAttributes, TypeAttributes};

// -----------------------------------------------------------------------------
// ConfigField

/// A field opted in with `#[config]`.
pub(crate) struct ConfigField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
}

// -----------------------------------------------------------------------------
// ConfigStruct

/// A struct deriving `ConfigObject`.
pub(crate) struct ConfigStruct<'a> {
    vc_config_path: Path,
    ident: &'a Ident,
    generics: &'a Generics,
    attrs: TypeAttributes,
    fields: Vec<ConfigField<'a>>,
}

impl<'a> ConfigStruct<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;

        let named = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(fields) => Some(&fields.named),
                Fields::Unit => None,
                Fields::Unnamed(_) => {
                    return Err(syn::Error::new_spanned(
                        &input.ident,
                        "`ConfigObject` requires named fields",
                    ));
                }
            },
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "`ConfigObject` can only be derived for structs",
                ));
            }
        };

        let mut fields = Vec::new();
        for field in named.into_iter().flatten() {
            let attrs = FieldAttributes::parse_attrs(&field.attrs)?;
            if !attrs.opted_in || !is_instantiable(&field.ty) {
                continue;
            }
            fields.push(ConfigField {
                ident: field.ident.as_ref().expect("named field"),
                ty: &field.ty,
                attrs,
            });
        }

        Ok(Self {
            vc_config_path: crate::path::vc_config(),
            ident: &input.ident,
            generics: &input.generics,
            attrs,
            fields,
        })
    }

    #[inline]
    pub fn vc_config_path(&self) -> &Path {
        &self.vc_config_path
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        self.ident
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn fields(&self) -> &[ConfigField<'a>] {
        &self.fields
    }

    #[inline]
    pub fn is_generic(&self) -> bool {
        !self.generics.params.is_empty()
    }

    /// Returns `(impl_generics, ty_generics, where_clause)` for every generated impl.
    ///
    /// For generic types, type parameters are bound by `'static`, member
    /// types by `Typed`, and `Self` by `Default`. Non-generic types get no
    /// extra bounds, so they may contain themselves through a sequence.
    pub fn split_generics(&self) -> (TokenStream, TokenStream, Option<WhereClause>) {
        let typed_ = crate::path::typed_(&self.vc_config_path);
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        if !self.is_generic() {
            return (quote!(#impl_generics), quote!(#ty_generics), where_clause.cloned());
        }

        let mut where_clause = where_clause.cloned().unwrap_or_else(|| WhereClause {
            where_token: Default::default(),
            predicates: Default::default(),
        });

        for param in self.generics.type_params() {
            let ident = &param.ident;
            where_clause.predicates.push(parse_quote!(#ident: 'static));
        }
        for field in &self.fields {
            let ty = field.ty;
            where_clause.predicates.push(parse_quote!(#ty: #typed_));
        }
        where_clause
            .predicates
            .push(parse_quote!(Self: ::core::default::Default));

        (quote!(#impl_generics), quote!(#ty_generics), Some(where_clause))
    }
}

/// Whether a member of type `ty` can be built by the engine.
///
/// References, raw pointers, trait objects, `impl Trait` and `PhantomData`
/// are not.
fn is_instantiable(ty: &Type) -> bool {
    match ty {
        Type::Reference(_) | Type::Ptr(_) | Type::TraitObject(_) | Type::ImplTrait(_) => false,
        Type::Paren(inner) => is_instantiable(&inner.elem),
        Type::Group(inner) => is_instantiable(&inner.elem),
        Type::Path(path) => path
            .path
            .segments
            .last()
            .is_none_or(|segment| segment.ident != "PhantomData"),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::is_instantiable;
    use syn::{Type, parse_quote};

    #[test]
    fn instantiable_types() {
        let accepted: [Type; 3] = [
            parse_quote!(u32),
            parse_quote!(Vec<Option<String>>),
            parse_quote!([f32; 3]),
        ];
        let rejected: [Type; 5] = [
            parse_quote!(&'static str),
            parse_quote!(*const u8),
            parse_quote!(dyn Fn()),
            parse_quote!(core::marker::PhantomData<u8>),
            parse_quote!((PhantomData<u8>)),
        ];
        assert!(accepted.iter().all(is_instantiable));
        assert!(!rejected.iter().any(is_instantiable));
    }
}
