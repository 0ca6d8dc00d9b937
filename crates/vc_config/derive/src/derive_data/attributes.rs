//! Parsing of `#[config(...)]` attributes.

use syn::{Attribute, Ident, LitChar, LitStr, Meta, Token, Type};
use syn::{meta::ParseNestedMeta, parenthesized, punctuated::Punctuated};

use crate::CONFIG_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// TypeAttributes

/// Type level attributes.
///
/// - `callbacks`: the user implements `ConfigCallbacks`.
/// - `extends(dyn A, dyn B)`: extra types the derived type is assignable to,
///   used when resolving parsers.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    pub callbacks: bool,
    pub extends: Vec<Type>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(CONFIG_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("callbacks") {
                    this.callbacks = true;
                    Ok(())
                } else if meta.path.is_ident("extends") {
                    let content;
                    parenthesized!(content in meta.input);
                    let types = Punctuated::<Type, Token![,]>::parse_terminated(&content)?;
                    this.extends.extend(types);
                    Ok(())
                } else {
                    Err(meta.error("expected `callbacks` or `extends(...)`"))
                }
            })?;
        }

        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Field level attributes. A field is a member only if it carries `#[config]`.
///
/// - `name = "..."`: the name used in the node.
/// - `required`: absence is a hard error.
/// - `array_handling = SingleValue | SeparateValues`
/// - `separator = ';'`
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    pub opted_in: bool,
    pub name: Option<LitStr>,
    pub required: bool,
    pub array_handling: Option<Ident>,
    pub separator: Option<LitChar>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(CONFIG_ATTRIBUTE_NAME) {
                continue;
            }
            this.opted_in = true;

            // A bare `#[config]` only opts in.
            if let Meta::Path(_) = attr.meta {
                continue;
            }
            attr.parse_nested_meta(|meta| this.parse_meta(meta))?;
        }

        Ok(this)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("name") {
            let name: LitStr = meta.value()?.parse()?;
            if name.value().is_empty() {
                return Err(syn::Error::new(name.span(), "member name cannot be empty"));
            }
            self.name = Some(name);
        } else if meta.path.is_ident("required") {
            self.required = true;
        } else if meta.path.is_ident("array_handling") {
            let handling: Ident = meta.value()?.parse()?;
            if handling != "SingleValue" && handling != "SeparateValues" {
                return Err(syn::Error::new(
                    handling.span(),
                    "expected `SingleValue` or `SeparateValues`",
                ));
            }
            self.array_handling = Some(handling);
        } else if meta.path.is_ident("separator") {
            self.separator = Some(meta.value()?.parse()?);
        } else {
            return Err(meta.error(
                "expected `name`, `required`, `array_handling` or `separator`",
            ));
        }
        Ok(())
    }
}
