use std::collections::HashSet;

use syn::{Data, DeriveInput, Fields, Ident, LitStr};

use super::VariantAttributes;

pub(crate) struct EnumVariant<'a> {
    pub ident: &'a Ident,
    /// The name matched against document values.
    pub name: LitStr,
}

/// Parsed input of `#[derive(ResponseEnum)]`.
pub(crate) struct ResponseEnum<'a> {
    pub ident: &'a Ident,
    pub variants: Vec<EnumVariant<'a>>,
}

impl<'a> ResponseEnum<'a> {
    pub fn from_ast(ast: &'a DeriveInput) -> syn::Result<Self> {
        let Data::Enum(data) = &ast.data else {
            return Err(syn::Error::new(
                ast.ident.span(),
                "`ResponseEnum` can only be derived for enums",
            ));
        };

        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new(
                ast.ident.span(),
                "`ResponseEnum` cannot be derived for generic enums",
            ));
        }

        let mut names = HashSet::with_capacity(data.variants.len());
        let mut variants = Vec::with_capacity(data.variants.len());

        for variant in &data.variants {
            if !matches!(variant.fields, Fields::Unit) {
                return Err(syn::Error::new(
                    variant.ident.span(),
                    "`ResponseEnum` only supports unit variants",
                ));
            }

            let attrs = VariantAttributes::parse(&variant.attrs)?;
            let name = attrs
                .name
                .unwrap_or_else(|| LitStr::new(&variant.ident.to_string(), variant.ident.span()));

            if !names.insert(name.value()) {
                return Err(syn::Error::new(
                    name.span(),
                    format!("duplicate variant name `{}`", name.value()),
                ));
            }

            variants.push(EnumVariant {
                ident: &variant.ident,
                name,
            });
        }

        Ok(Self {
            ident: &ast.ident,
            variants,
        })
    }
}
