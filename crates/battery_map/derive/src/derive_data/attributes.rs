use proc_macro2::Span;
use syn::{Attribute, ExprPath, LitStr, Meta, spanned::Spanned};

use crate::RESPONSE_ATTRIBUTE_NAME;

/// Attributes of a struct field.
///
/// - `#[response]`: the field carries a directive.
/// - `#[response(required)]`: absent keys fail the mapping.
/// - `#[response(name = "a.b")]`: explicit document key or path.
/// - `#[response(set = path)]`: assign through `fn(&mut Self, T)`.
/// - `#[response(payload)]`: the field receives the whole document.
/// - `#[response(skip)]`: the field is not a member.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    /// Span of the first `#[response]`, if any.
    pub directive: Option<Span>,
    pub required: bool,
    pub name: Option<LitStr>,
    pub setter: Option<ExprPath>,
    pub payload: Option<Span>,
    pub skip: Option<Span>,
}

impl FieldAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs.iter().filter(|a| a.path().is_ident(RESPONSE_ATTRIBUTE_NAME)) {
            this.directive.get_or_insert(attr.span());

            if let Meta::Path(_) = attr.meta {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("required") {
                    this.required = true;
                } else if meta.path.is_ident("name") {
                    let name: LitStr = meta.value()?.parse()?;
                    if name.value().is_empty() {
                        return Err(syn::Error::new(name.span(), "member name cannot be empty"));
                    }
                    this.name = Some(name);
                } else if meta.path.is_ident("set") {
                    this.setter = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("payload") {
                    this.payload = Some(meta.path.span());
                } else if meta.path.is_ident("skip") {
                    this.skip = Some(meta.path.span());
                } else {
                    return Err(meta.error(
                        "unsupported attribute, expected `required`, `name`, `set`, `payload` or `skip`",
                    ));
                }
                Ok(())
            })?;
        }

        let configured = this.required || this.name.is_some() || this.setter.is_some();
        if let Some(span) = this.payload
            && (configured || this.skip.is_some())
        {
            return Err(syn::Error::new(
                span,
                "`payload` cannot be combined with other member attributes",
            ));
        }
        if let Some(span) = this.skip
            && configured
        {
            return Err(syn::Error::new(
                span,
                "`skip` cannot be combined with other member attributes",
            ));
        }

        Ok(this)
    }
}

/// Attributes of an enum variant, only `#[response(name = "...")]`.
#[derive(Default)]
pub(crate) struct VariantAttributes {
    pub name: Option<LitStr>,
}

impl VariantAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs.iter().filter(|a| a.path().is_ident(RESPONSE_ATTRIBUTE_NAME)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    this.name = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("unsupported attribute, expected `name`"))
                }
            })?;
        }

        Ok(this)
    }
}
