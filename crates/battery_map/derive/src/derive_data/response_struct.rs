use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, GenericParam, Generics, Ident, Type, spanned::Spanned};

use super::FieldAttributes;

/// A field of a `#[derive(Response)]` struct.
pub(crate) struct StructField<'a> {
    pub ident: &'a Ident,
    /// Field name without the `r#` prefix.
    pub name: String,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
    /// Index among the type parameters, if the field type is exactly one.
    pub param: Option<usize>,
}

/// Parsed input of `#[derive(Response)]`.
pub(crate) struct ResponseStruct<'a> {
    pub ident: &'a Ident,
    pub generics: &'a Generics,
    /// Fields forming the member table, in declaration order.
    pub members: Vec<StructField<'a>>,
    pub payload: Option<StructField<'a>>,
}

impl<'a> ResponseStruct<'a> {
    pub fn from_ast(ast: &'a DeriveInput) -> syn::Result<Self> {
        let fields = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(fields) => &fields.named,
                _ => {
                    return Err(syn::Error::new(
                        ast.ident.span(),
                        "`Response` can only be derived for structs with named fields",
                    ));
                }
            },
            Data::Enum(_) => {
                return Err(syn::Error::new(
                    ast.ident.span(),
                    "`Response` cannot be derived for enums, use `ResponseEnum` for unit enums",
                ));
            }
            Data::Union(_) => {
                return Err(syn::Error::new(
                    ast.ident.span(),
                    "`Response` cannot be derived for unions",
                ));
            }
        };

        if let Some(lifetime) = ast.generics.lifetimes().next() {
            return Err(syn::Error::new(
                lifetime.span(),
                "`Response` cannot be derived for types with lifetime parameters",
            ));
        }

        let params: Vec<&Ident> = ast
            .generics
            .params
            .iter()
            .filter_map(|param| match param {
                GenericParam::Type(ty) => Some(&ty.ident),
                _ => None,
            })
            .collect();

        let mut members = Vec::with_capacity(fields.len());
        let mut payload: Option<StructField<'a>> = None;

        for field in fields {
            let attrs = FieldAttributes::parse(&field.attrs)?;
            if attrs.skip.is_some() {
                continue;
            }

            let Some(ident) = field.ident.as_ref() else {
                continue;
            };

            let parsed = StructField {
                ident,
                name: ident.unraw().to_string(),
                ty: &field.ty,
                param: param_index(&field.ty, &params),
                attrs,
            };

            if let Some(span) = parsed.attrs.payload {
                if payload.is_some() {
                    return Err(syn::Error::new(span, "only one field can be the payload"));
                }
                payload = Some(parsed);
            } else {
                members.push(parsed);
            }
        }

        Ok(Self {
            ident: &ast.ident,
            generics: &ast.generics,
            members,
            payload,
        })
    }

    /// Type parameter identifiers, in declaration order.
    pub fn type_params(&self) -> impl Iterator<Item = &'a Ident> {
        self.generics.type_params().map(|param| &param.ident)
    }

    /// Lifetimes are rejected, so this means type or const parameters.
    #[inline]
    pub fn is_generic(&self) -> bool {
        !self.generics.params.is_empty()
    }
}

fn param_index(ty: &Type, params: &[&Ident]) -> Option<usize> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() || path.path.leading_colon.is_some() {
        return None;
    }
    let ident = path.path.get_ident()?;
    params.iter().position(|param| *param == ident)
}
