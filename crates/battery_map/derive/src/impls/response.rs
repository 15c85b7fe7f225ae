use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{WhereClause, parse_quote, spanned::Spanned};

use crate::derive_data::{ResponseStruct, StructField};

/// Generates `impl Value` and `impl Response` for a struct.
pub(crate) fn impl_response(data: &ResponseStruct) -> TokenStream {
    let battery_map_path = crate::path::battery_map();

    let value_impl = impl_value(data, &battery_map_path);
    let response_impl = impl_response_trait(data, &battery_map_path);

    quote! {
        #value_impl

        #response_impl
    }
}

/// The where clause shared by both impls.
///
/// Non generic types get `Self: Default` only. Generic types also bound
/// every type parameter and every member type by `Value`, so nested generic
/// members resolve inside the impl.
fn where_clause(data: &ResponseStruct, battery_map_path: &syn::Path) -> WhereClause {
    let value_ = crate::path::value_(battery_map_path);
    let response_ = crate::path::response_(battery_map_path);
    let ident = data.ident;
    let (_, ty_generics, where_clause) = data.generics.split_for_impl();

    let mut clause = where_clause.cloned().unwrap_or_else(|| WhereClause {
        where_token: Default::default(),
        predicates: Default::default(),
    });

    clause
        .predicates
        .push(parse_quote!(#ident #ty_generics: ::core::default::Default));

    if data.is_generic() {
        for param in data.type_params() {
            clause.predicates.push(parse_quote!(#param: #value_));
        }
        for field in data.members.iter().filter(|field| field.param.is_none()) {
            let ty = field.ty;
            clause.predicates.push(parse_quote!(#ty: #value_));
        }
        if let Some(payload) = &data.payload {
            let ty = payload.ty;
            clause.predicates.push(parse_quote!(#ty: #response_));
        }
    }

    clause
}

fn impl_value(data: &ResponseStruct, battery_map_path: &syn::Path) -> TokenStream {
    let value_ = crate::path::value_(battery_map_path);
    let visitor_ = crate::path::visitor_(battery_map_path);
    let node_ = crate::path::node_(battery_map_path);
    let key_ = crate::path::key_(battery_map_path);
    let error_ = crate::path::error_(battery_map_path);
    let info_ = crate::path::info_(battery_map_path);

    let ident = data.ident;
    let (impl_generics, ty_generics, _) = data.generics.split_for_impl();
    let where_clause = where_clause(data, battery_map_path);

    let type_args = if data.is_generic() {
        let params = data.type_params();
        quote! {
            fn type_args() -> ::std::vec::Vec<#info_::Type> {
                ::std::vec![#(#info_::Type::of::<#params>()),*]
            }
        }
    } else {
        TokenStream::new()
    };

    quote! {
        impl #impl_generics #value_ for #ident #ty_generics #where_clause {
            const SHAPE: #info_::Shape = #info_::Shape::Object;

            #type_args

            #[inline]
            fn absent() -> ::core::option::Option<Self> {
                ::core::option::Option::Some(<Self as ::core::default::Default>::default())
            }

            fn decode(
                visitor: &#visitor_<'_>,
                node: &dyn #node_,
                key: #key_<'_>,
                bindings: &#info_::TypeBindings,
            ) -> ::core::result::Result<Self, #error_> {
                visitor.visit_nested::<Self>(node, key, bindings)
            }
        }
    }
}

fn impl_response_trait(data: &ResponseStruct, battery_map_path: &syn::Path) -> TokenStream {
    let response_ = crate::path::response_(battery_map_path);
    let info_ = crate::path::info_(battery_map_path);

    let ident = data.ident;
    let (impl_generics, ty_generics, _) = data.generics.split_for_impl();
    let where_clause = where_clause(data, battery_map_path);

    let members = data
        .members
        .iter()
        .map(|field| member_expression(field, battery_map_path));

    let payload = data.payload.as_ref().map(|field| {
        let field_ident = field.ident;
        let name = &field.name;
        let ty = field.ty;
        quote! {
            .with_payload(#name, |dest, visitor, node| {
                visitor.visit_object(
                    node,
                    &mut dest.#field_ident,
                    &#info_::TypeBindings::root::<#ty>(),
                    false,
                )
            })
        }
    });

    let build = quote! {
        #info_::Descriptor::<Self>::new([#(#members),*]) #payload
    };

    let body = if data.is_generic() {
        quote! {
            static CELL: #info_::GenericDescriptorCell = #info_::GenericDescriptorCell::new();
            CELL.get_or_insert::<Self>(|| #build)
        }
    } else {
        quote! {
            static CELL: #info_::NonGenericDescriptorCell<#ident> =
                #info_::NonGenericDescriptorCell::new();
            CELL.get_or_init(|| #build)
        }
    };

    quote! {
        impl #impl_generics #response_ for #ident #ty_generics #where_clause {
            fn descriptor() -> &'static #info_::Descriptor<Self> {
                #body
            }
        }
    }
}

/// One `Member::new(info, assign)` entry.
fn member_expression(field: &StructField, battery_map_path: &syn::Path) -> TokenStream {
    let info_ = crate::path::info_(battery_map_path);

    let name = &field.name;
    let ty = field.ty;
    let field_ident = field.ident;

    let param = field.param.map(|index| quote!(.with_param(#index)));

    let directive = field.attrs.directive.map(|_| {
        let required = field.attrs.required.then(|| quote!(.required()));
        let named = field.attrs.name.as_ref().map(|name| quote!(.named(#name)));
        quote!(.with_directive(#info_::Directive::new() #required #named))
    });

    let (setter, assign) = match &field.attrs.setter {
        Some(path) => (
            Some(quote!(.with_setter())),
            quote_spanned!(path.span()=> #path(dest, value);),
        ),
        None => (None, quote!(dest.#field_ident = value;)),
    };

    quote! {
        #info_::Member::<Self>::new(
            #info_::MemberInfo::new::<#ty>(#name) #param #directive #setter,
            |dest, visitor, info, lookup, bindings| {
                if let ::core::option::Option::Some(value) =
                    visitor.member_value::<#ty>(info, lookup, bindings)?
                {
                    #assign
                }
                ::core::result::Result::Ok(())
            },
        )
    }
}
