use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ResponseEnum;

/// Generates `impl Enumeration` and `impl Value` for a unit enum.
pub(crate) fn impl_enumeration(data: &ResponseEnum) -> TokenStream {
    let battery_map_path = crate::path::battery_map();

    let enumeration_ = crate::path::enumeration_(&battery_map_path);
    let value_ = crate::path::value_(&battery_map_path);
    let visitor_ = crate::path::visitor_(&battery_map_path);
    let node_ = crate::path::node_(&battery_map_path);
    let key_ = crate::path::key_(&battery_map_path);
    let error_ = crate::path::error_(&battery_map_path);
    let info_ = crate::path::info_(&battery_map_path);
    let parse_enum_ = crate::path::parse_enum_(&battery_map_path);

    let ident = data.ident;
    let names: Vec<_> = data.variants.iter().map(|v| &v.name).collect();
    let variants: Vec<_> = data.variants.iter().map(|v| v.ident).collect();

    quote! {
        impl #enumeration_ for #ident {
            const VARIANTS: &'static [&'static str] = &[#(#names),*];

            fn from_variant_name(name: &str) -> ::core::option::Option<Self> {
                match name {
                    #(#names => ::core::option::Option::Some(Self::#variants),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn variant_name(&self) -> &'static str {
                match *self {
                    #(Self::#variants => #names,)*
                }
            }
        }

        impl #value_ for #ident {
            const SHAPE: #info_::Shape = #info_::Shape::Enum;

            fn decode(
                _: &#visitor_<'_>,
                node: &dyn #node_,
                key: #key_<'_>,
                _: &#info_::TypeBindings,
            ) -> ::core::result::Result<Self, #error_> {
                ::core::result::Result::Ok(#parse_enum_::<Self>(key, node)?)
            }
        }
    }
}
