//! Paths of `battery_map` items referenced by generated code.
//!
//! Kept in one place so generated code follows `battery_map` module moves.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `battery_map` crate.
///
/// 1. For crates that depend on `battery_map`, `::battery_map` is returned.
/// 2. For crates that depend on `battery`, `::battery::map` is returned.
/// 3. For other situations, `::battery_map` is returned, but this may be incorrect.
///
/// This reads the caller's manifest, so it is called once per derive and
/// the path is passed around.
pub(crate) fn battery_map() -> syn::Path {
    battery_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("battery_map"))
}

// -----------------------------------------------------------------------------
// Items

#[inline(always)]
pub(crate) fn value_(path: &syn::Path) -> TokenStream {
    quote!(#path::Value)
}

#[inline(always)]
pub(crate) fn response_(path: &syn::Path) -> TokenStream {
    quote!(#path::Response)
}

#[inline(always)]
pub(crate) fn enumeration_(path: &syn::Path) -> TokenStream {
    quote!(#path::Enumeration)
}

#[inline(always)]
pub(crate) fn visitor_(path: &syn::Path) -> TokenStream {
    quote!(#path::Visitor)
}

#[inline(always)]
pub(crate) fn key_(path: &syn::Path) -> TokenStream {
    quote!(#path::Key)
}

#[inline(always)]
pub(crate) fn node_(path: &syn::Path) -> TokenStream {
    quote!(#path::node::Node)
}

#[inline(always)]
pub(crate) fn error_(path: &syn::Path) -> TokenStream {
    quote!(#path::DeserializeError)
}

#[inline(always)]
pub(crate) fn info_(path: &syn::Path) -> TokenStream {
    quote!(#path::info)
}

#[inline(always)]
pub(crate) fn parse_enum_(path: &syn::Path) -> TokenStream {
    quote!(#path::coerce::parse_enum)
}
