//! See following macros:
//!
//! - [`Response`]
//! - [`ResponseEnum`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static RESPONSE_ATTRIBUTE_NAME: &str = "response";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Destination Object Derivation
///
/// `#[derive(Response)]` implements `Value` (with `Shape::Object`) and
/// `Response` for a struct with named fields. The type must also implement
/// `Default`, which is used to allocate nested objects.
///
/// ## Member Directives
///
/// A field annotated with `#[response]` carries a directive. The top level
/// of a document only fills fields with a directive; nested objects fill
/// all of their fields.
///
/// ```rust, ignore
/// #[derive(Response, Default)]
/// struct User {
///     // Read from the key chosen by the naming policy, then the raw name.
///     #[response]
///     display_name: String,
///     // Mapping fails with `MissingField` if the key is absent.
///     #[response(required)]
///     id: i64,
///     // Explicit key, no naming policy and no fallback. Dots form a path.
///     #[response(name = "profile.location.city")]
///     city: Option<String>,
///     // Assigned through `fn(&mut Self, T)`, never with absent values.
///     #[response(set = Self::set_email)]
///     email: String,
///     // Not part of the member table.
///     #[response(skip)]
///     cache: Vec<u8>,
///     // Nested objects only: no directive, still filled when nested.
///     note: Option<String>,
/// }
/// ```
///
/// ## Payload Member
///
/// One field may be marked `#[response(payload)]`. A document mapped into
/// the type then fills that field, with all of its members, instead of the
/// type itself. The field type must implement `Response`.
///
/// ```rust, ignore
/// #[derive(Response, Default)]
/// struct GetUser {
///     user_id: u64,
///     #[response(payload)]
///     user: User,
/// }
/// ```
///
/// ## Generics
///
/// Type parameters are bounded by `Value`. A field whose type is exactly a
/// type parameter is recorded as such in the member table, so it resolves
/// against the binding context of the instantiation.
///
/// Lifetime parameters are not supported.
#[proc_macro_derive(Response, attributes(response))]
pub fn derive_response(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::ResponseStruct::from_ast(&ast) {
        Ok(data) => impls::impl_response(&data).into(),
        Err(e) => e.into_compile_error().into(),
    }
}

/// # Enumeration Derivation
///
/// `#[derive(ResponseEnum)]` implements `Enumeration` and `Value` (with
/// `Shape::Enum`) for an enum made of unit variants. A document value
/// matches a variant by its exact name, which may be changed with
/// `#[response(name = "...")]`.
///
/// ```rust, ignore
/// #[derive(ResponseEnum)]
/// enum State {
///     #[response(name = "open")]
///     Open,
///     #[response(name = "closed")]
///     Closed,
/// }
/// ```
#[proc_macro_derive(ResponseEnum, attributes(response))]
pub fn derive_response_enum(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::ResponseEnum::from_ast(&ast) {
        Ok(data) => impls::impl_enumeration(&data).into(),
        Err(e) => e.into_compile_error().into(),
    }
}
