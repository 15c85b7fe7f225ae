//! Custom scalar conversions keyed by target type.
//!
//! A [`TypeAdapter`] converts the text of a scalar into its target type.
//! Adapters are collected in [`TypeAdapters`], which the visitor consults
//! before any built-in conversion whenever the document value is a scalar.
//!
//! Ready-made adapters:
//!
//! - [`FnAdapter`]: a closure, see [`TypeAdapters::register_fn`].
//! - [`FromStrAdapter`]: any `FromStr + Display` type.
//! - [`DeserializeAdapter`]: any `serde` deserializable type read from a string.

// -----------------------------------------------------------------------------
// Modules

mod registry;

// -----------------------------------------------------------------------------
// Exports

pub use registry::TypeAdapters;

use core::any::type_name;
use core::error::Error;
use core::fmt::{self, Display};
use core::marker::PhantomData;
use core::str::FromStr;

use serde_core::de::value::StrDeserializer;
use serde_core::de::{DeserializeOwned, IntoDeserializer};

/// The error type returned by type adapters.
pub type AdapterError = Box<dyn Error + Send + Sync>;

// -----------------------------------------------------------------------------
// TypeAdapter

/// Converts scalar text to and from `Target`.
pub trait TypeAdapter: Send + Sync + 'static {
    type Target: 'static;

    fn decode(&self, text: &str) -> Result<Self::Target, AdapterError>;

    /// Converts a value back into scalar text.
    ///
    /// Adapters that only decode keep the default, which fails.
    fn encode(&self, value: &Self::Target) -> Result<String, AdapterError> {
        let _ = value;
        Err(format!("type adapter for `{}` cannot encode", type_name::<Self::Target>()).into())
    }
}

// -----------------------------------------------------------------------------
// FnAdapter

/// A decode-only adapter backed by a function.
pub struct FnAdapter<T, F> {
    decode: F,
    _marker: PhantomData<fn() -> T>,
}

impl<T, F> FnAdapter<T, F>
where
    T: 'static,
    F: Fn(&str) -> Result<T, AdapterError> + Send + Sync + 'static,
{
    #[inline]
    pub const fn new(decode: F) -> Self {
        Self {
            decode,
            _marker: PhantomData,
        }
    }
}

impl<T, F> TypeAdapter for FnAdapter<T, F>
where
    T: 'static,
    F: Fn(&str) -> Result<T, AdapterError> + Send + Sync + 'static,
{
    type Target = T;

    #[inline]
    fn decode(&self, text: &str) -> Result<T, AdapterError> {
        (self.decode)(text)
    }
}

impl<T, F> fmt::Debug for FnAdapter<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FnAdapter<{}>", type_name::<T>())
    }
}

// -----------------------------------------------------------------------------
// FromStrAdapter

/// Adapter for `FromStr + Display` types.
///
/// ```
/// use std::net::Ipv4Addr;
/// use battery_map::adapter::{FromStrAdapter, TypeAdapter};
///
/// let adapter = FromStrAdapter::<Ipv4Addr>::new();
/// let ip = adapter.decode("10.0.0.1").unwrap();
///
/// assert_eq!(ip, Ipv4Addr::new(10, 0, 0, 1));
/// assert_eq!(adapter.encode(&ip).unwrap(), "10.0.0.1");
/// assert!(adapter.decode("10.0.0").is_err());
/// ```
pub struct FromStrAdapter<T>(PhantomData<fn() -> T>);

impl<T> FromStrAdapter<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> TypeAdapter for FromStrAdapter<T>
where
    T: FromStr + Display + 'static,
    T::Err: Error + Send + Sync + 'static,
{
    type Target = T;

    #[inline]
    fn decode(&self, text: &str) -> Result<T, AdapterError> {
        text.parse::<T>().map_err(Into::into)
    }

    #[inline]
    fn encode(&self, value: &T) -> Result<String, AdapterError> {
        Ok(value.to_string())
    }
}

// -----------------------------------------------------------------------------
// DeserializeAdapter

/// Adapter for `serde` types deserializable from a single string,
/// such as unit enums and string newtypes.
pub struct DeserializeAdapter<T>(PhantomData<fn() -> T>);

impl<T> DeserializeAdapter<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: DeserializeOwned + 'static> TypeAdapter for DeserializeAdapter<T> {
    type Target = T;

    fn decode(&self, text: &str) -> Result<T, AdapterError> {
        let deserializer: StrDeserializer<'_, serde_core::de::value::Error> =
            text.into_deserializer();
        T::deserialize(deserializer).map_err(Into::into)
    }
}
