use alloc::sync::Arc;
use core::any::{Any, TypeId, type_name};
use core::error::Error;
use core::fmt::{self, Display};
use core::str::FromStr;

use battery_utils::TypeIdMap;
use serde_core::de::DeserializeOwned;

use super::{AdapterError, DeserializeAdapter, FnAdapter, FromStrAdapter, TypeAdapter};
use crate::node::extract_mime;

// -----------------------------------------------------------------------------
// ErasedAdapter

trait ErasedAdapter: Send + Sync {
    fn decode_any(&self, text: &str) -> Result<Box<dyn Any>, AdapterError>;

    fn encode_any(&self, value: &dyn Any) -> Option<Result<String, AdapterError>>;

    fn target_path(&self) -> &'static str;
}

impl<A: TypeAdapter> ErasedAdapter for A {
    fn decode_any(&self, text: &str) -> Result<Box<dyn Any>, AdapterError> {
        match self.decode(text) {
            Ok(value) => Ok(Box::new(value)),
            Err(e) => Err(e),
        }
    }

    fn encode_any(&self, value: &dyn Any) -> Option<Result<String, AdapterError>> {
        value.downcast_ref::<A::Target>().map(|v| self.encode(v))
    }

    #[inline]
    fn target_path(&self) -> &'static str {
        type_name::<A::Target>()
    }
}

// -----------------------------------------------------------------------------
// TypeAdapters

/// A set of type adapters keyed by target type.
///
/// A set may be scoped to one content type, in which case mapping calls
/// for other content types ignore it.
///
/// # Examples
///
/// ```
/// use battery_map::adapter::TypeAdapters;
///
/// let mut adapters = TypeAdapters::for_content_type("application/json");
/// adapters.register_fn(|text: &str| Ok(text.to_uppercase()));
///
/// assert!(adapters.contains::<String>());
/// assert!(adapters.applies_to("application/json; charset=utf-8"));
/// assert!(!adapters.applies_to("text/xml"));
/// assert_eq!(adapters.decode::<String>("abc").unwrap().unwrap(), "ABC");
/// assert!(adapters.decode::<i32>("1").is_none());
/// ```
#[derive(Default, Clone)]
pub struct TypeAdapters {
    content_type: Option<Box<str>>,
    table: TypeIdMap<Arc<dyn ErasedAdapter>>,
}

impl TypeAdapters {
    /// Creates an empty set that applies to every content type.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set that only applies to `content_type`.
    pub fn for_content_type(content_type: &str) -> Self {
        Self {
            content_type: Some(extract_mime(content_type).into()),
            table: TypeIdMap::new(),
        }
    }

    /// The content type this set is scoped to.
    #[inline]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns `true` if this set is consulted for documents of `content_type`.
    pub fn applies_to(&self, content_type: &str) -> bool {
        match &self.content_type {
            Some(scope) => extract_mime(content_type).eq_ignore_ascii_case(scope),
            None => true,
        }
    }

    /// Registers `adapter` for its target type, replacing any previous one.
    pub fn register<A: TypeAdapter>(&mut self, adapter: A) -> &mut Self {
        if self
            .table
            .insert(TypeId::of::<A::Target>(), Arc::new(adapter))
            .is_some()
        {
            log::debug!("type adapter for `{}` replaced", type_name::<A::Target>());
        }
        self
    }

    /// Registers a decode function for `T`.
    pub fn register_fn<T, F>(&mut self, decode: F) -> &mut Self
    where
        T: 'static,
        F: Fn(&str) -> Result<T, AdapterError> + Send + Sync + 'static,
    {
        self.register(FnAdapter::new(decode))
    }

    /// Registers [`FromStrAdapter`] for `T`.
    pub fn register_from_str<T>(&mut self) -> &mut Self
    where
        T: FromStr + Display + 'static,
        T::Err: Error + Send + Sync + 'static,
    {
        self.register(FromStrAdapter::<T>::new())
    }

    /// Registers [`DeserializeAdapter`] for `T`.
    pub fn register_deserialize<T: DeserializeOwned + 'static>(&mut self) -> &mut Self {
        self.register(DeserializeAdapter::<T>::new())
    }

    #[inline]
    pub fn contains<T: 'static>(&self) -> bool {
        self.table.contains_type::<T>()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Decodes `text` with the adapter of `T`, `None` if there is none.
    pub fn decode<T: 'static>(&self, text: &str) -> Option<Result<T, AdapterError>> {
        let adapter = self.table.get_type::<T>()?;
        let value = adapter.decode_any(text).and_then(|value| {
            value
                .downcast::<T>()
                .map(|value| *value)
                .map_err(|_| format!("adapter of `{}` produced a foreign type", type_name::<T>()).into())
        });
        Some(value)
    }

    /// Encodes `value` with the adapter of `T`, `None` if there is none.
    pub fn encode<T: 'static>(&self, value: &T) -> Option<Result<String, AdapterError>> {
        self.table.get_type::<T>()?.encode_any(value)
    }
}

impl fmt::Debug for TypeAdapters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeAdapters")
            .field("content_type", &self.content_type)
            .field(
                "targets",
                &self.table.values().map(|a| a.target_path()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::TypeAdapters;
    use crate::adapter::TypeAdapter;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Deserialize)]
    #[serde(rename_all = "lowercase")]
    enum Status {
        Active,
        Disabled,
    }

    #[derive(Debug, PartialEq)]
    struct Celsius(f64);

    struct CelsiusAdapter;

    impl TypeAdapter for CelsiusAdapter {
        type Target = Celsius;

        fn decode(&self, text: &str) -> Result<Celsius, super::AdapterError> {
            let degrees = text.strip_suffix("C").ok_or("missing unit")?;
            Ok(Celsius(degrees.trim().parse()?))
        }

        fn encode(&self, value: &Celsius) -> Result<String, super::AdapterError> {
            Ok(format!("{}C", value.0))
        }
    }

    #[test]
    fn custom_adapter_round_trip() {
        let mut adapters = TypeAdapters::new();
        adapters.register(CelsiusAdapter);

        let value = adapters.decode::<Celsius>("21.5 C").unwrap().unwrap();
        assert_eq!(value, Celsius(21.5));
        assert_eq!(adapters.encode(&value).unwrap().unwrap(), "21.5C");
        assert!(adapters.decode::<Celsius>("21.5").unwrap().is_err());
    }

    #[test]
    fn serde_adapter() {
        let mut adapters = TypeAdapters::new();
        adapters.register_deserialize::<Status>();

        assert_eq!(adapters.decode::<Status>("disabled").unwrap().unwrap(), Status::Disabled);
        assert!(adapters.decode::<Status>("Active").unwrap().is_err());
        // Decode-only adapters refuse to encode.
        assert!(adapters.encode(&Status::Active).unwrap().is_err());
    }

    #[test]
    fn from_str_adapter_and_replacement() {
        let mut adapters = TypeAdapters::new();
        adapters
            .register_from_str::<u16>()
            .register_fn(|text: &str| Ok(text.len() as u16));

        assert_eq!(adapters.len(), 1);
        assert_eq!(adapters.decode::<u16>("abcd").unwrap().unwrap(), 4);
        assert!(adapters.encode(&4_u16).unwrap().is_err());
    }

    #[test]
    fn unscoped_applies_everywhere() {
        let adapters = TypeAdapters::new();
        assert!(adapters.is_empty());
        assert!(adapters.applies_to("application/anything"));
        assert_eq!(adapters.content_type(), None);
    }
}
