use core::error::Error;
use core::fmt::Display;

use thiserror::Error;

use crate::adapter::AdapterError;

// -----------------------------------------------------------------------------
// CoercionError

/// A document value could not be converted into the target type.
///
/// `key` is the member name, or the element position (`[3]`) when the
/// value comes from an array.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert `{value}` at `{key}` into {expected}")]
pub struct CoercionError {
    key: String,
    value: String,
    expected: &'static str,
}

impl CoercionError {
    /// Creates a coercion error for the value found under `key`.
    pub fn new(key: impl Display, value: impl Display, expected: &'static str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
            expected,
        }
    }

    /// The member name or element position of the value.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The textual form of the rejected value.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// A short description of the target, such as `"integer"`.
    #[inline]
    pub fn expected(&self) -> &'static str {
        self.expected
    }
}

// -----------------------------------------------------------------------------
// ParseError

/// A navigator failed to parse the raw document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed `{content_type}` document: {message}")]
pub struct ParseError {
    content_type: String,
    message: String,
}

impl ParseError {
    pub fn new(content_type: impl Into<String>, message: impl Display) -> Self {
        Self {
            content_type: content_type.into(),
            message: message.to_string(),
        }
    }

    #[inline]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

// -----------------------------------------------------------------------------
// DeserializeError

/// The failure of a mapping call.
///
/// The first failure aborts the call, members assigned before it keep
/// their new values.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeserializeError {
    /// No navigator is registered for the MIME type.
    #[error("no navigator is registered for content type `{0}`")]
    UnsupportedContentType(String),
    /// A required member has no value in the document.
    #[error("required member `{member}` is missing (document key `{key}`)")]
    MissingField { member: &'static str, key: String },
    /// A scalar could not be converted into the member type.
    #[error(transparent)]
    Coercion(#[from] CoercionError),
    /// A registered type adapter rejected the scalar text.
    #[error("type adapter for `{type_path}` rejected `{value}` at `{key}`: {source}")]
    Adapter {
        key: String,
        type_path: &'static str,
        value: String,
        #[source]
        source: AdapterError,
    },
    /// The type can only be produced by a type adapter and none is registered.
    #[error("cannot instantiate `{type_path}` at `{key}`: no type adapter applies")]
    Instantiation { key: String, type_path: &'static str },
    /// The navigator rejected the raw document.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl DeserializeError {
    /// Returns the underlying error of adapter failures.
    pub fn adapter_source(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        match self {
            Self::Adapter { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// UnsupportedShape

/// A member whose declared shape cannot be filled.
///
/// These are not failures of the mapping call: they are logged with
/// [`log::error!`] and the member is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum UnsupportedShape {
    #[error("member `{member}` is a `{type_path}`, only `Vec` sequences can be filled")]
    NonCanonicalSequence {
        member: &'static str,
        type_path: &'static str,
    },
    #[error("member `{member}` is the key-value mapping `{type_path}`, which cannot be filled yet")]
    Mapping {
        member: &'static str,
        type_path: &'static str,
    },
    #[error("member `{member}` nests containers in `{type_path}`, which cannot be filled yet")]
    NestedContainer {
        member: &'static str,
        type_path: &'static str,
    },
    #[error("value of member `{member}` is not an array")]
    NotAnArray { member: &'static str },
}
