//! Content-type independent access to a parsed document.
//!
//! A [`Navigator`] turns raw text into a tree of [`Node`]s. The mapping
//! engine only walks that tree, so every format it supports goes through
//! the same visitor.
//!
//! Navigators are looked up by MIME type in [`Navigators`]. The process-wide
//! registry is pre-populated with [`JsonNavigator`] (feature `json`) and,
//! with feature `auto_register`, every navigator submitted through
//! [`submit_navigator!`](crate::submit_navigator).

// -----------------------------------------------------------------------------
// Modules

#[cfg(feature = "json")]
mod json;
mod registry;

// -----------------------------------------------------------------------------
// Exports

#[cfg(feature = "json")]
pub use json::JsonNavigator;
pub use registry::{NavigatorPlugin, Navigators, extract_mime};

use core::fmt;

use crate::ParseError;

// -----------------------------------------------------------------------------
// Scalar

/// A leaf value of a document.
///
/// The [`Display`](fmt::Display) form is the text handed to type adapters.
/// Integral floats keep a trailing `.0`, so `1.0` is not read back as `1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(&'a str),
}

impl fmt::Display for Scalar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => fmt::Display::fmt(v, f),
            Self::Int(v) => fmt::Display::fmt(v, f),
            Self::UInt(v) => fmt::Display::fmt(v, f),
            Self::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            Self::Float(v) => fmt::Display::fmt(v, f),
            Self::Str(v) => f.write_str(v),
        }
    }
}

// -----------------------------------------------------------------------------
// Node

/// A node of a parsed document.
///
/// A node is exactly one of: null, an object (named children), an array
/// (ordered children) or a scalar.
pub trait Node {
    /// Returns `true` for an explicit null value.
    fn is_null(&self) -> bool;

    /// Returns `true` if the node has named children.
    fn is_object(&self) -> bool;

    /// Returns `true` if the node has ordered children.
    fn is_array(&self) -> bool;

    /// Returns `true` if the object node has a child named `key`,
    /// including a child whose value is null.
    fn contains_child(&self, key: &str) -> bool;

    /// Returns the child named `key` of an object node.
    fn query_child(&self, key: &str) -> Option<&dyn Node>;

    /// Returns the ordered children of an array node, empty for other nodes.
    fn array_children(&self) -> Vec<&dyn Node>;

    /// Returns the leaf value, `None` for null, object and array nodes.
    fn scalar(&self) -> Option<Scalar<'_>>;

    /// Describes the node for diagnostics.
    fn describe(&self) -> String {
        if self.is_null() {
            String::from("null")
        } else if self.is_object() {
            String::from("{...}")
        } else if self.is_array() {
            String::from("[...]")
        } else {
            self.scalar().map(|s| s.to_string()).unwrap_or_default()
        }
    }
}

impl fmt::Debug for dyn Node + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

// -----------------------------------------------------------------------------
// Navigator

/// Parses raw documents of one content type.
///
/// # Examples
///
/// ```
/// use battery_map::ParseError;
/// use battery_map::node::{Navigator, Node};
///
/// struct Plain;
///
/// impl Navigator for Plain {
///     fn content_type(&self) -> &str {
///         "text/plain"
///     }
///
///     fn parse(&self, raw: &str) -> Result<Box<dyn Node>, ParseError> {
///         // A plain text body is a single JSON string node.
///         Ok(Box::new(serde_json::Value::String(raw.to_owned())))
///     }
/// }
///
/// let node = Plain.parse("hello").unwrap();
/// assert_eq!(node.describe(), "hello");
/// ```
pub trait Navigator: Send + Sync + 'static {
    /// The MIME type served by this navigator, such as `application/json`.
    fn content_type(&self) -> &str;

    /// Parses `raw` into its root node.
    fn parse(&self, raw: &str) -> Result<Box<dyn Node>, ParseError>;
}
