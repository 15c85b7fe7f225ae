//! Types that can be read from a document.
//!
//! - [`Value`]: any member type; knows its [`Shape`] and how to decode itself.
//! - [`Response`]: a destination object with a member [`Descriptor`].
//! - [`Enumeration`]: a unit enum matched by variant name.
//!
//! `Response` and `Enumeration` are usually derived:
//!
//! ```
//! use battery_map::derive::{Response, ResponseEnum};
//! use battery_map::{Enumeration, Response as _, Value};
//! use battery_map::info::Shape;
//!
//! #[derive(ResponseEnum, Debug, PartialEq)]
//! enum Role {
//!     Admin,
//!     #[response(name = "member")]
//!     Member,
//! }
//!
//! #[derive(Response, Default)]
//! struct Account {
//!     #[response(required)]
//!     id: u64,
//!     role: Option<Role>,
//! }
//!
//! assert_eq!(Role::SHAPE, Shape::Enum);
//! assert_eq!(Role::from_variant_name("member"), Some(Role::Member));
//! assert_eq!(Account::SHAPE, Shape::Object);
//! assert_eq!(Account::descriptor().members(true).count(), 1);
//! ```
//!
//! Types produced only by a type adapter are declared with
//! [`impl_adapted_value!`](crate::impl_adapted_value).

// -----------------------------------------------------------------------------
// Modules

mod impls;

use crate::info::{Descriptor, Shape, Type, TypeBindings};
use crate::node::Node;
use crate::{DeserializeError, Key, Visitor};

// -----------------------------------------------------------------------------
// Value

/// A type that can be read from a document node.
///
/// Built-in impls cover strings, integers, floats, `bool`, `Option`,
/// `Vec` and the unsupported containers that are reported rather than
/// filled (`VecDeque`, `HashMap`, `BTreeMap`).
pub trait Value: Sized + 'static {
    /// The classification of this type.
    const SHAPE: Shape;

    /// `true` if the type can hold an explicit absent value (`Option`).
    const NULLABLE: bool = false;

    /// The shape of the elements of a sequence or mapping.
    #[inline]
    fn element() -> Option<Shape> {
        None
    }

    /// The generic arguments of this type, appended to the binding context
    /// when its members are visited.
    #[inline]
    fn type_args() -> Vec<Type> {
        Vec::new()
    }

    /// The explicit absent value, assigned when the document has no value
    /// or a null value. `None` leaves the existing value unchanged.
    #[inline]
    fn absent() -> Option<Self> {
        None
    }

    /// Decodes a non-null node.
    ///
    /// Type adapters are consulted by [`Visitor::decode`] before this is called.
    fn decode(
        visitor: &Visitor<'_>,
        node: &dyn Node,
        key: Key<'_>,
        bindings: &TypeBindings,
    ) -> Result<Self, DeserializeError>;
}

// -----------------------------------------------------------------------------
// Response

/// A destination object.
///
/// Implemented by `#[derive(Response)]`, which also implements [`Value`]
/// with [`Shape::Object`].
pub trait Response: Value + Default {
    /// The member table of this type, built once per process.
    fn descriptor() -> &'static Descriptor<Self>;
}

// -----------------------------------------------------------------------------
// Enumeration

/// A unit enum matched by variant name.
///
/// Implemented by `#[derive(ResponseEnum)]`.
pub trait Enumeration: Sized + 'static {
    /// Variant names in declaration order.
    const VARIANTS: &'static [&'static str];

    fn from_variant_name(name: &str) -> Option<Self>;

    fn variant_name(&self) -> &'static str;
}

// -----------------------------------------------------------------------------
// Adapted types

/// Implements [`Value`] for types only produced by a type adapter.
///
/// Reading such a type without a registered adapter fails with
/// [`DeserializeError::Instantiation`].
///
/// ```
/// use battery_map::adapter::TypeAdapters;
/// use battery_map::info::Shape;
/// use battery_map::Value;
///
/// #[derive(Debug, PartialEq)]
/// struct Cents(u64);
///
/// battery_map::impl_adapted_value!(Cents);
///
/// let mut adapters = TypeAdapters::new();
/// adapters.register_fn(|text: &str| {
///     let (whole, cents) = text.split_once('.').ok_or("missing cents")?;
///     Ok(Cents(whole.parse::<u64>()? * 100 + cents.parse::<u64>()?))
/// });
///
/// assert_eq!(Cents::SHAPE, Shape::Adapted);
/// assert_eq!(adapters.decode::<Cents>("12.34").unwrap().unwrap(), Cents(1234));
/// ```
#[macro_export]
macro_rules! impl_adapted_value {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Value for $ty {
                const SHAPE: $crate::info::Shape = $crate::info::Shape::Adapted;

                fn decode(
                    _: &$crate::Visitor<'_>,
                    _: &dyn $crate::node::Node,
                    key: $crate::Key<'_>,
                    _: &$crate::info::TypeBindings,
                ) -> ::core::result::Result<Self, $crate::DeserializeError> {
                    ::core::result::Result::Err($crate::DeserializeError::Instantiation {
                        key: ::std::string::ToString::to_string(&key),
                        type_path: ::core::any::type_name::<Self>(),
                    })
                }
            }
        )+
    };
}
