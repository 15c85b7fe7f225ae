//! Walks a document node and a destination object in parallel.

use core::any::type_name;
use core::fmt;

use crate::adapter::TypeAdapters;
use crate::info::{MemberInfo, Shape, TypeBindings};
use crate::naming::NamingPolicy;
use crate::node::Node;
use crate::resolve::{document_key, lookup_member};
use crate::{CoercionError, DeserializeError, Lookup, Response, UnsupportedShape, Value};

// -----------------------------------------------------------------------------
// Key

/// Where a value sits in its parent, used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key<'a> {
    /// A member of an object, by member name.
    Member(&'a str),
    /// An element of an array, by position.
    Index(usize),
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Member(name) => f.write_str(name),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

// -----------------------------------------------------------------------------
// Visitor

/// Assigns document values to destination members.
///
/// Conversion order for a scalar value: a type adapter registered for the
/// exact target type, then the built-in conversion of the target's [`Shape`].
///
/// The visitor holds no state of its own; one instance serves a whole
/// mapping call, nested objects and arrays included.
#[derive(Clone, Copy)]
pub struct Visitor<'a> {
    naming: &'a dyn NamingPolicy,
    adapters: Option<&'a TypeAdapters>,
}

impl<'a> Visitor<'a> {
    #[inline]
    pub fn new(naming: &'a dyn NamingPolicy, adapters: Option<&'a TypeAdapters>) -> Self {
        Self { naming, adapters }
    }

    #[inline]
    pub fn naming(&self) -> &'a dyn NamingPolicy {
        self.naming
    }

    #[inline]
    pub fn adapters(&self) -> Option<&'a TypeAdapters> {
        self.adapters
    }

    /// Fills the members of `dest` from an object node.
    ///
    /// With `filtered`, only members carrying a directive are visited; this
    /// is how the top level of a document is read. Nested objects visit all
    /// of their members.
    ///
    /// The first failure aborts the visit. Members already assigned keep
    /// their new values.
    pub fn visit_object<O: Response>(
        &self,
        node: &dyn Node,
        dest: &mut O,
        bindings: &TypeBindings,
        filtered: bool,
    ) -> Result<(), DeserializeError> {
        let descriptor = O::descriptor();

        for member in descriptor.members(filtered) {
            let info = member.info();
            if info.shape() == Shape::Excluded {
                continue;
            }

            let lookup = lookup_member(node, info, self.naming);
            if info.is_required() && lookup.is_absent() {
                return Err(DeserializeError::MissingField {
                    member: info.name(),
                    key: document_key(info, self.naming).into_owned(),
                });
            }

            let resolved = bindings.resolve(info);

            #[cfg(all(debug_assertions, feature = "debug"))]
            log::trace!(
                "{}::{} as `{}` <- {lookup:?}",
                descriptor.type_path(),
                info.name(),
                resolved.raw_path(),
            );

            member.assign(dest, self, lookup, resolved.bindings())?;
        }
        Ok(())
    }

    /// Allocates and fills a nested object.
    ///
    /// The node must be an object; all members of `O` are visited.
    pub fn visit_nested<O: Response>(
        &self,
        node: &dyn Node,
        key: Key<'_>,
        bindings: &TypeBindings,
    ) -> Result<O, DeserializeError> {
        if !node.is_object() {
            return Err(CoercionError::new(key, node.describe(), Shape::Object.expected()).into());
        }
        let mut value = O::default();
        self.visit_object(node, &mut value, bindings, false)?;
        Ok(value)
    }

    /// Reads every element of an array node.
    ///
    /// A null element yields the absent value of `T`, which only exists
    /// for nullable element types. Other elements are decoded with
    /// [`Visitor::decode`] and reported by position on failure.
    pub fn visit_array<T: Value>(
        &self,
        node: &dyn Node,
        key: Key<'_>,
        bindings: &TypeBindings,
    ) -> Result<Vec<T>, DeserializeError> {
        if !node.is_array() {
            return Err(CoercionError::new(key, node.describe(), "array").into());
        }

        let children = node.array_children();
        let element_bindings = bindings.extend(T::type_args());
        let mut items = Vec::with_capacity(children.len());

        for (index, element) in children.into_iter().enumerate() {
            let key = Key::Index(index);
            if element.is_null() {
                match T::absent() {
                    Some(absent) => items.push(absent),
                    None => {
                        return Err(CoercionError::new(key, "null", T::SHAPE.expected()).into());
                    }
                }
                continue;
            }
            items.push(self.decode::<T>(element, key, &element_bindings)?);
        }
        Ok(items)
    }

    /// Decodes a non-null node into `T`.
    ///
    /// A type adapter registered for `T` wins when the node is a scalar.
    pub fn decode<T: Value>(
        &self,
        node: &dyn Node,
        key: Key<'_>,
        bindings: &TypeBindings,
    ) -> Result<T, DeserializeError> {
        match self.adapt::<T>(node, key)? {
            Some(value) => Ok(value),
            None => T::decode(self, node, key, bindings),
        }
    }

    /// Computes the new value of a member from its lookup result.
    ///
    /// Returns `None` when the member must keep its current value:
    ///
    /// - the document has no value and `T` has no absent value, or the
    ///   member is assigned through a setter and the value is missing or null;
    /// - the member shape cannot be filled, which is logged as an
    ///   [`UnsupportedShape`] unless the value is null.
    ///
    /// A null value for a scalar `T` without an absent value cannot be
    /// represented and fails with a [`CoercionError`].
    pub fn member_value<T: Value>(
        &self,
        info: &MemberInfo,
        lookup: Lookup<'_>,
        bindings: &TypeBindings,
    ) -> Result<Option<T>, DeserializeError> {
        let key = Key::Member(info.name());
        let node = match lookup {
            Lookup::Found(node) if !node.is_null() => node,
            _ if info.is_setter() => return Ok(None),
            Lookup::Absent => return Ok(T::absent()),
            Lookup::Found(_) => {
                return match T::absent() {
                    Some(absent) => Ok(Some(absent)),
                    None if T::SHAPE.is_scalar() => {
                        Err(CoercionError::new(key, "null", T::SHAPE.expected()).into())
                    }
                    None => Ok(None),
                };
            }
        };

        if let Some(value) = self.adapt::<T>(node, key)? {
            return Ok(Some(value));
        }

        if let Err(unsupported) = check_shape(info, node) {
            log::error!("{unsupported}");
            return Ok(None);
        }

        T::decode(self, node, key, bindings).map(Some)
    }

    fn adapt<T: Value>(&self, node: &dyn Node, key: Key<'_>) -> Result<Option<T>, DeserializeError> {
        let Some(adapters) = self.adapters else {
            return Ok(None);
        };
        let Some(scalar) = node.scalar() else {
            return Ok(None);
        };

        let text = scalar.to_string();
        match adapters.decode::<T>(&text) {
            None => Ok(None),
            Some(Ok(value)) => Ok(Some(value)),
            Some(Err(source)) => Err(DeserializeError::Adapter {
                key: key.to_string(),
                type_path: type_name::<T>(),
                value: text,
                source,
            }),
        }
    }
}

impl fmt::Debug for Visitor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Visitor")
            .field("adapters", &self.adapters)
            .finish_non_exhaustive()
    }
}

fn check_shape(info: &MemberInfo, node: &dyn Node) -> Result<(), UnsupportedShape> {
    let member = info.name();
    let type_path = info.ty().path();
    match info.shape() {
        Shape::Sequence { canonical: false } => {
            Err(UnsupportedShape::NonCanonicalSequence { member, type_path })
        }
        Shape::Mapping => Err(UnsupportedShape::Mapping { member, type_path }),
        Shape::Sequence { canonical: true } => {
            if info.element_shape().is_some_and(Shape::is_container) {
                Err(UnsupportedShape::NestedContainer { member, type_path })
            } else if !node.is_array() {
                Err(UnsupportedShape::NotAnArray { member })
            } else {
                Ok(())
            }
        }
        _ => Ok(()),
    }
}
