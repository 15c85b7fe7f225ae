use alloc::collections::{BTreeMap, VecDeque};
use core::marker::PhantomData;
use std::collections::HashMap;

use crate::info::{Shape, Type, TypeBindings};
use crate::node::Node;
use crate::{CoercionError, DeserializeError, Key, Value, Visitor, coerce};

// -----------------------------------------------------------------------------
// Scalars

macro_rules! impl_scalar {
    ($shape:ident => $($ty:ty: $parse:expr),+ $(,)?) => {
        $(
            impl Value for $ty {
                const SHAPE: Shape = Shape::$shape;

                #[inline]
                fn decode(
                    _: &Visitor<'_>,
                    node: &dyn Node,
                    key: Key<'_>,
                    _: &TypeBindings,
                ) -> Result<Self, DeserializeError> {
                    Ok($parse(key, node)?)
                }
            }
        )+
    };
}

macro_rules! impl_integral {
    ($shape:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl Value for $ty {
                const SHAPE: Shape = Shape::$shape;

                #[inline]
                fn decode(
                    _: &Visitor<'_>,
                    node: &dyn Node,
                    key: Key<'_>,
                    _: &TypeBindings,
                ) -> Result<Self, DeserializeError> {
                    Ok(coerce::parse_integral::<$ty>(key, node, Shape::$shape.expected())?)
                }
            }
        )+
    };
}

impl_scalar!(String => String: coerce::parse_string);
impl_scalar!(Boolean => bool: coerce::parse_boolean);
impl_scalar!(Float => f32: coerce::parse_float);
impl_scalar!(Double => f64: coerce::parse_double);

impl_integral!(Integer => i8, i16, i32, u8, u16, u32);
impl_integral!(Long => i64, u64, isize, usize);

// -----------------------------------------------------------------------------
// Option

impl<T: Value> Value for Option<T> {
    const SHAPE: Shape = T::SHAPE;
    const NULLABLE: bool = true;

    #[inline]
    fn element() -> Option<Shape> {
        T::element()
    }

    #[inline]
    fn type_args() -> Vec<Type> {
        T::type_args()
    }

    #[inline]
    fn absent() -> Option<Self> {
        Some(None)
    }

    #[inline]
    fn decode(
        visitor: &Visitor<'_>,
        node: &dyn Node,
        key: Key<'_>,
        bindings: &TypeBindings,
    ) -> Result<Self, DeserializeError> {
        visitor.decode::<T>(node, key, bindings).map(Some)
    }
}

// -----------------------------------------------------------------------------
// Sequences

impl<T: Value> Value for Vec<T> {
    const SHAPE: Shape = Shape::Sequence { canonical: true };

    #[inline]
    fn element() -> Option<Shape> {
        Some(T::SHAPE)
    }

    fn type_args() -> Vec<Type> {
        vec![Type::of::<T>()]
    }

    #[inline]
    fn absent() -> Option<Self> {
        Some(Vec::new())
    }

    #[inline]
    fn decode(
        visitor: &Visitor<'_>,
        node: &dyn Node,
        key: Key<'_>,
        bindings: &TypeBindings,
    ) -> Result<Self, DeserializeError> {
        visitor.visit_array::<T>(node, key, bindings)
    }
}

// Containers below are classified so members of these types can be
// reported, the visitor never decodes them.
fn unsupported<T>(node: &dyn Node, key: Key<'_>) -> Result<T, DeserializeError> {
    Err(CoercionError::new(key, node.describe(), "a supported container").into())
}

impl<T: Value> Value for VecDeque<T> {
    const SHAPE: Shape = Shape::Sequence { canonical: false };

    #[inline]
    fn element() -> Option<Shape> {
        Some(T::SHAPE)
    }

    fn type_args() -> Vec<Type> {
        vec![Type::of::<T>()]
    }

    fn decode(
        _: &Visitor<'_>,
        node: &dyn Node,
        key: Key<'_>,
        _: &TypeBindings,
    ) -> Result<Self, DeserializeError> {
        unsupported(node, key)
    }
}

// -----------------------------------------------------------------------------
// Mappings

impl<V: Value> Value for HashMap<String, V> {
    const SHAPE: Shape = Shape::Mapping;

    #[inline]
    fn element() -> Option<Shape> {
        Some(V::SHAPE)
    }

    fn type_args() -> Vec<Type> {
        vec![Type::of::<String>(), Type::of::<V>()]
    }

    fn decode(
        _: &Visitor<'_>,
        node: &dyn Node,
        key: Key<'_>,
        _: &TypeBindings,
    ) -> Result<Self, DeserializeError> {
        unsupported(node, key)
    }
}

impl<V: Value> Value for BTreeMap<String, V> {
    const SHAPE: Shape = Shape::Mapping;

    #[inline]
    fn element() -> Option<Shape> {
        Some(V::SHAPE)
    }

    fn type_args() -> Vec<Type> {
        vec![Type::of::<String>(), Type::of::<V>()]
    }

    fn decode(
        _: &Visitor<'_>,
        node: &dyn Node,
        key: Key<'_>,
        _: &TypeBindings,
    ) -> Result<Self, DeserializeError> {
        unsupported(node, key)
    }
}

// -----------------------------------------------------------------------------
// Excluded

impl Value for () {
    const SHAPE: Shape = Shape::Excluded;

    #[inline]
    fn decode(
        _: &Visitor<'_>,
        _: &dyn Node,
        _: Key<'_>,
        _: &TypeBindings,
    ) -> Result<Self, DeserializeError> {
        Ok(())
    }
}

impl<T: 'static> Value for PhantomData<T> {
    const SHAPE: Shape = Shape::Excluded;

    #[inline]
    fn decode(
        _: &Visitor<'_>,
        _: &dyn Node,
        _: Key<'_>,
        _: &TypeBindings,
    ) -> Result<Self, DeserializeError> {
        Ok(PhantomData)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::collections::{BTreeMap, VecDeque};
    use std::collections::HashMap;

    use crate::Value;
    use crate::info::Shape;

    #[test]
    fn classification() {
        assert_eq!(<i32 as Value>::SHAPE, Shape::Integer);
        assert_eq!(<u32 as Value>::SHAPE, Shape::Integer);
        assert_eq!(<i64 as Value>::SHAPE, Shape::Long);
        assert_eq!(<usize as Value>::SHAPE, Shape::Long);
        assert_eq!(<f32 as Value>::SHAPE, Shape::Float);
        assert_eq!(<f64 as Value>::SHAPE, Shape::Double);
        assert_eq!(<String as Value>::SHAPE, Shape::String);
        assert_eq!(<() as Value>::SHAPE, Shape::Excluded);

        assert_eq!(<Vec<u8>>::SHAPE, Shape::Sequence { canonical: true });
        assert_eq!(<VecDeque<u8>>::SHAPE, Shape::Sequence { canonical: false });
        assert_eq!(<HashMap<String, u8>>::SHAPE, Shape::Mapping);
        assert_eq!(<BTreeMap<String, Vec<u8>>>::element(), Some(Shape::Sequence { canonical: true }));
    }

    #[test]
    fn nullable_keeps_inner_shape() {
        assert_eq!(<Option<i64>>::SHAPE, Shape::Long);
        assert!(<Option<i64>>::NULLABLE);
        assert!(!<i64 as Value>::NULLABLE);
        assert_eq!(<Option<Vec<bool>>>::element(), Some(Shape::Boolean));
    }

    #[test]
    fn absent_values() {
        assert_eq!(<Option<String>>::absent(), Some(None));
        assert_eq!(<Vec<i32>>::absent(), Some(Vec::new()));
        assert_eq!(<i32 as Value>::absent(), None);
        assert_eq!(<String as Value>::absent(), None);
        assert!(<HashMap<String, i32>>::absent().is_none());
    }
}
