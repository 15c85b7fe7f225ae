/// The closed classification of member types.
///
/// Variants are declared in dispatch order: a registered type adapter wins
/// over every built-in shape, and nested objects are the last resort.
///
/// Every member type reports its shape through
/// [`Value::SHAPE`](crate::Value::SHAPE), so classification happens once,
/// at compile time, rather than per document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// A type produced only by a registered type adapter.
    Adapted,
    String,
    /// 32-bit and narrower integers.
    Integer,
    /// 64-bit and pointer-sized integers.
    Long,
    /// An ordered container, `canonical` only for [`Vec`].
    Sequence { canonical: bool },
    /// A string-keyed container.
    Mapping,
    Boolean,
    Float,
    Double,
    /// A unit enum matched by variant name.
    Enum,
    /// A nested destination object.
    Object,
    /// Never read from documents.
    Excluded,
}

impl Shape {
    /// Returns `true` for shapes read from a single scalar value.
    #[inline]
    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::Adapted
                | Self::String
                | Self::Integer
                | Self::Long
                | Self::Boolean
                | Self::Float
                | Self::Double
                | Self::Enum
        )
    }

    /// Returns `true` for sequences and mappings.
    #[inline]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Sequence { .. } | Self::Mapping)
    }

    /// A short description used in coercion errors.
    pub const fn expected(self) -> &'static str {
        match self {
            Self::Adapted => "an adapted type",
            Self::String => "string",
            Self::Integer => "integer",
            Self::Long => "long",
            Self::Sequence { .. } => "array",
            Self::Mapping => "mapping",
            Self::Boolean => "boolean",
            Self::Float => "float",
            Self::Double => "double",
            Self::Enum => "enum variant",
            Self::Object => "object",
            Self::Excluded => "nothing",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Shape;

    #[test]
    fn scalar_and_container() {
        assert!(Shape::Enum.is_scalar());
        assert!(Shape::Adapted.is_scalar());
        assert!(!Shape::Object.is_scalar());
        assert!(!Shape::Excluded.is_scalar());

        assert!(Shape::Sequence { canonical: false }.is_container());
        assert!(Shape::Mapping.is_container());
        assert!(!Shape::String.is_container());
    }
}
