//! Built-in scalar conversions.
//!
//! Each function converts the scalar of a node into one target type,
//! accepting both native scalars and their textual form:
//!
//! | target | accepted |
//! |--------|----------|
//! | string | any scalar, numbers and booleans in their textual form |
//! | integer, long | integers in range, integral floats in range, integer text |
//! | boolean | booleans, `0` / `1`, `"true"` / `"false"` in any case |
//! | float, double | any number, number text |
//! | enum | the exact variant name |
//!
//! Objects, arrays and nulls never convert to a scalar.
//!
//! # Examples
//!
//! ```
//! use battery_map::Key;
//! use battery_map::coerce::{parse_boolean, parse_integer};
//! use serde_json::json;
//!
//! assert_eq!(parse_integer(Key::Member("age"), &json!("42")), Ok(42));
//! assert_eq!(parse_boolean(Key::Member("admin"), &json!("TRUE")), Ok(true));
//!
//! let err = parse_integer(Key::Index(2), &json!("4x")).unwrap_err();
//! assert_eq!(err.to_string(), "cannot convert `4x` at `[2]` into integer");
//! ```

use core::str::FromStr;

use crate::node::{Node, Scalar};
use crate::{CoercionError, Enumeration, Key};

// 2^64 and -2^63, the bounds of the integral floats that fit `u64` or `i64`.
const UNSIGNED_FLOAT_END: f64 = 18_446_744_073_709_551_616.0;
const SIGNED_FLOAT_START: f64 = -9_223_372_036_854_775_808.0;

#[inline]
fn scalar_of<'a>(
    key: Key<'_>,
    node: &'a dyn Node,
    expected: &'static str,
) -> Result<Scalar<'a>, CoercionError> {
    node.scalar()
        .ok_or_else(|| CoercionError::new(key, node.describe(), expected))
}

/// Converts to any integer type, failing when out of range.
pub fn parse_integral<T>(
    key: Key<'_>,
    node: &dyn Node,
    expected: &'static str,
) -> Result<T, CoercionError>
where
    T: TryFrom<i64> + TryFrom<u64> + FromStr,
{
    let fail = || CoercionError::new(key, node.describe(), expected);
    match scalar_of(key, node, expected)? {
        Scalar::Int(v) => T::try_from(v).map_err(|_| fail()),
        Scalar::UInt(v) => T::try_from(v).map_err(|_| fail()),
        Scalar::Float(v) if v.fract() == 0.0 && (0.0..UNSIGNED_FLOAT_END).contains(&v) => {
            T::try_from(v as u64).map_err(|_| fail())
        }
        Scalar::Float(v) if v.fract() == 0.0 && (SIGNED_FLOAT_START..0.0).contains(&v) => {
            T::try_from(v as i64).map_err(|_| fail())
        }
        Scalar::Str(s) => s.trim().parse::<T>().map_err(|_| fail()),
        Scalar::Float(_) | Scalar::Bool(_) => Err(fail()),
    }
}

#[inline]
pub fn parse_integer(key: Key<'_>, node: &dyn Node) -> Result<i32, CoercionError> {
    parse_integral(key, node, "integer")
}

#[inline]
pub fn parse_long(key: Key<'_>, node: &dyn Node) -> Result<i64, CoercionError> {
    parse_integral(key, node, "long")
}

pub fn parse_boolean(key: Key<'_>, node: &dyn Node) -> Result<bool, CoercionError> {
    match scalar_of(key, node, "boolean")? {
        Scalar::Bool(b) => Ok(b),
        Scalar::Int(0) | Scalar::UInt(0) => Ok(false),
        Scalar::Int(1) | Scalar::UInt(1) => Ok(true),
        Scalar::Str(s) if s.trim().eq_ignore_ascii_case("true") => Ok(true),
        Scalar::Str(s) if s.trim().eq_ignore_ascii_case("false") => Ok(false),
        _ => Err(CoercionError::new(key, node.describe(), "boolean")),
    }
}

pub fn parse_double(key: Key<'_>, node: &dyn Node) -> Result<f64, CoercionError> {
    match scalar_of(key, node, "double")? {
        Scalar::Int(v) => Ok(v as f64),
        Scalar::UInt(v) => Ok(v as f64),
        Scalar::Float(v) => Ok(v),
        Scalar::Str(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| CoercionError::new(key, s, "double")),
        Scalar::Bool(_) => Err(CoercionError::new(key, node.describe(), "double")),
    }
}

pub fn parse_float(key: Key<'_>, node: &dyn Node) -> Result<f32, CoercionError> {
    match scalar_of(key, node, "float")? {
        Scalar::Str(s) => s
            .trim()
            .parse::<f32>()
            .map_err(|_| CoercionError::new(key, s, "float")),
        _ => parse_double(key, node)
            .map(|v| v as f32)
            .map_err(|_| CoercionError::new(key, node.describe(), "float")),
    }
}

pub fn parse_string(key: Key<'_>, node: &dyn Node) -> Result<String, CoercionError> {
    match scalar_of(key, node, "string")? {
        Scalar::Str(s) => Ok(s.to_owned()),
        other => Ok(other.to_string()),
    }
}

/// Converts a string scalar holding a variant name of `E`.
pub fn parse_enum<E: Enumeration>(key: Key<'_>, node: &dyn Node) -> Result<E, CoercionError> {
    match scalar_of(key, node, "enum variant")? {
        Scalar::Str(s) => E::from_variant_name(s).ok_or_else(|| CoercionError::new(key, s, "enum variant")),
        _ => Err(CoercionError::new(key, node.describe(), "enum variant")),
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    const KEY: Key<'static> = Key::Member("field");

    fn node(value: &Value) -> &dyn Node {
        value
    }

    #[test]
    fn integers() {
        assert_eq!(parse_integer(KEY, node(&json!(7))), Ok(7));
        assert_eq!(parse_integer(KEY, node(&json!(" -12 "))), Ok(-12));
        assert_eq!(parse_integer(KEY, node(&json!(3.0))), Ok(3));
        assert_eq!(parse_long(KEY, node(&json!(9_000_000_000_i64))), Ok(9_000_000_000));

        assert!(parse_integer(KEY, node(&json!(9_000_000_000_i64))).is_err());
        assert!(parse_integer(KEY, node(&json!(3.5))).is_err());
        assert!(parse_integer(KEY, node(&json!(true))).is_err());
        assert!(parse_integer(KEY, node(&json!({"a": 1}))).is_err());
        assert!(parse_integral::<u8>(KEY, node(&json!(-1)), "integer").is_err());
        assert_eq!(parse_integral::<u64>(KEY, node(&json!(u64::MAX)), "long"), Ok(u64::MAX));
    }

    #[test]
    fn integral_floats_use_target_range() {
        let big = 1.0e19;
        assert_eq!(parse_integral::<u64>(KEY, node(&json!(big)), "long"), Ok(10_000_000_000_000_000_000));
        assert!(parse_long(KEY, node(&json!(big))).is_err());
        assert_eq!(parse_long(KEY, node(&json!(-9.223_372_036_854_775_808e18))), Ok(i64::MIN));
        assert_eq!(parse_integer(KEY, node(&json!(-0.0))), Ok(0));
        assert!(parse_integral::<u64>(KEY, node(&json!(-1.0)), "long").is_err());
        assert!(parse_integral::<u64>(KEY, node(&json!(1.9e20)), "long").is_err());
    }

    #[test]
    fn booleans() {
        assert_eq!(parse_boolean(KEY, node(&json!(false))), Ok(false));
        assert_eq!(parse_boolean(KEY, node(&json!("True"))), Ok(true));
        assert_eq!(parse_boolean(KEY, node(&json!(1))), Ok(true));
        assert_eq!(parse_boolean(KEY, node(&json!(0))), Ok(false));

        let err = parse_boolean(KEY, node(&json!("yes"))).unwrap_err();
        assert_eq!(err.key(), "field");
        assert_eq!(err.value(), "yes");
        assert_eq!(err.expected(), "boolean");
    }

    #[test]
    fn floats() {
        assert_eq!(parse_double(KEY, node(&json!(2))), Ok(2.0));
        assert_eq!(parse_double(KEY, node(&json!("2.5e1"))), Ok(25.0));
        assert_eq!(parse_float(KEY, node(&json!(0.5))), Ok(0.5));
        assert_eq!(parse_float(KEY, node(&json!("1.25"))), Ok(1.25));
        assert!(parse_float(KEY, node(&json!("x"))).is_err());
        assert!(parse_double(KEY, node(&json!(null))).is_err());
    }

    #[test]
    fn strings() {
        assert_eq!(parse_string(KEY, node(&json!("abc"))).as_deref(), Ok("abc"));
        assert_eq!(parse_string(KEY, node(&json!(12))).as_deref(), Ok("12"));
        assert_eq!(parse_string(KEY, node(&json!(true))).as_deref(), Ok("true"));
        assert_eq!(parse_string(KEY, node(&json!(1.0))).as_deref(), Ok("1.0"));
        assert_eq!(parse_string(KEY, node(&json!(-2.0))).as_deref(), Ok("-2.0"));
        assert_eq!(parse_string(KEY, node(&json!(0.25))).as_deref(), Ok("0.25"));
        assert!(parse_string(KEY, node(&json!([1]))).is_err());
    }

    #[derive(Debug, PartialEq)]
    enum Color {
        Red,
        Green,
    }

    impl Enumeration for Color {
        const VARIANTS: &'static [&'static str] = &["RED", "GREEN"];

        fn from_variant_name(name: &str) -> Option<Self> {
            match name {
                "RED" => Some(Self::Red),
                "GREEN" => Some(Self::Green),
                _ => None,
            }
        }

        fn variant_name(&self) -> &'static str {
            match self {
                Self::Red => "RED",
                Self::Green => "GREEN",
            }
        }
    }

    #[test]
    fn enums() {
        assert_eq!(parse_enum::<Color>(KEY, node(&json!("GREEN"))), Ok(Color::Green));
        assert_eq!(Color::Red.variant_name(), Color::VARIANTS[0]);

        let err = parse_enum::<Color>(Key::Index(1), node(&json!("BLUE"))).unwrap_err();
        assert_eq!(err.to_string(), "cannot convert `BLUE` at `[1]` into enum variant");
    }
}
