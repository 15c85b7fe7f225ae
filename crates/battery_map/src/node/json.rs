use serde_json::Value;

use super::{Navigator, Node, Scalar};
use crate::ParseError;

// -----------------------------------------------------------------------------
// JsonNavigator

/// Navigator for `application/json`, backed by [`serde_json::Value`].
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonNavigator;

impl JsonNavigator {
    pub const CONTENT_TYPE: &'static str = "application/json";
}

impl Navigator for JsonNavigator {
    #[inline]
    fn content_type(&self) -> &str {
        Self::CONTENT_TYPE
    }

    fn parse(&self, raw: &str) -> Result<Box<dyn Node>, ParseError> {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Ok(Box::new(value)),
            Err(e) => Err(ParseError::new(Self::CONTENT_TYPE, e)),
        }
    }
}

// -----------------------------------------------------------------------------
// Node

impl Node for Value {
    #[inline]
    fn is_null(&self) -> bool {
        self.is_null()
    }

    #[inline]
    fn is_object(&self) -> bool {
        self.is_object()
    }

    #[inline]
    fn is_array(&self) -> bool {
        self.is_array()
    }

    fn contains_child(&self, key: &str) -> bool {
        self.as_object().is_some_and(|map| map.contains_key(key))
    }

    fn query_child(&self, key: &str) -> Option<&dyn Node> {
        let child = self.as_object()?.get(key)?;
        Some(child as &dyn Node)
    }

    fn array_children(&self) -> Vec<&dyn Node> {
        match self {
            Value::Array(items) => items.iter().map(|v| v as &dyn Node).collect(),
            _ => Vec::new(),
        }
    }

    fn scalar(&self) -> Option<Scalar<'_>> {
        match self {
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Scalar::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Some(Scalar::UInt(u))
                } else {
                    n.as_f64().map(Scalar::Float)
                }
            }
            Value::String(s) => Some(Scalar::Str(s)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
