// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decoded values.

use std::cmp::Ordering;

/// A decoded value of any schema shape.
///
/// One schema instance decodes to a `Vec<Value>` (the value tuple); nested field
/// lists appear as [`Value::Tuple`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    // Scalars
    Byte(u8),
    Bool(bool),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float64(f64),
    String(String),
    Bytes(Vec<u8>),

    // Composites
    Tuple(Vec<Value>),
    Set(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Choice { discriminant: u8, payload: Vec<Value> },
    List(Vec<Value>),

    /// The void schema.
    Null,
}

impl Value {
    /// Build a nested group.
    pub fn tuple<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Self::Tuple(items.into_iter().collect())
    }

    /// Build a set from anything convertible to values.
    pub fn set<T: Into<Value>, I: IntoIterator<Item = T>>(items: I) -> Self {
        Self::Set(items.into_iter().map(Into::into).collect())
    }

    /// Build a map from key/value pairs, keeping their order.
    pub fn map<K: Into<Value>, V: Into<Value>, I: IntoIterator<Item = (K, V)>>(pairs: I) -> Self {
        Self::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a choice value.
    pub fn choice<I: IntoIterator<Item = Value>>(discriminant: u8, payload: I) -> Self {
        Self::Choice {
            discriminant,
            payload: payload.into_iter().collect(),
        }
    }

    /// Short kind name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Byte(_) => "Byte",
            Self::Bool(_) => "Bool",
            Self::Int16(_) => "Int16",
            Self::Int32(_) => "Int32",
            Self::Int64(_) => "Int64",
            Self::Float64(_) => "Float64",
            Self::String(_) => "String",
            Self::Bytes(_) => "Bytes",
            Self::Tuple(_) => "Tuple",
            Self::Set(_) => "Set",
            Self::Map(_) => "Map",
            Self::Choice { .. } => "Choice",
            Self::List(_) => "List",
            Self::Null => "Null",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(
            self,
            Self::Tuple(_)
                | Self::Set(_)
                | Self::Map(_)
                | Self::Choice { .. }
                | Self::List(_)
                | Self::Null
        )
    }

    pub fn as_byte(&self) -> Option<u8> {
        match self {
            Self::Byte(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i16(&self) -> Option<i16> {
        match self {
            Self::Int16(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(v) => Some(v),
            _ => None,
        }
    }

    /// Elements of a tuple, set or list.
    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            Self::Tuple(v) | Self::Set(v) | Self::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_pairs(&self) -> Option<&[(Value, Value)]> {
        match self {
            Self::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Discriminant and payload of a choice.
    pub fn as_choice(&self) -> Option<(u8, &[Value])> {
        match self {
            Self::Choice {
                discriminant,
                payload,
            } => Some((*discriminant, payload)),
            _ => None,
        }
    }

    /// Total order between two scalars of the same kind.
    ///
    /// Returns `None` for composites or mismatched kinds.
    pub fn scalar_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Self::Byte(a), Self::Byte(b)) => Some(a.cmp(b)),
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Int16(a), Self::Int16(b)) => Some(a.cmp(b)),
            (Self::Int32(a), Self::Int32(b)) => Some(a.cmp(b)),
            (Self::Int64(a), Self::Int64(b)) => Some(a.cmp(b)),
            (Self::Float64(a), Self::Float64(b)) => Some(a.total_cmp(b)),
            (Self::String(a), Self::String(b)) => Some(a.cmp(b)),
            (Self::Bytes(a), Self::Bytes(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Self::Byte(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Self::Int16(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float64(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::Bytes(v.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_accessors() {
        let v = Value::from(42i32);
        assert_eq!(v.as_i32(), Some(42));
        assert_eq!(v.as_i64(), None);

        let v = Value::from("hello");
        assert_eq!(v.as_str(), Some("hello"));
        assert!(v.is_scalar());

        let v = Value::from(vec![1u8, 2, 3]);
        assert_eq!(v.as_bytes(), Some(&[1u8, 2, 3][..]));
    }

    #[test]
    fn test_composite_builders() {
        let set = Value::set(["ADMINISTRATOR", "VIEWER"]);
        assert_eq!(set.as_slice().map(<[Value]>::len), Some(2));
        assert!(!set.is_scalar());

        let map = Value::map([("orders", 10i64), ("fills", 3i64)]);
        let pairs = map.as_pairs().expect("pairs");
        assert_eq!(pairs[1].0.as_str(), Some("fills"));

        let choice = Value::choice(0, [Value::Int32(5)]);
        let (disc, payload) = choice.as_choice().expect("choice");
        assert_eq!(disc, 0);
        assert_eq!(payload[0].as_i32(), Some(5));
    }

    #[test]
    fn test_scalar_ordering() {
        assert_eq!(
            Value::Int32(1).scalar_cmp(&Value::Int32(2)),
            Some(Ordering::Less)
        );
        assert_eq!(
            Value::from("b").scalar_cmp(&Value::from("a")),
            Some(Ordering::Greater)
        );
        assert_eq!(Value::Int32(1).scalar_cmp(&Value::Int64(1)), None);
        assert_eq!(Value::Null.scalar_cmp(&Value::Null), None);
    }
}
