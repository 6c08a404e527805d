//! Entry values.
//!
//! A [`Value`] is an opaque payload as far as the collection's bookkeeping is
//! concerned. Only the equality/ordering primitives and caller closures ever
//! look inside it. Nested collections make a value tree; each nested
//! collection is owned by the entry that holds it.

use std::fmt;

use ordcoll_core::numeric::{format_float, leading_number};
use ordcoll_core::{parse_numeric, Key, Number};
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::collection::Collection;

/// A collection value.
///
/// `PartialEq` is strict equality: same variant, same contents, and for
/// nested collections the same keys in the same order.
#[derive(Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Collection(Collection),
}

impl Value {
    /// Short name of the variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Collection(_) => "collection",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&Collection> {
        match self {
            Value::Collection(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_collection_mut(&mut self) -> Option<&mut Collection> {
        match self {
            Value::Collection(c) => Some(c),
            _ => None,
        }
    }

    /// Falsy values are `null`, `false`, `0`, `0.0`, `""`, `"0"` and the
    /// empty collection. Everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !(s.is_empty() || s == "0"),
            Value::Collection(c) => !c.is_empty(),
        }
    }

    /// The string form used by string comparison and by key conversion.
    pub fn string_form(&self) -> String {
        match self {
            Value::Null | Value::Bool(false) => String::new(),
            Value::Bool(true) => "1".to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => format_float(*f),
            Value::Str(s) => s.clone(),
            Value::Collection(_) => "Array".to_string(),
        }
    }

    /// Numeric view for loose comparison: numbers, and strings that are
    /// entirely numeric. `None` for everything else.
    pub fn numeric(&self) -> Option<Number> {
        match self {
            Value::Int(n) => Some(Number::Int(*n)),
            Value::Float(f) => Some(Number::Float(*f)),
            Value::Str(s) => parse_numeric(s),
            _ => None,
        }
    }

    /// Coerce to a number. Strings contribute their leading number (or 0),
    /// collections count as 0 when empty and 1 otherwise.
    pub fn to_number(&self) -> Number {
        match self {
            Value::Null => Number::Int(0),
            Value::Bool(b) => Number::Int(i64::from(*b)),
            Value::Int(n) => Number::Int(*n),
            Value::Float(f) => Number::Float(*f),
            Value::Str(s) => leading_number(s),
            Value::Collection(c) => Number::Int(i64::from(!c.is_empty())),
        }
    }

    /// Convert to a key. Floats truncate toward zero, booleans become 0/1,
    /// null becomes the empty string. Collections cannot be keys.
    pub fn to_key(&self) -> Option<Key> {
        match self {
            Value::Null => Some(Key::Str(String::new())),
            Value::Bool(b) => Some(Key::Int(i64::from(*b))),
            Value::Int(n) => Some(Key::Int(*n)),
            Value::Float(f) if f.is_finite() => Some(Key::Int(f.trunc() as i64)),
            Value::Float(_) => Some(Key::Int(0)),
            Value::Str(s) => Some(Key::from(s.as_str())),
            Value::Collection(_) => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Collection(c) => write!(f, "{:?}", c),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string_form())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Int(n as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        match n {
            Number::Int(n) => Value::Int(n),
            Number::Float(f) => Value::Float(f),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Collection> for Value {
    fn from(c: Collection) -> Self {
        Value::Collection(c)
    }
}

impl From<Key> for Value {
    fn from(k: Key) -> Self {
        match k {
            Key::Int(n) => Value::Int(n),
            Key::Str(s) => Value::Str(s),
        }
    }
}

impl<V: Into<Value>> From<Option<V>> for Value {
    fn from(v: Option<V>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<V: Into<Value>> From<Vec<V>> for Value {
    fn from(values: Vec<V>) -> Self {
        Value::Collection(Collection::from_values(values))
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Collection(c) => c.serialize(serializer),
        }
    }
}

pub(crate) struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(i64::try_from(v)
            .map(Value::Int)
            .unwrap_or(Value::Float(v as f64)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::Str(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::Str(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Value, A::Error> {
        crate::collection::CollectionVisitor
            .visit_seq(seq)
            .map(Value::Collection)
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Value, A::Error> {
        crate::collection::CollectionVisitor
            .visit_map(map)
            .map(Value::Collection)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection;

    #[test]
    fn test_truthiness() {
        let falsy = [
            Value::Null,
            Value::from(false),
            Value::from(0),
            Value::from(0.0),
            Value::from(""),
            Value::from("0"),
            Value::from(Collection::new()),
        ];
        for v in &falsy {
            assert!(!v.is_truthy(), "{:?}", v);
        }
        for v in [Value::from("0.0"), Value::from(" "), Value::from(-1), Value::from(vec![0])] {
            assert!(v.is_truthy(), "{:?}", v);
        }
    }

    #[test]
    fn test_string_form() {
        assert_eq!(Value::Null.string_form(), "");
        assert_eq!(Value::from(true).string_form(), "1");
        assert_eq!(Value::from(false).string_form(), "");
        assert_eq!(Value::from(2.0).string_form(), "2");
        assert_eq!(Value::from(0.1).string_form(), "0.1");
        assert_eq!(Value::from(collection![1]).string_form(), "Array");
    }

    #[test]
    fn test_to_key() {
        assert_eq!(Value::from(1.9).to_key(), Some(Key::Int(1)));
        assert_eq!(Value::from(-1.9).to_key(), Some(Key::Int(-1)));
        assert_eq!(Value::from(true).to_key(), Some(Key::Int(1)));
        assert_eq!(Value::from("8").to_key(), Some(Key::Int(8)));
        assert_eq!(Value::Null.to_key(), Some(Key::from("")));
        assert_eq!(Value::from(collection![]).to_key(), None);
    }

    #[test]
    fn test_to_number() {
        assert_eq!(Value::from("3 apples").to_number(), Number::Int(3));
        assert_eq!(Value::from(true).to_number(), Number::Int(1));
        assert_eq!(Value::Null.to_number(), Number::Int(0));
        assert_eq!(Value::from("x").numeric(), None);
        assert_eq!(Value::from("1e2").numeric(), Some(Number::Float(100.0)));
    }

    #[test]
    fn test_value_json() {
        let v: Value = serde_json::from_str(r#"{"a":[1,2.5,"x"],"b":null,"3":true}"#).unwrap();
        let expected = Value::from(collection! {
            "a" => collection![1, 2.5, "x"],
            "b" => Value::Null,
            3 => true,
        });
        assert_eq!(v, expected);
        assert_eq!(
            serde_json::to_string(&v).unwrap(),
            r#"{"a":[1,2.5,"x"],"b":null,"3":true}"#
        );
    }
}
