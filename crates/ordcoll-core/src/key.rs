//! Entry keys.
//!
//! A key is an integer or a string. Strings that spell a canonical decimal
//! integer are stored as integers, so `Key::from("7") == Key::from(7)`.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// The key of a collection entry.
///
/// Build keys with `Key::from` or [`Key::from_string`]. A `Key::Str` written
/// out by hand may hold a canonical integer such as `"5"`; such a key is
/// not equal to `Key::Int(5)`, though `Collection` normalises it on every
/// insert and lookup.
///
/// Keys order integers first, then strings bytewise.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl Key {
    /// Build a key from a string, normalising canonical integer strings.
    pub fn from_string(s: String) -> Self {
        match canonical_int(&s) {
            Some(n) => Key::Int(n),
            None => Key::Str(s),
        }
    }

    /// This key with a canonical integer string turned into `Key::Int`.
    pub fn normalized(&self) -> Cow<'_, Key> {
        match self {
            Key::Str(s) => match canonical_int(s) {
                Some(n) => Cow::Owned(Key::Int(n)),
                None => Cow::Borrowed(self),
            },
            Key::Int(_) => Cow::Borrowed(self),
        }
    }

    pub fn into_normalized(self) -> Key {
        match self {
            Key::Str(s) => Key::from_string(s),
            key => key,
        }
    }

    /// The integer value, if this is an integer key.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Key::Int(n) => Some(*n),
            Key::Str(_) => None,
        }
    }

    /// The string value, if this is a string key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Int(_) => None,
            Key::Str(s) => Some(s),
        }
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Key::Int(_))
    }

    pub fn is_str(&self) -> bool {
        matches!(self, Key::Str(_))
    }
}

/// Parse `s` as a canonical decimal integer: no sign other than a leading
/// `-`, no leading zeros, no `-0`, and within `i64` range.
fn canonical_int(s: &str) -> Option<i64> {
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    if s.starts_with('-') && digits == "0" {
        return None;
    }
    s.parse().ok()
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(n) => write!(f, "{}", n),
            Key::Str(s) => write!(f, "{:?}", s),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(n) => write!(f, "{}", n),
            Key::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Int(n)
    }
}

impl From<i32> for Key {
    fn from(n: i32) -> Self {
        Key::Int(n.into())
    }
}

impl From<usize> for Key {
    fn from(n: usize) -> Self {
        Key::Int(n as i64)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::from_string(s.to_owned())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::from_string(s)
    }
}

impl From<&Key> for Key {
    fn from(k: &Key) -> Self {
        k.clone()
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Key::Int(n) => serializer.serialize_i64(*n),
            Key::Str(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct KeyVisitor;

        impl<'de> Visitor<'de> for KeyVisitor {
            type Value = Key;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer or string key")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Key, E> {
                Ok(Key::Int(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Key, E> {
                i64::try_from(v)
                    .map(Key::Int)
                    .map_err(|_| E::custom(format!("integer key {} out of range", v)))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Key, E> {
                Ok(Key::from(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Key, E> {
                Ok(Key::from_string(v))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}
