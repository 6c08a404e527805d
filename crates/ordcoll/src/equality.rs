//! Value equality and ordering.
//!
//! Every operation that asks "are these two values the same?" goes through
//! [`equals`], and every operation that asks "which comes first?" goes through
//! [`compare`]. Diff/intersect, search, `keys_of`, `unique` and the sort
//! family all share these two functions.

use std::cmp::Ordering;

use ordcoll_core::{natural, Equality, Key, Number, SortFlags};

use crate::collection::Collection;
use crate::value::Value;

/// Test two values for equality under `mode`.
pub fn equals(a: &Value, b: &Value, mode: Equality) -> bool {
    match mode {
        Equality::Strict => a == b,
        Equality::Loose => loose_eq(a, b),
    }
}

fn numbers_equal(a: Number, b: Number) -> bool {
    match (a, b) {
        (Number::Int(x), Number::Int(y)) => x == y,
        (x, y) => x.as_f64() == y.as_f64(),
    }
}

fn collections_loose_eq(a: &Collection, b: &Collection) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .all(|(k, v)| b.get(k).is_some_and(|w| loose_eq(v, w)))
}

fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), _) => *x == b.is_truthy(),
        (_, Value::Bool(y)) => a.is_truthy() == *y,
        (Value::Null, Value::Str(s)) | (Value::Str(s), Value::Null) => s.is_empty(),
        (Value::Null, _) => !b.is_truthy(),
        (_, Value::Null) => !a.is_truthy(),
        (Value::Collection(x), Value::Collection(y)) => collections_loose_eq(x, y),
        (Value::Collection(_), _) | (_, Value::Collection(_)) => false,
        (Value::Str(x), Value::Str(y)) => match (a.numeric(), b.numeric()) {
            (Some(m), Some(n)) => numbers_equal(m, n),
            _ => x == y,
        },
        _ => match (a.numeric(), b.numeric()) {
            (Some(m), Some(n)) => numbers_equal(m, n),
            // A number against a non-numeric string: compare as strings.
            _ => a.string_form() == b.string_form(),
        },
    }
}

/// Rank of a value's type class in the regular order.
fn class_rank(v: &Value) -> u8 {
    match v {
        Value::Null | Value::Bool(_) => 0,
        Value::Int(_) | Value::Float(_) => 1,
        Value::Str(_) if v.numeric().is_some() => 1,
        Value::Str(_) => 2,
        Value::Collection(_) => 3,
    }
}

fn collections_loose_cmp(a: &Collection, b: &Collection) -> Ordering {
    match a.len().cmp(&b.len()) {
        Ordering::Equal => {}
        other => return other,
    }
    let mut left: Vec<&Key> = a.keys_iter().collect();
    let mut right: Vec<&Key> = b.keys_iter().collect();
    left.sort_unstable();
    right.sort_unstable();
    match left.cmp(&right) {
        Ordering::Equal => {}
        other => return other,
    }
    for key in left {
        if let (Some(v), Some(w)) = (a.get(key), b.get(key)) {
            match loose_cmp(v, w) {
                Ordering::Equal => {}
                other => return other,
            }
        }
    }
    Ordering::Equal
}

/// Coercive three-way comparison. A total order, so it is safe to sort by.
///
/// Values fall into four classes, ordered: null and booleans, then numbers
/// and numeric strings, then other strings, then collections. Within a
/// class, null and booleans compare by truthiness, numbers numerically (NaN
/// last), strings bytewise, and collections by length, then key set, then
/// value by value in key order.
///
/// Values that compare `Equal` are loosely equal, except that NaN equals
/// itself here. The converse fails across classes: loose equality is not
/// transitive (`null == 0` and `null == ""` but `0 != ""`), so no total
/// order matches it everywhere.
pub fn loose_cmp(a: &Value, b: &Value) -> Ordering {
    class_rank(a).cmp(&class_rank(b)).then_with(|| match (a, b) {
        (Value::Collection(x), Value::Collection(y)) => collections_loose_cmp(x, y),
        _ => match (a.numeric(), b.numeric()) {
            (Some(m), Some(n)) => m.compare(n),
            _ => match (a, b) {
                (Value::Str(x), Value::Str(y)) => x.as_bytes().cmp(y.as_bytes()),
                _ => a.is_truthy().cmp(&b.is_truthy()),
            },
        },
    })
}

/// Order two values under `flags`.
pub fn compare(a: &Value, b: &Value, flags: SortFlags) -> Ordering {
    match flags {
        SortFlags::Regular => loose_cmp(a, b),
        SortFlags::Numeric => a.to_number().compare(b.to_number()),
        SortFlags::String => a.string_form().cmp(&b.string_form()),
        SortFlags::StringIgnoreCase => a
            .string_form()
            .to_ascii_lowercase()
            .cmp(&b.string_form().to_ascii_lowercase()),
        SortFlags::Natural => natural::compare(&a.string_form(), &b.string_form(), false),
        SortFlags::NaturalIgnoreCase => {
            natural::compare(&a.string_form(), &b.string_form(), true)
        }
    }
}

/// Order two keys under `flags`, treating each key as the equivalent value.
pub fn compare_keys(a: &Key, b: &Key, flags: SortFlags) -> Ordering {
    match (a, b) {
        (Key::Int(x), Key::Int(y)) if flags != SortFlags::String => x.cmp(y),
        _ => compare(&Value::from(a.clone()), &Value::from(b.clone()), flags),
    }
}
