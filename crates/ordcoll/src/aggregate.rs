//! Aggregates and short-circuiting queries over values.

use ordcoll_core::{Key, Number};

use crate::collection::Collection;
use crate::value::Value;

impl Collection {
    /// Sum of the values. Nested collections are skipped; everything else
    /// is coerced to a number. Integer overflow promotes to float.
    pub fn sum(&self) -> Number {
        self.values_iter()
            .filter(|v| v.as_collection().is_none())
            .fold(Number::Int(0), |acc, v| acc.add(v.to_number()))
    }

    /// Product of the values, with the same coercion as [`sum`](Self::sum).
    /// An empty collection has product 1.
    pub fn product(&self) -> Number {
        self.values_iter()
            .filter(|v| v.as_collection().is_none())
            .fold(Number::Int(1), |acc, v| acc.mul(v.to_number()))
    }

    /// Count occurrences of each integer or string value, keyed by the
    /// value, in order of first appearance.
    pub fn count_values(&self) -> Collection {
        let mut counts = Collection::new();
        for (key, value) in self.iter() {
            let counted = match value {
                Value::Int(n) => Key::Int(*n),
                Value::Str(s) => Key::from(s.as_str()),
                other => {
                    tracing::warn!(
                        "count_values: can only count int and string values, skipping {} under key {:?}",
                        other.type_name(),
                        key
                    );
                    continue;
                }
            };
            match counts.get_mut(&counted) {
                Some(Value::Int(n)) => *n += 1,
                _ => {
                    counts.insert(counted, 1);
                }
            }
        }
        counts
    }

    /// Whether `pred(value, key)` holds for every entry. True when empty.
    pub fn all<F>(&self, mut pred: F) -> bool
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.iter().all(|(k, v)| pred(v, k))
    }

    /// Whether `pred(value, key)` holds for some entry. False when empty.
    pub fn any<F>(&self, mut pred: F) -> bool
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.iter().any(|(k, v)| pred(v, k))
    }

    /// First value satisfying `pred(value, key)`.
    pub fn find<F>(&self, mut pred: F) -> Option<&Value>
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.iter().find(|(k, v)| pred(v, k)).map(|(_, v)| v)
    }

    /// Key of the first value satisfying `pred(value, key)`.
    pub fn find_key<F>(&self, mut pred: F) -> Option<&Key>
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.iter().find(|(k, v)| pred(v, k)).map(|(k, _)| k)
    }
}
