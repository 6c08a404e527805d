//! Set algebra across collections.
//!
//! The diff/intersect family shares one engine. Each variant picks how keys
//! are matched (ignored, exactly, or by a caller comparator) and how values
//! are matched (ignored, loosely, or by a caller comparator). A diff keeps
//! the receiver's entries that match nowhere in `others`; an intersect keeps
//! those that match in every one of them. Both keep the receiver's keys and
//! order.
//!
//! Comparators return [`Ordering`]; only `Equal` is significant.

use std::cmp::Ordering;
use std::iter;

use ordcoll_core::{CollectionError, Equality, Key, Result};

use crate::collection::Collection;
use crate::equality::equals;
use crate::value::Value;

type ValueCmp<'f> = &'f mut dyn FnMut(&Value, &Value) -> Ordering;
type KeyCmp<'f> = &'f mut dyn FnMut(&Key, &Key) -> Ordering;

#[derive(Clone, Copy, PartialEq, Eq)]
enum SetOp {
    Diff,
    Intersect,
}

enum KeyTest<'f> {
    Ignore,
    Exact,
    Custom(KeyCmp<'f>),
}

enum ValueTest<'f> {
    Ignore,
    Loose,
    Custom(ValueCmp<'f>),
}

impl ValueTest<'_> {
    fn test(&mut self, a: &Value, b: &Value) -> bool {
        match self {
            ValueTest::Ignore => true,
            ValueTest::Loose => equals(a, b, Equality::Loose),
            ValueTest::Custom(cmp) => cmp(a, b) == Ordering::Equal,
        }
    }
}

/// Whether `other` holds an entry matching `(key, value)`.
fn found_in(
    other: &Collection,
    key: &Key,
    value: &Value,
    keys: &mut KeyTest<'_>,
    values: &mut ValueTest<'_>,
) -> bool {
    match keys {
        KeyTest::Exact => other.get(key).is_some_and(|w| values.test(value, w)),
        KeyTest::Ignore => other.values_iter().any(|w| values.test(value, w)),
        KeyTest::Custom(cmp) => other
            .iter()
            .any(|(k, w)| cmp(key, k) == Ordering::Equal && values.test(value, w)),
    }
}

impl Collection {
    fn select_against(
        &self,
        others: &[&Collection],
        op: SetOp,
        mut keys: KeyTest<'_>,
        mut values: ValueTest<'_>,
    ) -> Collection {
        let mut out = Collection::new();
        for (key, value) in self.iter() {
            let mut found = others
                .iter()
                .map(|other| found_in(other, key, value, &mut keys, &mut values));
            let keep = match op {
                SetOp::Diff => !found.any(|f| f),
                SetOp::Intersect => found.all(|f| f),
            };
            if keep {
                out.insert(key.clone(), value.clone());
            }
        }
        out
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Diff
    // ─────────────────────────────────────────────────────────────────────────

    /// Entries whose value is loosely equal to no value in `others`.
    pub fn diff(&self, others: &[&Collection]) -> Collection {
        self.select_against(others, SetOp::Diff, KeyTest::Ignore, ValueTest::Loose)
    }

    /// Entries whose key is absent from every collection in `others`.
    pub fn diff_key(&self, others: &[&Collection]) -> Collection {
        self.select_against(others, SetOp::Diff, KeyTest::Exact, ValueTest::Ignore)
    }

    /// Entries with no same-key, loosely-equal-value entry in `others`.
    pub fn diff_assoc(&self, others: &[&Collection]) -> Collection {
        self.select_against(others, SetOp::Diff, KeyTest::Exact, ValueTest::Loose)
    }

    /// As [`diff`](Self::diff), matching values with `cmp`.
    pub fn udiff<F>(&self, others: &[&Collection], mut cmp: F) -> Collection
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        self.select_against(
            others,
            SetOp::Diff,
            KeyTest::Ignore,
            ValueTest::Custom(&mut cmp),
        )
    }

    /// As [`diff_key`](Self::diff_key), matching keys with `cmp`.
    pub fn diff_ukey<F>(&self, others: &[&Collection], mut cmp: F) -> Collection
    where
        F: FnMut(&Key, &Key) -> Ordering,
    {
        self.select_against(
            others,
            SetOp::Diff,
            KeyTest::Custom(&mut cmp),
            ValueTest::Ignore,
        )
    }

    /// As [`diff_assoc`](Self::diff_assoc), matching keys with `key_cmp`.
    pub fn diff_uassoc<F>(&self, others: &[&Collection], mut key_cmp: F) -> Collection
    where
        F: FnMut(&Key, &Key) -> Ordering,
    {
        self.select_against(
            others,
            SetOp::Diff,
            KeyTest::Custom(&mut key_cmp),
            ValueTest::Loose,
        )
    }

    /// As [`diff_assoc`](Self::diff_assoc), matching values with `value_cmp`.
    pub fn udiff_assoc<F>(&self, others: &[&Collection], mut value_cmp: F) -> Collection
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        self.select_against(
            others,
            SetOp::Diff,
            KeyTest::Exact,
            ValueTest::Custom(&mut value_cmp),
        )
    }

    /// As [`diff_assoc`](Self::diff_assoc), with both comparators supplied.
    pub fn udiff_uassoc<V, K>(
        &self,
        others: &[&Collection],
        mut value_cmp: V,
        mut key_cmp: K,
    ) -> Collection
    where
        V: FnMut(&Value, &Value) -> Ordering,
        K: FnMut(&Key, &Key) -> Ordering,
    {
        self.select_against(
            others,
            SetOp::Diff,
            KeyTest::Custom(&mut key_cmp),
            ValueTest::Custom(&mut value_cmp),
        )
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Intersect
    // ─────────────────────────────────────────────────────────────────────────

    /// Entries whose value has a loosely equal counterpart in every
    /// collection of `others`.
    pub fn intersect(&self, others: &[&Collection]) -> Collection {
        self.select_against(others, SetOp::Intersect, KeyTest::Ignore, ValueTest::Loose)
    }

    /// Entries whose key is present in every collection of `others`.
    pub fn intersect_key(&self, others: &[&Collection]) -> Collection {
        self.select_against(others, SetOp::Intersect, KeyTest::Exact, ValueTest::Ignore)
    }

    /// Entries with a same-key, loosely-equal-value entry in every
    /// collection of `others`.
    pub fn intersect_assoc(&self, others: &[&Collection]) -> Collection {
        self.select_against(others, SetOp::Intersect, KeyTest::Exact, ValueTest::Loose)
    }

    /// As [`intersect`](Self::intersect), matching values with `cmp`.
    pub fn uintersect<F>(&self, others: &[&Collection], mut cmp: F) -> Collection
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        self.select_against(
            others,
            SetOp::Intersect,
            KeyTest::Ignore,
            ValueTest::Custom(&mut cmp),
        )
    }

    /// As [`intersect_key`](Self::intersect_key), matching keys with `cmp`.
    pub fn intersect_ukey<F>(&self, others: &[&Collection], mut cmp: F) -> Collection
    where
        F: FnMut(&Key, &Key) -> Ordering,
    {
        self.select_against(
            others,
            SetOp::Intersect,
            KeyTest::Custom(&mut cmp),
            ValueTest::Ignore,
        )
    }

    /// As [`intersect_assoc`](Self::intersect_assoc), matching keys with
    /// `key_cmp`.
    pub fn intersect_uassoc<F>(&self, others: &[&Collection], mut key_cmp: F) -> Collection
    where
        F: FnMut(&Key, &Key) -> Ordering,
    {
        self.select_against(
            others,
            SetOp::Intersect,
            KeyTest::Custom(&mut key_cmp),
            ValueTest::Loose,
        )
    }

    /// As [`intersect_assoc`](Self::intersect_assoc), matching values with
    /// `value_cmp`.
    pub fn uintersect_assoc<F>(&self, others: &[&Collection], mut value_cmp: F) -> Collection
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        self.select_against(
            others,
            SetOp::Intersect,
            KeyTest::Exact,
            ValueTest::Custom(&mut value_cmp),
        )
    }

    /// As [`intersect_assoc`](Self::intersect_assoc), with both comparators
    /// supplied.
    pub fn uintersect_uassoc<V, K>(
        &self,
        others: &[&Collection],
        mut value_cmp: V,
        mut key_cmp: K,
    ) -> Collection
    where
        V: FnMut(&Value, &Value) -> Ordering,
        K: FnMut(&Key, &Key) -> Ordering,
    {
        self.select_against(
            others,
            SetOp::Intersect,
            KeyTest::Custom(&mut key_cmp),
            ValueTest::Custom(&mut value_cmp),
        )
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Combine, merge, replace
    // ─────────────────────────────────────────────────────────────────────────

    /// Pair this collection's values (as keys) with `values`'s values, by
    /// position. Later duplicate keys overwrite earlier ones.
    pub fn combine(&self, values: &Collection) -> Result<Collection> {
        if self.len() != values.len() {
            return Err(CollectionError::LengthMismatch {
                expected: self.len(),
                actual: values.len(),
            });
        }
        let mut out = Collection::with_capacity(self.len());
        for ((_, k), (_, v)) in self.iter().zip(values.iter()) {
            let key = k
                .to_key()
                .ok_or_else(|| CollectionError::IllegalKey(format!("{:?}", k)))?;
            out.insert(key, v.clone());
        }
        Ok(out)
    }

    /// Concatenate this collection with `others`. Integer keys are
    /// renumbered across all inputs; string keys keep the last value seen.
    pub fn merge(&self, others: &[&Collection]) -> Collection {
        let mut out = Collection::new();
        for source in iter::once(self).chain(others.iter().copied()) {
            merge_into(&mut out, source, false);
        }
        out
    }

    /// As [`merge`](Self::merge), but when a string key holds a nested
    /// collection on both sides the two are merged recursively.
    pub fn merge_recursive(&self, others: &[&Collection]) -> Collection {
        let mut out = Collection::new();
        for source in iter::once(self).chain(others.iter().copied()) {
            merge_into(&mut out, source, true);
        }
        out
    }

    /// Overwrite matching keys with the values from `others`, in order.
    /// Keys are never renumbered; keys new to the receiver are appended.
    pub fn replace(&self, others: &[&Collection]) -> Collection {
        let mut out = self.clone();
        out.cursor = Some(0);
        for other in others {
            for (key, value) in other.iter() {
                out.insert(key.clone(), value.clone());
            }
        }
        out
    }

    /// As [`replace`](Self::replace), recursing where both sides hold a
    /// nested collection under the same key.
    pub fn replace_recursive(&self, others: &[&Collection]) -> Collection {
        let mut out = self.clone();
        out.cursor = Some(0);
        for other in others {
            for (key, value) in other.iter() {
                if let (Some(Value::Collection(existing)), Value::Collection(incoming)) =
                    (out.get_mut(key), value)
                {
                    *existing = existing.replace_recursive(&[incoming]);
                    continue;
                }
                out.insert(key.clone(), value.clone());
            }
        }
        out
    }
}

fn merge_into(out: &mut Collection, source: &Collection, recursive: bool) {
    for (key, value) in source.iter() {
        if key.is_int() {
            out.push(value.clone());
            continue;
        }
        if recursive {
            if let (Some(Value::Collection(existing)), Value::Collection(incoming)) =
                (out.get_mut(key), value)
            {
                *existing = existing.merge_recursive(&[incoming]);
                continue;
            }
        }
        out.insert(key.clone(), value.clone());
    }
}
