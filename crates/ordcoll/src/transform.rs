//! The transform engine: mapping, filtering, slicing and reshaping.
//!
//! Operations that take `&self` return a new collection and leave the
//! receiver untouched. Operations that take `&mut self` rebuild the receiver
//! in place and reset its cursor to the first entry.

use ordcoll_core::{CollectionError, Key, KeyCase, Number, Result};

use crate::collection::Collection;
use crate::value::Value;

/// Upper bound on the number of entries `range` will generate.
const MAX_RANGE_LEN: u64 = 1 << 30;

/// Resolve an `(offset, length)` window against `len` entries. Negative
/// offsets and lengths count from the end. The result is a clamped
/// `start..end` with `start <= end`.
fn resolve_window(len: usize, offset: isize, length: Option<isize>) -> (usize, usize) {
    let len = len as isize;
    let start = if offset < 0 {
        (len + offset).max(0)
    } else {
        offset.min(len)
    };
    let end = match length {
        None => len,
        Some(l) if l < 0 => (len + l).max(start),
        Some(l) => start.saturating_add(l).min(len),
    };
    (start as usize, end as usize)
}

fn renumbered(entries: Vec<(Key, Value)>) -> Collection {
    let mut out = Collection::with_capacity(entries.len());
    out.rebuild_renumbered(entries);
    out
}

impl Collection {
    /// Keep the entries for which `keep` returns true, in order and under
    /// their original keys.
    pub(crate) fn retain_entries<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Key, &Value) -> bool,
    {
        let entries = self.take_entries();
        let kept = entries.into_iter().filter(|(k, v)| keep(k, v)).collect();
        self.rebuild(kept);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mapping
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply `f` to every value, keeping keys.
    pub fn map<F>(&self, mut f: F) -> Collection
    where
        F: FnMut(&Value) -> Value,
    {
        Collection::from_entries(self.iter().map(|(k, v)| (k.clone(), f(v))))
    }

    /// Apply `f` position by position across this collection and `others`.
    ///
    /// `f` receives one slot per input, `None` where that input has run
    /// out. The result is as long as the longest input. Positions covered
    /// by this collection keep its keys; the rest get fresh integer keys.
    pub fn map_with<F>(&self, others: &[&Collection], mut f: F) -> Collection
    where
        F: FnMut(&[Option<&Value>]) -> Value,
    {
        let len = others
            .iter()
            .map(|o| o.len())
            .fold(self.len(), usize::max);
        let mut out = Collection::with_capacity(len);
        let mut args: Vec<Option<&Value>> = Vec::with_capacity(others.len() + 1);
        for pos in 0..len {
            args.clear();
            args.push(self.get_index(pos).map(|(_, v)| v));
            args.extend(others.iter().map(|o| o.get_index(pos).map(|(_, v)| v)));
            let value = f(&args);
            match self.get_index(pos) {
                Some((key, _)) => {
                    out.insert(key.clone(), value);
                }
                None => {
                    out.push(value);
                }
            }
        }
        out
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Filtering
    // ─────────────────────────────────────────────────────────────────────────

    /// Keep entries whose value satisfies `pred`.
    pub fn filter<F>(&mut self, mut pred: F)
    where
        F: FnMut(&Value) -> bool,
    {
        self.retain_entries(|_, v| pred(v));
    }

    /// Keep entries whose key satisfies `pred`.
    pub fn filter_keys<F>(&mut self, mut pred: F)
    where
        F: FnMut(&Key) -> bool,
    {
        self.retain_entries(|k, _| pred(k));
    }

    /// Keep entries for which `pred(value, key)` holds.
    pub fn filter_entries<F>(&mut self, mut pred: F)
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        self.retain_entries(|k, v| pred(v, k));
    }

    /// Keep truthy values.
    pub fn filter_truthy(&mut self) {
        self.retain_entries(|_, v| v.is_truthy());
    }

    /// Left fold over the values. Without `initial` the first value seeds
    /// the accumulator, and an empty collection yields `None`.
    pub fn reduce<F>(&self, initial: Option<Value>, mut f: F) -> Option<Value>
    where
        F: FnMut(Value, &Value) -> Value,
    {
        let mut values = self.values_iter();
        let mut acc = match initial {
            Some(v) => v,
            None => values.next()?.clone(),
        };
        for value in values {
            acc = f(acc, value);
        }
        Some(acc)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reshaping
    // ─────────────────────────────────────────────────────────────────────────

    /// Split into nested collections of at most `size` entries.
    ///
    /// A `size` of zero yields an empty collection.
    pub fn chunk(&self, size: usize, preserve_keys: bool) -> Collection {
        let mut out = Collection::new();
        if size == 0 {
            return out;
        }
        for group in self.entries().chunks(size) {
            let chunk = if preserve_keys {
                Collection::from_entries(group.iter().cloned())
            } else {
                Collection::from_values(group.iter().map(|(_, v)| v.clone()))
            };
            out.push(chunk);
        }
        out
    }

    /// Pull one field out of every nested record.
    ///
    /// With no `column_key` the whole record is taken. Rows that are not
    /// collections, or that lack the column, are skipped. When `index_key`
    /// is given, its value in each row becomes the result key; rows where it
    /// is missing or cannot be a key are appended instead.
    pub fn column(&self, column_key: Option<&Key>, index_key: Option<&Key>) -> Collection {
        let mut out = Collection::new();
        for (_, row) in self.iter() {
            let Some(record) = row.as_collection() else {
                continue;
            };
            let value = match column_key {
                Some(col) => match record.get(col) {
                    Some(v) => v.clone(),
                    None => continue,
                },
                None => row.clone(),
            };
            match index_key.and_then(|ik| record.get(ik)).and_then(Value::to_key) {
                Some(key) => {
                    out.insert(key, value);
                }
                None => {
                    out.push(value);
                }
            }
        }
        out
    }

    /// Swap keys and values. Later duplicates win; values that are neither
    /// integers nor strings are skipped.
    pub fn flip(&self) -> Collection {
        let mut out = Collection::with_capacity(self.len());
        for (key, value) in self.iter() {
            match value {
                Value::Int(n) => {
                    out.insert(Key::Int(*n), key.clone());
                }
                Value::Str(s) => {
                    out.insert(Key::from(s.as_str()), key.clone());
                }
                other => {
                    tracing::warn!(
                        "flip: skipping {} value under key {:?}",
                        other.type_name(),
                        key
                    );
                }
            }
        }
        out
    }

    // ─────────────────────────────────────────────────────────────────────────
    // In-place walks
    // ─────────────────────────────────────────────────────────────────────────

    /// Call `f(value, key)` on every entry, letting it overwrite the value.
    pub fn walk<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Value, &Key),
    {
        for (key, value) in self.iter_mut() {
            f(value, key);
        }
    }

    /// As [`walk`](Self::walk), passing `arg` through to every call.
    pub fn walk_with<A, F>(&mut self, arg: &A, mut f: F)
    where
        F: FnMut(&mut Value, &Key, &A),
    {
        self.walk(|value, key| f(value, key, arg));
    }

    /// As [`walk`](Self::walk), descending into nested collections. Only
    /// leaves are passed to `f`.
    pub fn walk_recursive<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Value, &Key),
    {
        self.walk_leaves(&mut f);
    }

    /// As [`walk_recursive`](Self::walk_recursive), passing `arg` through.
    pub fn walk_recursive_with<A, F>(&mut self, arg: &A, mut f: F)
    where
        F: FnMut(&mut Value, &Key, &A),
    {
        self.walk_leaves(&mut |value: &mut Value, key: &Key| f(value, key, arg));
    }

    fn walk_leaves<F>(&mut self, f: &mut F)
    where
        F: FnMut(&mut Value, &Key),
    {
        for (key, value) in self.iter_mut() {
            match value {
                Value::Collection(nested) => nested.walk_leaves(f),
                leaf => f(leaf, key),
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Windows
    // ─────────────────────────────────────────────────────────────────────────

    /// Copy out a window of entries.
    ///
    /// Negative `offset` counts from the end; negative `length` stops that
    /// many entries short of the end; `None` runs to the end. String keys
    /// are always kept; integer keys are renumbered unless `preserve_keys`.
    pub fn slice(&self, offset: isize, length: Option<isize>, preserve_keys: bool) -> Collection {
        let (start, end) = resolve_window(self.len(), offset, length);
        let window = self.entries()[start..end].to_vec();
        if preserve_keys {
            Collection::from_entries(window)
        } else {
            renumbered(window)
        }
    }

    /// Remove a window of entries (resolved as in [`slice`](Self::slice))
    /// and insert `replacement` in its place. Integer keys are renumbered.
    /// Returns the removed entries.
    pub fn splice<I, V>(&mut self, offset: isize, length: Option<isize>, replacement: I) -> Collection
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let (start, end) = resolve_window(self.len(), offset, length);
        let mut entries = self.take_entries();
        let tail = entries.split_off(end);
        let removed = entries.split_off(start);
        entries.extend(replacement.into_iter().map(|v| (Key::Int(0), v.into())));
        entries.extend(tail);
        self.rebuild_renumbered(entries);
        renumbered(removed)
    }

    /// Reverse the entry order. String keys are always kept; integer keys
    /// are renumbered unless `preserve_keys`.
    pub fn reverse(&mut self, preserve_keys: bool) {
        let mut entries = self.take_entries();
        entries.reverse();
        if preserve_keys {
            self.rebuild(entries);
        } else {
            self.rebuild_renumbered(entries);
        }
    }

    /// Pad with copies of `value` to `|length|` entries: on the right for a
    /// positive length, on the left for a negative one. Integer keys are
    /// renumbered. Does nothing when the collection is already long enough.
    pub fn pad(&mut self, length: isize, value: impl Into<Value>) {
        let target = length.unsigned_abs();
        if target <= self.len() {
            return;
        }
        let value = value.into();
        let padding = (self.len()..target).map(|_| (Key::Int(0), value.clone()));
        let mut entries = self.take_entries();
        if length > 0 {
            entries.extend(padding);
        } else {
            entries.splice(0..0, padding);
        }
        self.rebuild_renumbered(entries);
    }

    /// Upper- or lower-case every string key. When two keys collide, the
    /// later value overwrites the earlier one in its position.
    pub fn change_key_case(&mut self, case: KeyCase) {
        let entries = self.take_entries().into_iter().map(|(key, value)| {
            let key = match key {
                Key::Str(s) => Key::Str(match case {
                    KeyCase::Lower => s.to_ascii_lowercase(),
                    KeyCase::Upper => s.to_ascii_uppercase(),
                }),
                int => int,
            };
            (key, value)
        });
        let rebuilt = Collection::from_entries(entries).take_entries();
        self.rebuild(rebuilt);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Constructors
    // ─────────────────────────────────────────────────────────────────────────

    /// `count` copies of `value` under consecutive keys from `start`.
    pub fn fill(start: i64, count: i64, value: impl Into<Value>) -> Result<Collection> {
        if count < 0 {
            return Err(CollectionError::InvalidArgument(format!(
                "fill count must not be negative, got {}",
                count
            )));
        }
        let last = start.checked_add(count.saturating_sub(1)).ok_or_else(|| {
            CollectionError::InvalidArgument(format!(
                "fill of {} entries from {} overflows the key range",
                count, start
            ))
        })?;
        let value = value.into();
        let mut out = Collection::new();
        if count > 0 {
            for key in start..=last {
                out.insert(key, value.clone());
            }
        }
        Ok(out)
    }

    /// Every value of `keys` becomes a key mapped to a copy of `value`.
    pub fn fill_keys(keys: &Collection, value: impl Into<Value>) -> Result<Collection> {
        let value = value.into();
        let mut out = Collection::with_capacity(keys.len());
        for (_, k) in keys.iter() {
            let key = k
                .to_key()
                .ok_or_else(|| CollectionError::IllegalKey(format!("{:?}", k)))?;
            out.insert(key, value.clone());
        }
        Ok(out)
    }

    /// An arithmetic sequence from `start` to `end` inclusive, as a list.
    ///
    /// The sign of `step` is ignored; the sequence runs toward `end`. The
    /// values are integers when all three arguments are, floats otherwise.
    /// Fails on a zero or non-finite step, a step wider than the span, or a
    /// sequence too long to build.
    pub fn range(
        start: impl Into<Number>,
        end: impl Into<Number>,
        step: impl Into<Number>,
    ) -> Result<Collection> {
        let (start, end, step) = (start.into(), end.into(), step.into());
        let invalid = |msg: String| Err(CollectionError::InvalidArgument(msg));

        if step.is_zero() || !step.as_f64().is_finite() {
            return invalid(format!("range step must be finite and non-zero, got {}", step));
        }
        if !start.as_f64().is_finite() || !end.as_f64().is_finite() {
            return invalid(format!("range bounds must be finite, got {} and {}", start, end));
        }

        match (start, end, step) {
            (Number::Int(a), Number::Int(b), Number::Int(s)) => {
                let step = s.unsigned_abs();
                let span = a.abs_diff(b);
                if span != 0 && step > span {
                    return invalid(format!("range step {} exceeds the span {}", s, span));
                }
                let count = span / step + 1;
                if count > MAX_RANGE_LEN {
                    return invalid(format!("range of {} entries is too long", count));
                }
                let dir: i128 = if b < a { -1 } else { 1 };
                Ok(Collection::from_values((0..count).map(|i| {
                    // Every term lies between `a` and `b`.
                    (i128::from(a) + dir * i128::from(i * step)) as i64
                })))
            }
            _ => {
                let (a, b, step) = (start.as_f64(), end.as_f64(), step.as_f64().abs());
                let span = (b - a).abs();
                if span != 0.0 && step > span {
                    return invalid(format!("range step {} exceeds the span {}", step, span));
                }
                let steps = (span / step + 1e-9).floor();
                if steps + 1.0 > MAX_RANGE_LEN as f64 {
                    return invalid(format!("range of {} entries is too long", steps + 1.0));
                }
                let dir = if b < a { -1.0 } else { 1.0 };
                Ok(Collection::from_values(
                    (0..=steps as u64).map(|i| a + dir * i as f64 * step),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection;

    #[test]
    fn test_map_keeps_keys() {
        let c = collection! {"a" => 1, "b" => 2};
        let doubled = c.map(|v| Value::from(v.as_int().unwrap_or(0) * 2));
        assert_eq!(doubled, collection! {"a" => 2, "b" => 4});
        assert_eq!(c, collection! {"a" => 1, "b" => 2});
    }

    #[test]
    fn test_map_with_pads_shorter_inputs() {
        let a = collection! {"x" => 1, "y" => 2};
        let b = collection![10, 20, 30];
        let zipped = a.map_with(&[&b], |slots| {
            let sum: i64 = slots
                .iter()
                .map(|s| s.and_then(Value::as_int).unwrap_or(0))
                .sum();
            Value::from(sum)
        });
        assert_eq!(zipped, collection! {"x" => 11, "y" => 22, 0 => 30});
    }

    #[test]
    fn test_filter_modes() {
        let mut c = collection![1, 2, 3, 4];
        c.filter(|v| v.as_int().is_some_and(|n| n > 2));
        assert_eq!(c, collection! {2 => 3, 3 => 4});

        let mut c = collection! {"a" => 1, "b" => 2, "c" => 3};
        c.filter_keys(|k| k.as_str() != Some("b"));
        assert_eq!(c, collection! {"a" => 1, "c" => 3});

        let mut c = collection! {"a" => 1, "b" => 2, "c" => 3};
        c.filter_entries(|v, k| k.as_str() == Some("a") || v.as_int() == Some(3));
        assert_eq!(c, collection! {"a" => 1, "c" => 3});

        let mut c = collection![0, "a", "", Value::Null, "0", collection![], 2.5];
        c.filter_truthy();
        assert_eq!(c, collection! {1 => "a", 6 => 2.5});
    }

    #[test]
    fn test_filter_keeps_append_position() {
        let mut c = collection![1, 2, 3];
        c.filter(|v| v.as_int() == Some(1));
        assert_eq!(c.push(9), Key::Int(3));
    }

    #[test]
    fn test_reduce() {
        let c = collection![1, 2, 3];
        let add = |acc: Value, v: &Value| Value::from(acc.to_number().add(v.to_number()));
        assert_eq!(c.reduce(Some(Value::from(0)), add), Some(Value::from(6)));
        assert_eq!(c.reduce(None, add), Some(Value::from(6)));
        assert_eq!(Collection::new().reduce(None, add), None);
        assert_eq!(
            Collection::new().reduce(Some(Value::from(7)), add),
            Some(Value::from(7))
        );
    }

    #[test]
    fn test_chunk() {
        let c = collection! {"a" => 1, "b" => 2, "c" => 3};
        assert_eq!(c.chunk(2, false), collection![collection![1, 2], collection![3]]);
        assert_eq!(
            c.chunk(2, true),
            collection![collection! {"a" => 1, "b" => 2}, collection! {"c" => 3}]
        );
        assert!(c.chunk(0, false).is_empty());
        assert!(Collection::new().chunk(3, false).is_empty());
    }

    #[test]
    fn test_column() {
        let rows = collection![
            collection! {"id" => 1, "name" => "John"},
            collection! {"id" => 2, "name" => "Jane"},
            collection! {"name" => "Nobody"},
            "not a row",
        ];
        let id = Key::from("id");
        let name = Key::from("name");
        assert_eq!(rows.column(Some(&id), None), collection![1, 2]);
        assert_eq!(
            rows.column(Some(&name), Some(&id)),
            collection! {1 => "John", 2 => "Jane", 3 => "Nobody"}
        );
        let by_id = rows.column(None, Some(&id));
        assert_eq!(by_id[1], Value::from(collection! {"id" => 1, "name" => "John"}));
        assert_eq!(by_id.count(), 3);
    }

    #[test]
    fn test_column_duplicate_index_overwrites() {
        let rows = collection![
            collection! {"k" => "x", "v" => 1},
            collection! {"k" => "x", "v" => 2},
        ];
        assert_eq!(
            rows.column(Some(&Key::from("v")), Some(&Key::from("k"))),
            collection! {"x" => 2}
        );
    }

    #[test]
    fn test_flip() {
        let c = collection! {"a" => 1, "b" => 2};
        assert_eq!(c.flip(), collection! {1 => "a", 2 => "b"});

        let c = collection!["x", 1.5, "x", "7"];
        assert_eq!(c.flip(), collection! {"x" => 2, 7 => 3});
    }

    #[test]
    fn test_walk() {
        let mut c = collection! {"a" => 1, "b" => 2};
        c.walk(|v, k| *v = Value::from(format!("{}{}", k, v)));
        assert_eq!(c, collection! {"a" => "a1", "b" => "b2"});

        let mut c = collection![1, 2];
        c.walk_with(&10i64, |v, _, step| {
            *v = Value::from(v.as_int().unwrap_or(0) + step);
        });
        assert_eq!(c, collection![11, 12]);
    }

    #[test]
    fn test_walk_recursive_visits_leaves() {
        let mut c = collection! {"a" => 1, "b" => collection! {"c" => 2, "d" => collection![3]}};
        let mut seen = Vec::new();
        c.walk_recursive_with(&"!", |v, k, suffix| {
            seen.push(k.to_string());
            *v = Value::from(format!("{}{}", v, suffix));
        });
        assert_eq!(seen, vec!["a", "c", "0"]);
        assert_eq!(
            c,
            collection! {"a" => "1!", "b" => collection! {"c" => "2!", "d" => collection!["3!"]}}
        );
    }

    #[test]
    fn test_slice() {
        let c = collection! {0 => "a", 1 => "b", "k" => "c", 3 => "d"};
        assert_eq!(c.slice(1, Some(2), false), collection! {0 => "b", "k" => "c"});
        assert_eq!(c.slice(-2, None, true), collection! {"k" => "c", 3 => "d"});
        assert_eq!(c.slice(-2, None, false), collection! {"k" => "c", 0 => "d"});
        assert_eq!(c.slice(0, Some(-3), false), collection!["a"]);
        assert!(c.slice(10, None, false).is_empty());
        assert!(c.slice(2, Some(-3), false).is_empty());
    }

    #[test]
    fn test_splice() {
        let mut c = collection![1, 2, 3, 4];
        let removed = c.splice(1, Some(2), [5, 6]);
        assert_eq!(c, collection![1, 5, 6, 4]);
        assert_eq!(removed, collection![2, 3]);

        let mut c = collection! {"a" => 1, 9 => 2};
        let removed = c.splice(-1, None, Vec::<Value>::new());
        assert_eq!(c, collection! {"a" => 1});
        assert_eq!(removed, collection![2]);
    }

    #[test]
    fn test_reverse() {
        let mut c = collection! {"x" => 1, 5 => 2, 6 => 3};
        c.reverse(false);
        assert_eq!(c, collection! {0 => 3, 1 => 2, "x" => 1});

        let mut c = collection! {"x" => 1, 5 => 2, 6 => 3};
        c.reverse(true);
        assert_eq!(c, collection! {6 => 3, 5 => 2, "x" => 1});
    }

    #[test]
    fn test_pad() {
        let mut c = collection![1, 2];
        c.pad(4, 0);
        assert_eq!(c, collection![1, 2, 0, 0]);

        let mut c = collection![1, 2];
        c.pad(-3, 0);
        assert_eq!(c, collection![0, 1, 2]);

        let mut c = collection![1, 2];
        c.pad(1, 0);
        c.pad(0, 0);
        assert_eq!(c, collection![1, 2]);
    }

    #[test]
    fn test_change_key_case() {
        let mut c = collection! {"Name" => 1, "NAME" => 2, 3 => "x"};
        c.change_key_case(KeyCase::Lower);
        assert_eq!(c, collection! {"name" => 2, 3 => "x"});

        c.change_key_case(KeyCase::Upper);
        assert_eq!(c, collection! {"NAME" => 2, 3 => "x"});
    }

    #[test]
    fn test_fill() {
        assert_eq!(Collection::fill(0, 3, "a").unwrap(), collection!["a", "a", "a"]);
        assert_eq!(
            Collection::fill(-2, 2, 0).unwrap(),
            collection! {-2 => 0, -1 => 0}
        );
        assert!(Collection::fill(5, 0, "a").unwrap().is_empty());
        assert!(matches!(
            Collection::fill(0, -1, "a"),
            Err(CollectionError::InvalidArgument(_))
        ));
        assert!(Collection::fill(i64::MAX, 2, 1).is_err());
    }

    #[test]
    fn test_fill_keys() {
        let keys = collection!["a", "b", 5];
        assert_eq!(
            Collection::fill_keys(&keys, "value").unwrap(),
            collection! {"a" => "value", "b" => "value", 5 => "value"}
        );
        assert!(matches!(
            Collection::fill_keys(&collection![collection![]], 1),
            Err(CollectionError::IllegalKey(_))
        ));
    }

    #[test]
    fn test_range() {
        assert_eq!(Collection::range(1, 3, 1).unwrap(), collection![1, 2, 3]);
        assert_eq!(Collection::range(3, 1, 1).unwrap(), collection![3, 2, 1]);
        assert_eq!(Collection::range(0, 10, -5).unwrap(), collection![0, 5, 10]);
        assert_eq!(Collection::range(0, 9, 4).unwrap(), collection![0, 4, 8]);
        assert_eq!(Collection::range(2, 2, 1).unwrap(), collection![2]);
        assert_eq!(
            Collection::range(0, 1, 0.25).unwrap(),
            collection![0.0, 0.25, 0.5, 0.75, 1.0]
        );
    }

    #[test]
    fn test_range_rejects_bad_steps() {
        for step in [Number::Int(0), Number::Float(0.0), Number::Float(f64::NAN)] {
            assert!(matches!(
                Collection::range(1, 3, step),
                Err(CollectionError::InvalidArgument(_))
            ));
        }
        assert!(Collection::range(1, 3, 5).is_err());
        assert!(Collection::range(0, i64::MAX, 1).is_err());
    }
}
