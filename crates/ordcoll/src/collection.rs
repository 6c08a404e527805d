//! The ordered key/value store.
//!
//! Entries live in a `Vec` in insertion order; a `HashMap` from key to
//! position gives constant-time lookup. Every structural change goes through
//! a handful of private helpers that keep the two in step, track the next
//! free integer key, and maintain the cursor.

use std::collections::HashMap;
use std::fmt;
use std::iter::Map;
use std::ops::{Index, IndexMut};
use std::slice;

use ordcoll_core::{CollectionError, Equality, Key};
use serde::de::{Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};

use crate::equality::equals;
use crate::value::{Value, ValueVisitor};

/// Borrowing iterator over `(key, value)` pairs in store order.
pub type Iter<'a> = Map<slice::Iter<'a, (Key, Value)>, fn(&'a (Key, Value)) -> (&'a Key, &'a Value)>;

/// Owning iterator over `(key, value)` pairs in store order.
pub type IntoIter = std::vec::IntoIter<(Key, Value)>;

fn entry_ref(entry: &(Key, Value)) -> (&Key, &Value) {
    (&entry.0, &entry.1)
}

/// An insertion-ordered collection of unique keys and their values.
///
/// Keys are unique. Writing an existing key replaces its value in place;
/// appending without a key picks a fresh integer key one above the largest
/// integer key the store has held since it was last renumbered.
///
/// The store owns a cursor for stepwise traversal (see [`Collection::current`]).
/// Iteration through [`Collection::iter`] neither reads nor moves it.
#[derive(Clone)]
pub struct Collection {
    /// Entries in order.
    entries: Vec<(Key, Value)>,

    /// Key -> position in `entries`.
    index: HashMap<Key, usize>,

    /// Largest integer key held since the last renumbering.
    max_int: Option<i64>,

    /// Ordinal cursor position; `None` once it has moved off either end.
    pub(crate) cursor: Option<usize>,
}

impl Collection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            max_int: None,
            cursor: Some(0),
        }
    }

    /// Create an empty collection with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
            max_int: None,
            cursor: Some(0),
        }
    }

    /// Build a list (keys `0..n`) from values.
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut this = Self::new();
        for value in values {
            this.push(value);
        }
        this
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal bookkeeping
    // ─────────────────────────────────────────────────────────────────────────

    fn note_int_key(&mut self, key: &Key) {
        if let Key::Int(n) = *key {
            self.max_int = Some(self.max_int.map_or(n, |m| m.max(n)));
        }
    }

    /// The key `push` would use next.
    fn next_key(&self) -> ordcoll_core::Result<Key> {
        match self.max_int {
            None => Ok(Key::Int(0)),
            Some(max) => max
                .checked_add(1)
                .map(Key::Int)
                .ok_or(CollectionError::KeySpaceExhausted { last: max }),
        }
    }

    fn slot(&self, key: &Key) -> Option<usize> {
        self.index.get(key.normalized().as_ref()).copied()
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        self.index.reserve(self.entries.len());
        for (pos, (key, _)) in self.entries.iter().enumerate() {
            self.index.insert(key.clone(), pos);
        }
    }

    /// Replace all entries, keeping keys as they are. The next free key
    /// never moves backwards, and the cursor returns to the first entry.
    ///
    /// Callers guarantee `entries` has unique keys.
    pub(crate) fn rebuild(&mut self, entries: Vec<(Key, Value)>) {
        self.entries = entries;
        self.rebuild_index();
        if let Some(max) = self.entries.iter().filter_map(|(k, _)| k.as_int()).max() {
            self.note_int_key(&Key::Int(max));
        }
        self.cursor = Some(0);
    }

    /// Replace all entries, renumbering integer keys `0, 1, 2, ...` in order
    /// and keeping string keys. Later duplicates of a string key overwrite
    /// the earlier value in its original position.
    pub(crate) fn rebuild_renumbered(&mut self, entries: Vec<(Key, Value)>) {
        self.entries = Vec::with_capacity(entries.len());
        self.index.clear();
        self.max_int = None;
        for (key, value) in entries {
            match key {
                Key::Int(_) => {
                    self.push(value);
                }
                Key::Str(_) => {
                    self.insert(key, value);
                }
            }
        }
        self.cursor = Some(0);
    }

    /// Build a store from entries, later duplicates overwriting earlier ones.
    pub(crate) fn from_entries(entries: impl IntoIterator<Item = (Key, Value)>) -> Self {
        let mut this = Self::new();
        for (key, value) in entries {
            this.insert(key, value);
        }
        this
    }

    pub(crate) fn take_entries(&mut self) -> Vec<(Key, Value)> {
        self.index.clear();
        self.cursor = Some(0);
        std::mem::take(&mut self.entries)
    }

    pub(crate) fn entries(&self) -> &[(Key, Value)] {
        &self.entries
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Keyed access
    // ─────────────────────────────────────────────────────────────────────────

    /// Value stored under `key`.
    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.slot(key).map(|pos| &self.entries[pos].1)
    }

    /// Mutable value stored under `key`.
    pub fn get_mut(&mut self, key: &Key) -> Option<&mut Value> {
        match self.slot(key) {
            Some(pos) => Some(&mut self.entries[pos].1),
            None => None,
        }
    }

    /// Position of `key` in store order.
    pub fn position(&self, key: &Key) -> Option<usize> {
        self.slot(key)
    }

    /// Entry at ordinal position `pos`.
    pub fn get_index(&self, pos: usize) -> Option<(&Key, &Value)> {
        self.entries.get(pos).map(entry_ref)
    }

    /// Write `value` under `key`, or append it under a fresh integer key
    /// when `key` is `None`. Returns the key used.
    pub fn set(&mut self, key: Option<Key>, value: impl Into<Value>) -> Key {
        match key {
            Some(key) => {
                let key = key.into_normalized();
                self.insert(key.clone(), value);
                key
            }
            None => self.push(value),
        }
    }

    /// Write `value` under `key`. An existing entry keeps its position and
    /// its previous value is returned.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into().into_normalized();
        let value = value.into();
        if let Some(&pos) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[pos].1, value));
        }
        self.note_int_key(&key);
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    /// Append `value` under the next free integer key and return that key.
    ///
    /// # Panics
    ///
    /// Panics if the store has held the key `i64::MAX`, leaving no integer
    /// key to append under. Use [`Collection::try_push`] to handle that case.
    pub fn push(&mut self, value: impl Into<Value>) -> Key {
        match self.try_push(value) {
            Ok(key) => key,
            Err(e) => panic!("{}", e),
        }
    }

    /// Append `value` under the next free integer key, or fail without
    /// touching the store when no integer key is left.
    pub fn try_push(&mut self, value: impl Into<Value>) -> ordcoll_core::Result<Key> {
        let key = self.next_key()?;
        self.insert(key.clone(), value);
        Ok(key)
    }

    /// Append each value in turn.
    pub fn push_all<I, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        for value in values {
            self.push(value);
        }
    }

    /// Remove the entry under `key`, returning its value.
    ///
    /// The cursor stays on the same entry, or moves to the successor when
    /// the removed entry was under it.
    pub fn unset(&mut self, key: &Key) -> Option<Value> {
        let pos = self.index.remove(key.normalized().as_ref())?;
        let (_, value) = self.entries.remove(pos);
        for (k, _) in &self.entries[pos..] {
            if let Some(p) = self.index.get_mut(k) {
                *p -= 1;
            }
        }
        if let Some(c) = self.cursor {
            if pos < c {
                self.cursor = Some(c - 1);
            } else if c >= self.entries.len() && !self.entries.is_empty() {
                self.cursor = None;
            }
        }
        Some(value)
    }

    pub fn has(&self, key: &Key) -> bool {
        self.slot(key).is_some()
    }

    /// Number of entries.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries, counting the entries of nested collections too.
    pub fn count_recursive(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, v)| match v {
                Value::Collection(c) => 1 + c.count_recursive(),
                _ => 1,
            })
            .sum()
    }

    /// Whether the keys are exactly `0..n` in order.
    pub fn is_list(&self) -> bool {
        self.entries
            .iter()
            .enumerate()
            .all(|(i, (k, _))| *k == Key::Int(i as i64))
    }

    pub fn first_key(&self) -> Option<&Key> {
        self.entries.first().map(|(k, _)| k)
    }

    pub fn last_key(&self) -> Option<&Key> {
        self.entries.last().map(|(k, _)| k)
    }

    /// All keys, as a list.
    pub fn keys(&self) -> Collection {
        Collection::from_values(self.entries.iter().map(|(k, _)| k.clone()))
    }

    /// Keys whose value equals `filter` under `mode`, as a list.
    pub fn keys_of(&self, filter: &Value, mode: Equality) -> Collection {
        Collection::from_values(
            self.entries
                .iter()
                .filter(|(_, v)| equals(v, filter, mode))
                .map(|(k, _)| k.clone()),
        )
    }

    /// All values, renumbered `0..n`.
    pub fn values(&self) -> Collection {
        Collection::from_values(self.entries.iter().map(|(_, v)| v.clone()))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Stack and queue helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Remove and return the last value. The cursor returns to the start.
    ///
    /// Like any removal, popping does not give the key back: the next append
    /// still goes above it.
    pub fn pop(&mut self) -> Option<Value> {
        let (key, _) = self.entries.last()?;
        let key = key.clone();
        let value = self.unset(&key);
        self.cursor = Some(0);
        value
    }

    /// Remove and return the first value, renumbering integer keys.
    pub fn shift(&mut self) -> Option<Value> {
        if self.entries.is_empty() {
            return None;
        }
        let mut entries = self.take_entries();
        let (_, value) = entries.remove(0);
        self.rebuild_renumbered(entries);
        Some(value)
    }

    /// Prepend `values` in order, renumbering integer keys. Returns the new
    /// length.
    pub fn unshift<I, V>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut entries: Vec<(Key, Value)> = values
            .into_iter()
            .map(|v| (Key::Int(0), v.into()))
            .collect();
        entries.extend(self.take_entries());
        self.rebuild_renumbered(entries);
        self.len()
    }

    /// Remove the first entry whose value equals `value` under `mode`.
    /// Returns whether an entry was removed.
    pub fn remove_item(&mut self, value: &Value, mode: Equality) -> bool {
        let key = self
            .entries
            .iter()
            .find(|(_, v)| equals(v, value, mode))
            .map(|(k, _)| k.clone());
        match key {
            Some(key) => self.unset(&key).is_some(),
            None => false,
        }
    }

    /// Whether some value equals `value`: nested collections compare
    /// loosely, everything else strictly.
    pub fn contains(&self, value: &Value) -> bool {
        self.entries.iter().any(|(_, v)| match (v, value) {
            (Value::Collection(_), Value::Collection(_)) => equals(v, value, Equality::Loose),
            _ => equals(v, value, Equality::Strict),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Iteration
    // ─────────────────────────────────────────────────────────────────────────

    /// Iterate `(key, value)` pairs in store order. Does not touch the cursor.
    pub fn iter<'a>(&'a self) -> Iter<'a> {
        self.entries
            .iter()
            .map(entry_ref as fn(&'a (Key, Value)) -> (&'a Key, &'a Value))
    }

    /// Iterate `(key, value)` pairs with mutable values.
    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = (&Key, &mut Value)> {
        self.entries.iter_mut().map(|(k, v)| (&*k, v))
    }

    pub fn keys_iter(&self) -> impl DoubleEndedIterator<Item = &Key> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values_iter(&self) -> impl DoubleEndedIterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl Default for Collection {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Collection {
    /// Same keys, same order, strictly equal values. The cursor is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<Key>> Index<K> for Collection {
    type Output = Value;

    fn index(&self, key: K) -> &Value {
        let key = key.into();
        self.get(&key)
            .unwrap_or_else(|| panic!("no entry for key {:?}", key))
    }
}

impl<K: Into<Key>> IndexMut<K> for Collection {
    fn index_mut(&mut self, key: K) -> &mut Value {
        let key = key.into();
        match self.slot(&key) {
            Some(pos) => &mut self.entries[pos].1,
            None => panic!("no entry for key {:?}", key),
        }
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Collection {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut this = Self::new();
        this.extend(iter);
        this
    }
}

impl FromIterator<Value> for Collection {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        Self::from_values(iter)
    }
}

impl<K: Into<Key>, V: Into<Value>> Extend<(K, V)> for Collection {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<V: Into<Value>> From<Vec<V>> for Collection {
    fn from(values: Vec<V>) -> Self {
        Self::from_values(values)
    }
}

impl IntoIterator for Collection {
    type Item = (Key, Value);
    type IntoIter = IntoIter;

    fn into_iter(self) -> IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = (&'a Key, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl Serialize for Collection {
    /// Lists serialise as sequences, everything else as maps.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_list() {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for (_, value) in self.iter() {
                seq.serialize_element(value)?;
            }
            seq.end()
        } else {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (key, value) in self.iter() {
                map.serialize_entry(key, value)?;
            }
            map.end()
        }
    }
}

pub(crate) struct CollectionVisitor;

impl<'de> Visitor<'de> for CollectionVisitor {
    type Value = Collection;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a sequence or a map")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Collection, A::Error> {
        let mut this = Collection::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(value) = seq.next_element_seed(ValueSeed)? {
            this.push(value);
        }
        Ok(this)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Collection, A::Error> {
        let mut this = Collection::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(key) = map.next_key::<Key>()? {
            let value = map.next_value_seed(ValueSeed)?;
            this.insert(key, value);
        }
        Ok(this)
    }
}

struct ValueSeed;

impl<'de> serde::de::DeserializeSeed<'de> for ValueSeed {
    type Value = Value;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

impl<'de> Deserialize<'de> for Collection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(CollectionVisitor)
    }
}
