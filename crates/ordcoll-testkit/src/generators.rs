//! Proptest generators for property-based testing.

use proptest::prelude::*;

use ordcoll::{Collection, Key, Value};

/// Generate a key: a small integer or a short lowercase string.
pub fn key() -> impl Strategy<Value = Key> {
    prop_oneof![
        (-4i64..64).prop_map(Key::Int),
        "[a-z]{1,4}".prop_map(Key::from_string),
    ]
}

/// Generate a finite float. NaN never compares equal to itself, which would
/// break every equality-based property.
pub fn finite_float() -> impl Strategy<Value = f64> {
    -1.0e6f64..1.0e6f64
}

/// Generate a scalar value.
pub fn scalar_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-100i64..100).prop_map(Value::Int),
        finite_float().prop_map(Value::Float),
        "[a-z0-9]{0,6}".prop_map(Value::Str),
    ]
}

/// Generate a value, nesting collections up to two levels deep.
pub fn value() -> impl Strategy<Value = Value> {
    scalar_value().prop_recursive(2, 24, 4, |inner| {
        prop::collection::vec((key(), inner), 0..4)
            .prop_map(|entries| Value::Collection(entries.into_iter().collect()))
    })
}

/// Generate a scalar that stresses ordering: NaN, the infinities, and
/// strings that parse as numbers, only partly parse, or do not parse.
pub fn sort_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => scalar_value(),
        1 => prop::sample::select(vec![f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -0.0])
            .prop_map(Value::Float),
        2 => prop::sample::select(vec![
            "9", "10", "1e1", "1f", "9a", " 1", "1.0", "-3", ".5", "", "0", "abc",
        ])
        .prop_map(Value::from),
    ]
}

/// Generate a value for sorting properties, nesting collections one level.
pub fn sort_value() -> impl Strategy<Value = Value> {
    sort_scalar().prop_recursive(1, 12, 3, |inner| {
        prop::collection::vec((key(), inner), 0..3)
            .prop_map(|entries| Value::Collection(entries.into_iter().collect()))
    })
}

/// Generate a collection of up to `max_len` entries whose values mix every
/// type, NaN included.
pub fn sort_collection(max_len: usize) -> impl Strategy<Value = Collection> {
    prop::collection::vec((key(), sort_value()), 0..=max_len)
        .prop_map(|entries| entries.into_iter().collect())
}

/// Generate a collection of up to `max_len` entries with mixed keys.
///
/// Duplicate keys collapse, so the result may be shorter than requested.
pub fn collection(max_len: usize) -> impl Strategy<Value = Collection> {
    prop::collection::vec((key(), value()), 0..=max_len)
        .prop_map(|entries| entries.into_iter().collect())
}

/// Generate a list of scalar values.
pub fn list(max_len: usize) -> impl Strategy<Value = Collection> {
    prop::collection::vec(scalar_value(), 0..=max_len).prop_map(Collection::from_values)
}

/// Generate a list of integers drawn from `0..spread`, so that duplicates
/// are likely for small spreads.
pub fn int_list(max_len: usize, spread: i64) -> impl Strategy<Value = Collection> {
    prop::collection::vec(0..spread.max(1), 0..=max_len).prop_map(Collection::from_values)
}

/// One structural edit of a store.
#[derive(Debug, Clone)]
pub enum StoreOp {
    /// Append under the next free key.
    Push(i64),
    /// Write under an explicit key.
    Insert(Key, i64),
    /// Remove the entry at this position, modulo the length.
    UnsetAt(usize),
    /// Remove the last entry.
    Pop,
}

/// A sequence of edits to replay against an empty store.
#[derive(Debug, Clone)]
pub struct StoreScript {
    pub ops: Vec<StoreOp>,
}

impl Arbitrary for StoreScript {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        let op = prop_oneof![
            3 => any::<i64>().prop_map(StoreOp::Push),
            2 => (key(), any::<i64>()).prop_map(|(k, v)| StoreOp::Insert(k, v)),
            2 => any::<usize>().prop_map(StoreOp::UnsetAt),
            1 => Just(StoreOp::Pop),
        ];
        prop::collection::vec(op, 0..48)
            .prop_map(|ops| StoreScript { ops })
            .boxed()
    }
}

/// Replay `script` against an empty store. Returns the store and the keys
/// handed out by each `Push`, in order.
pub fn run_script(script: &StoreScript) -> (Collection, Vec<Key>) {
    let mut store = Collection::new();
    let mut pushed = Vec::new();
    for op in &script.ops {
        match op {
            StoreOp::Push(v) => pushed.push(store.push(*v)),
            StoreOp::Insert(k, v) => {
                store.insert(k.clone(), *v);
            }
            StoreOp::UnsetAt(i) => {
                if !store.is_empty() {
                    let k = store.get_index(i % store.len()).map(|(k, _)| k.clone());
                    if let Some(k) = k {
                        store.unset(&k);
                    }
                }
            }
            StoreOp::Pop => {
                store.pop();
            }
        }
    }
    (store, pushed)
}
