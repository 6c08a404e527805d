//! Golden vectors for collection behaviour.
//!
//! Each vector feeds a JSON collection through one operation and records the
//! JSON of the result. Lists serialise as arrays, anything else as objects
//! in store order, so both the keys and their order are pinned down.

use ordcoll::{
    collection, Collection, CollectionError, Equality, Key, SamplerConfig, SortFlags, Value,
};
use serde::{Deserialize, Serialize};

/// A single golden test vector.
#[derive(Debug, Serialize, Deserialize)]
pub struct GoldenVector {
    pub name: String,
    pub description: String,
    pub input: String,
    pub output: String,
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Run `op` on the collection parsed from `input`.
fn generate_vector(
    name: &str,
    description: &str,
    input: &str,
    op: fn(Collection) -> Collection,
) -> GoldenVector {
    let parsed: Collection = serde_json::from_str(input).unwrap();
    let output = op(parsed);
    GoldenVector {
        name: name.to_string(),
        description: description.to_string(),
        input: input.to_string(),
        output: serde_json::to_string(&output).unwrap(),
    }
}

pub fn generate_all_vectors() -> Vec<GoldenVector> {
    vec![
        generate_vector(
            "replace_appends_new_keys",
            "replace with a disjoint key adds it at the end",
            r#"{"a":1,"b":2}"#,
            |c| c.replace(&[&collection! {"c" => 3}]),
        ),
        generate_vector(
            "merge_lists",
            "merging two lists renumbers across both",
            "[1,2]",
            |c| c.merge(&[&collection![3, 4]]),
        ),
        generate_vector(
            "natsort_keeps_keys",
            "natural order, original keys kept",
            r#"["img12.png","img10.png","img2.png","img1.png"]"#,
            |mut c| {
                c.natsort();
                c
            },
        ),
        generate_vector(
            "natcasesort_keeps_keys",
            "case-insensitive natural order",
            r#"["IMG0.png","img12.png","img10.png","img2.png","img1.png","IMG3.png"]"#,
            |mut c| {
                c.natcasesort();
                c
            },
        ),
        generate_vector(
            "filter_keeps_keys",
            "filtering leaves surviving keys untouched",
            "[1,2,3,4]",
            |mut c| {
                c.filter(|v| v.as_int().is_some_and(|n| n > 2));
                c
            },
        ),
        generate_vector(
            "unique_keeps_first",
            "later duplicates are removed under string comparison",
            r#"[1,2,"2",2.0,3]"#,
            |mut c| {
                c.unique(None);
                c
            },
        ),
        generate_vector(
            "chunk_zero",
            "a zero chunk size yields nothing",
            "[1,2,3]",
            |c| c.chunk(0, false),
        ),
        generate_vector(
            "chunk_preserving_keys",
            "chunks keep their source keys",
            r#"{"a":1,"b":2,"c":3}"#,
            |c| c.chunk(2, true),
        ),
        generate_vector(
            "merge_recursive_nested",
            "nested collections under a shared string key merge",
            r#"{"a":1,"b":{"x":2}}"#,
            |c| c.merge_recursive(&[&collection! {"b" => collection! {"y" => 3}, "c" => 4}]),
        ),
        generate_vector(
            "column_with_index",
            "one field per record, keyed by another field",
            r#"[{"id":3,"name":"John"},{"id":5,"name":"Jane"}]"#,
            |c| c.column(Some(&Key::from("name")), Some(&Key::from("id"))),
        ),
        generate_vector(
            "ksort_mixed_keys",
            "integer keys sort before non-numeric strings",
            r#"{"b":1,"10":2,"a":3,"9":4}"#,
            |mut c| {
                c.ksort(SortFlags::Regular);
                c
            },
        ),
        generate_vector(
            "splice_middle",
            "replace a window and renumber",
            "[1,2,3,4]",
            |mut c| {
                c.splice(1, Some(2), [5, 6]);
                c
            },
        ),
    ]
}

fn expected(name: &str) -> &'static str {
    match name {
        "replace_appends_new_keys" => r#"{"a":1,"b":2,"c":3}"#,
        "merge_lists" => "[1,2,3,4]",
        "natsort_keeps_keys" => r#"{"3":"img1.png","2":"img2.png","1":"img10.png","0":"img12.png"}"#,
        "natcasesort_keeps_keys" => {
            r#"{"0":"IMG0.png","4":"img1.png","3":"img2.png","5":"IMG3.png","2":"img10.png","1":"img12.png"}"#
        }
        "filter_keeps_keys" => r#"{"2":3,"3":4}"#,
        "unique_keeps_first" => r#"{"0":1,"1":2,"4":3}"#,
        "chunk_zero" => "[]",
        "chunk_preserving_keys" => r#"[{"a":1,"b":2},{"c":3}]"#,
        "merge_recursive_nested" => r#"{"a":1,"b":{"x":2,"y":3},"c":4}"#,
        "column_with_index" => r#"{"3":"John","5":"Jane"}"#,
        "ksort_mixed_keys" => r#"{"9":4,"10":2,"a":3,"b":1}"#,
        "splice_middle" => "[1,5,6,4]",
        other => panic!("no expected output for {}", other),
    }
}

#[test]
fn test_vectors_match_expected() {
    init_tracing();
    for v in generate_all_vectors() {
        assert_eq!(v.output, expected(&v.name), "output mismatch for {}", v.name);
    }
}

#[test]
fn test_vectors_deterministic() {
    let v1 = generate_all_vectors();
    let v2 = generate_all_vectors();
    for (a, b) in v1.iter().zip(v2.iter()) {
        assert_eq!(a.output, b.output, "output mismatch for {}", a.name);
    }
}

#[test]
fn test_outputs_parse_back() {
    for v in generate_all_vectors() {
        let parsed: Collection = serde_json::from_str(&v.output).unwrap();
        assert_eq!(serde_json::to_string(&parsed).unwrap(), v.output, "{}", v.name);
    }
}

#[test]
fn print_golden_vectors_json() {
    let vectors = generate_all_vectors();
    let json = serde_json::to_string_pretty(&vectors).unwrap();
    println!("{}", json);
}

// =============================================================================
// REJECTIONS
// =============================================================================

#[test]
fn test_reject_combine_length_mismatch() {
    let err = collection!["a", "b"].combine(&collection![1]).unwrap_err();
    assert_eq!(
        err,
        CollectionError::LengthMismatch {
            expected: 2,
            actual: 1
        }
    );
}

#[test]
fn test_reject_rand_out_of_range() {
    let c = collection![1, 2, 3];
    assert!(matches!(c.rand(0), Err(CollectionError::OutOfRange { .. })));
    assert!(matches!(c.rand(4), Err(CollectionError::OutOfRange { .. })));
}

#[test]
fn test_reject_bad_constructors() {
    assert!(matches!(
        Collection::fill(0, -1, 1),
        Err(CollectionError::InvalidArgument(_))
    ));
    assert!(matches!(
        Collection::range(0, 10, 0),
        Err(CollectionError::InvalidArgument(_))
    ));
    assert!(matches!(
        Collection::range(0, 1, 2),
        Err(CollectionError::InvalidArgument(_))
    ));
}

// =============================================================================
// END-TO-END
// =============================================================================

#[test]
fn test_append_keys_never_reused() {
    let mut c = Collection::new();
    for i in 0..5 {
        c.push(i);
    }
    c.unset(&Key::from(4));
    c.unset(&Key::from(3));
    assert_eq!(c.push("next"), Key::Int(5));

    // Renumbering resets the high-water mark.
    c.sort(SortFlags::String);
    assert_eq!(c.push("after sort"), Key::Int(4));
}

#[test]
fn test_cursor_walk_alongside_iteration() {
    let mut c = collection! {"a" => 1, "b" => 2, "c" => 3};
    let mut stepped = vec![c.current().cloned()];
    while let Some(v) = c.next() {
        stepped.push(Some(v.clone()));
    }
    assert_eq!(
        stepped,
        vec![
            Some(Value::from(1)),
            Some(Value::from(2)),
            Some(Value::from(3))
        ]
    );
    assert_eq!(c.iter().count(), 3);
    assert_eq!(c.key(), None);
    assert_eq!(c.reset(), Some(&Value::from(1)));
}

#[test]
fn test_flip_skips_unkeyable_values() {
    init_tracing();
    let c = collection!["a", 1.5, collection![], "b"];
    assert_eq!(c.flip(), collection! {"a" => 0, "b" => 3});
}

#[test]
fn test_seeded_shuffle_is_reproducible() {
    init_tracing();
    let cfg = SamplerConfig::seeded(1234);
    let base = Collection::from_values(0..20);

    let mut a = base.clone();
    a.shuffle_with(&mut cfg.rng());
    let mut b = base.clone();
    b.shuffle_with(&mut cfg.rng());
    assert_eq!(a, b);

    a.sort(SortFlags::Regular);
    assert_eq!(a, base);
}

#[test]
fn test_search_respects_equality_mode() {
    let c = collection!["10", 10, "1e1"];
    assert_eq!(c.search(&Value::from(10), Equality::Loose), Some(&Key::Int(0)));
    assert_eq!(c.search(&Value::from(10), Equality::Strict), Some(&Key::Int(1)));
    assert_eq!(c.keys_of(&Value::from("10"), Equality::Loose), collection![0, 1, 2]);
}
