//! Golden vectors for value comparison.
//!
//! Loose equality and regular ordering decide the outcome of diff,
//! intersect, search, unique and every default sort. These vectors pin the
//! cross-type cases down so that a change to the comparison rules shows up
//! as a failing vector rather than as a quietly different sort order.
//!
//! The two can disagree across type classes: `null` loosely equals `""`,
//! yet null sorts before every string.

use std::cmp::Ordering;

use ordcoll::{compare, equals, Equality, SortFlags, Value};

/// A golden comparison vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Left operand, as JSON.
    pub left: &'static str,
    /// Right operand, as JSON.
    pub right: &'static str,
    /// Expected loose equality.
    pub loose_equal: bool,
    /// Expected ordering under `SortFlags::Regular`.
    pub regular: Ordering,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "int against numeric string",
            left: "1",
            right: r#""1""#,
            loose_equal: true,
            regular: Ordering::Equal,
        },
        GoldenVector {
            name: "int against float",
            left: "1",
            right: "1.0",
            loose_equal: true,
            regular: Ordering::Equal,
        },
        GoldenVector {
            name: "two numeric strings in different notation",
            left: r#""10""#,
            right: r#""1e1""#,
            loose_equal: true,
            regular: Ordering::Equal,
        },
        GoldenVector {
            name: "numeric string with leading space",
            left: r#"" 1""#,
            right: "1",
            loose_equal: true,
            regular: Ordering::Equal,
        },
        GoldenVector {
            name: "numeric strings order numerically",
            left: r#""9""#,
            right: r#""10""#,
            loose_equal: false,
            regular: Ordering::Less,
        },
        GoldenVector {
            name: "non-numeric string against int",
            left: r#""abc""#,
            right: "0",
            loose_equal: false,
            regular: Ordering::Greater,
        },
        GoldenVector {
            name: "plain strings",
            left: r#""abc""#,
            right: r#""abd""#,
            loose_equal: false,
            regular: Ordering::Less,
        },
        GoldenVector {
            name: "null against false",
            left: "null",
            right: "false",
            loose_equal: true,
            regular: Ordering::Equal,
        },
        GoldenVector {
            name: "null against empty string",
            left: "null",
            right: r#""""#,
            loose_equal: true,
            regular: Ordering::Less,
        },
        GoldenVector {
            name: "null against zero string",
            left: "null",
            right: r#""0""#,
            loose_equal: false,
            regular: Ordering::Less,
        },
        GoldenVector {
            name: "true against any non-empty string",
            left: "true",
            right: r#""x""#,
            loose_equal: true,
            regular: Ordering::Less,
        },
        GoldenVector {
            name: "numeric string before partly numeric string",
            left: r#""1e1""#,
            right: r#""1f""#,
            loose_equal: false,
            regular: Ordering::Less,
        },
        GoldenVector {
            name: "partly numeric string after every number",
            left: r#""1f""#,
            right: r#""9""#,
            loose_equal: false,
            regular: Ordering::Greater,
        },
        GoldenVector {
            name: "shorter list sorts first",
            left: "[1,2]",
            right: "[1,2,3]",
            loose_equal: false,
            regular: Ordering::Less,
        },
        GoldenVector {
            name: "maps equal regardless of entry order",
            left: r#"{"a":1,"b":2}"#,
            right: r#"{"b":2,"a":"1"}"#,
            loose_equal: true,
            regular: Ordering::Equal,
        },
        GoldenVector {
            name: "collection sorts after scalar",
            left: "[1]",
            right: "5",
            loose_equal: false,
            regular: Ordering::Greater,
        },
    ]
}

/// Parse both operands of a vector.
pub fn operands(vector: &GoldenVector) -> serde_json::Result<(Value, Value)> {
    Ok((
        serde_json::from_str(vector.left)?,
        serde_json::from_str(vector.right)?,
    ))
}

/// Verify all golden vectors against the comparison primitives.
///
/// Returns `(name, matches, observed)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| match operands(v) {
            Ok((left, right)) => {
                let eq = equals(&left, &right, Equality::Loose);
                let ord = compare(&left, &right, SortFlags::Regular);
                let matches = eq == v.loose_equal && ord == v.regular;
                (v.name.to_string(), matches, format!("eq={} ord={:?}", eq, ord))
            }
            Err(e) => (v.name.to_string(), false, e.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vectors_all_match() {
        for (name, matches, observed) in verify_all_vectors() {
            assert!(matches, "{} failed: {}", name, observed);
        }
    }

    #[test]
    fn test_vectors_symmetric() {
        // Swapping the operands keeps equality and reverses the order.
        for vector in all_vectors() {
            let (left, right) = operands(&vector).unwrap();
            assert_eq!(
                equals(&right, &left, Equality::Loose),
                vector.loose_equal,
                "{}",
                vector.name
            );
            assert_eq!(
                compare(&right, &left, SortFlags::Regular),
                vector.regular.reverse(),
                "{}",
                vector.name
            );
        }
    }

    #[test]
    fn test_vector_names_unique() {
        let vectors = all_vectors();
        let mut names: Vec<&str> = vectors.iter().map(|v| v.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), vectors.len());
    }

    #[test]
    fn test_strict_equality_is_narrower() {
        // Strictly equal implies loosely equal.
        for vector in all_vectors() {
            let (left, right) = operands(&vector).unwrap();
            if equals(&left, &right, Equality::Strict) {
                assert!(vector.loose_equal, "{}", vector.name);
            }
        }
    }
}
