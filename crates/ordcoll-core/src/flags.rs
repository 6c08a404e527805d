//! Per-call behaviour switches for comparison and sorting.

use serde::{Deserialize, Serialize};

/// How two values are tested for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Equality {
    /// Cross-type coercive equality: `1 == "1" == 1.0`.
    #[default]
    Loose,
    /// Same type and same value.
    Strict,
}

impl Equality {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            Equality::Strict
        } else {
            Equality::Loose
        }
    }
}

/// How two values (or two keys) are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortFlags {
    /// Coercive comparison: numbers and numeric strings numerically,
    /// other strings bytewise.
    #[default]
    Regular,
    /// Everything converted to a number first.
    Numeric,
    /// Everything converted to its string form, compared bytewise.
    String,
    /// String form, ASCII case folded.
    StringIgnoreCase,
    /// String form in natural order.
    Natural,
    /// String form in natural order, ASCII case folded.
    NaturalIgnoreCase,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Apply this direction to an ascending ordering.
    pub fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// One criterion of a multi-column sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec {
    pub order: SortOrder,
    pub flags: SortFlags,
}

impl SortSpec {
    pub const fn new(order: SortOrder, flags: SortFlags) -> Self {
        Self { order, flags }
    }

    pub const fn ascending() -> Self {
        Self::new(SortOrder::Ascending, SortFlags::Regular)
    }

    pub const fn descending() -> Self {
        Self::new(SortOrder::Descending, SortFlags::Regular)
    }
}

/// Target case for string keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCase {
    #[default]
    Lower,
    Upper,
}
