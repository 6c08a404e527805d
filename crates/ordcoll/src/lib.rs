//! # ordcoll
//!
//! An insertion-ordered associative collection with a large set of
//! combinators.
//!
//! ## Overview
//!
//! A [`Collection`] pairs an ordered sequence of key/value entries with:
//!
//! - **Store**: keyed access, append with fresh integer keys, removal, and a
//!   stepwise cursor (`current`/`next`/`prev`/`reset`/`end`)
//! - **Transforms**: map, filter, reduce, slice, splice, chunk, column,
//!   flip, walk, pad and the `fill`/`range` constructors
//! - **Set algebra**: the diff/intersect family with key, assoc and
//!   user-comparator variants; combine, merge and replace
//! - **Order & selection**: stable sorts by value, key, natural order or
//!   caller comparator; multi-column sort; unique; search; random sampling
//!
//! ## Key Concepts
//!
//! - **Key**: an integer or a string. `"5"` and `5` are the same key.
//! - **List**: a collection whose keys are exactly `0..n` in order.
//! - **Mutating vs. value-returning**: methods on `&mut self` rebuild the
//!   receiver; methods on `&self` return a new collection.
//! - **Equality**: one primitive, [`equals`], with strict and loose modes.
//!
//! ## Usage
//!
//! ```rust
//! use ordcoll::{collection, Key, SortFlags};
//!
//! let mut files = collection!["img12.png", "img10.png", "img2.png", "img1.png"];
//! files.natsort();
//! assert_eq!(files.values(), collection!["img1.png", "img2.png", "img10.png", "img12.png"]);
//!
//! let merged = collection![1, 2].merge(&[&collection![3, 4]]);
//! assert_eq!(merged, collection![1, 2, 3, 4]);
//!
//! let mut scores = collection! {"b" => 2, "a" => 1};
//! scores.ksort(SortFlags::Regular);
//! assert_eq!(scores.first_key(), Some(&Key::from("a")));
//! ```
//!
//! ## Re-exports
//!
//! - `ordcoll::core` - Pure primitives (keys, numbers, flags, natural order)

mod aggregate;
mod cursor;
mod macros;
mod order;
mod sampling;
mod set_algebra;
mod transform;

pub mod collection;
pub mod equality;
pub mod extract;
pub mod value;

pub use ordcoll_core as core;

pub use collection::Collection;
pub use equality::{compare, compare_keys, equals, loose_cmp};
pub use extract::ExtractMode;
pub use sampling::SamplerConfig;
pub use value::Value;

pub use ordcoll_core::{
    CollectionError, Equality, Key, KeyCase, Number, Result, SortFlags, SortOrder, SortSpec,
};
