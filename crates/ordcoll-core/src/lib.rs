//! # ordcoll core
//!
//! Pure primitives shared by the ordered associative collection.
//!
//! This crate knows nothing about collections or values. It provides the
//! pieces every collection operation leans on:
//!
//! ## Key Types
//!
//! - [`Key`] - An entry key: an integer or a string, with canonical integer
//!   strings normalised to integers
//! - [`Number`] - The numeric view of a value, used for coercive comparison
//!   and arithmetic aggregates
//! - [`SortFlags`], [`SortOrder`], [`Equality`], [`KeyCase`] - Per-call
//!   behaviour switches
//! - [`CollectionError`] - The error taxonomy of every fallible operation
//!
//! ## Natural Ordering
//!
//! [`natural::compare`] orders strings so that embedded digit runs compare
//! by numeric value: `"img2.png" < "img10.png"`.

pub mod error;
pub mod flags;
pub mod key;
pub mod natural;
pub mod numeric;

pub use error::{CollectionError, Result};
pub use flags::{Equality, KeyCase, SortFlags, SortOrder, SortSpec};
pub use key::Key;
pub use numeric::{parse_numeric, Number};
