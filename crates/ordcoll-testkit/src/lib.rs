//! # ordcoll Testkit
//!
//! Testing utilities for ordcoll.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known comparison cases with their expected loose
//!   equality and ordering
//! - **Generators**: Proptest strategies for keys, values, collections and
//!   store edit scripts
//! - **Fixtures**: Seeded data sets for tests and benchmarks
//!
//! ## Golden Vectors
//!
//! Golden vectors pin down how values of different types compare:
//!
//! ```rust
//! use ordcoll_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, observed) in verify_all_vectors() {
//!     assert!(matches, "{}: {}", name, observed);
//! }
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use ordcoll_testkit::generators::collection;
//!
//! proptest! {
//!     #[test]
//!     fn map_keeps_keys(c in collection(16)) {
//!         let mapped = c.map(|v| v.clone());
//!         prop_assert_eq!(mapped, c);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! Quickly set up test data:
//!
//! ```rust
//! use ordcoll::Key;
//! use ordcoll_testkit::fixtures::TestFixture;
//!
//! let mut fixture = TestFixture::with_seed(7);
//! let rows = fixture.records(10);
//! let names = rows.column(Some(&Key::from("name")), Some(&Key::from("id")));
//! assert_eq!(names.len(), 10);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{seeded_fixtures, TestFixture};
pub use generators::{run_script, StoreOp, StoreScript};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};
