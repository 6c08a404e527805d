//! Error types for collection operations.

use thiserror::Error;

/// Errors that can occur during collection operations.
///
/// Cursor reads and lookups never fail; they return `None` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// Two collections that must be paired positionally differ in length.
    #[error("length mismatch: expected {expected} entries, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A request for more (or fewer) entries than the collection can supply.
    #[error("requested {requested} entries, but only {available} available")]
    OutOfRange { requested: usize, available: usize },

    /// An argument outside the domain the operation accepts.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A value that cannot be used as a key.
    #[error("illegal key: {0}")]
    IllegalKey(String),

    /// An append after the store has held the largest integer key.
    #[error("no integer key left after {last}")]
    KeySpaceExhausted { last: i64 },
}

/// Result type for collection operations.
pub type Result<T> = std::result::Result<T, CollectionError>;
