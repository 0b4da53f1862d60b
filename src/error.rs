//! Error envelopes for invalid collection access.
//!
//! Errors are synchronous and local to the failing call. Silent no-ops
//! (duplicate `Set::put`, `merge`/`select` touching absent keys) are not
//! errors and never appear here.

use thiserror::Error;

/// Failures of index-addressed access on a [`Liste`](crate::Liste).
///
/// The index is reported after negative-index normalization, so
/// `get(-4)` on a three-element list fails with `index: -1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("index not set: {index}")]
    IndexNotSet { index: isize },
}

/// Failures of keyed access on a [`Map`](crate::Map).
///
/// Carries the attempted key so callers can diagnose without probing the
/// map again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError<K: std::fmt::Debug> {
    #[error("key not found: {key:?}")]
    KeyNotFound { key: K },
}
