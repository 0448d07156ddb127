//! Error types for the memokit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when construction parameters are invalid
//!   (e.g. zero capacity).
//! - [`InvariantError`]: Returned by `check_invariants` when a structural
//!   invariant no longer holds.
//! - [`RangeError`]: Returned by the range-sum driver for indices outside the
//!   backing array or inverted intervals.
//!
//! A lookup that finds nothing is not an error anywhere in this crate; it is
//! reported as `None`.
//!
//! ## Example Usage
//!
//! ```
//! use memokit::error::ConfigError;
//! use memokit::policy::lru::LruCache;
//!
//! let cache: Result<LruCache<u64, u64>, ConfigError> = LruCache::try_new(16);
//! assert!(cache.is_ok());
//!
//! let bad = LruCache::<u64, u64>::try_new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when construction parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`LruCache::try_new`](crate::policy::lru::LruCache::try_new) and
/// [`MemoBuilder::try_build`](crate::builder::MemoBuilder::try_build).
///
/// # Example
///
/// ```
/// use memokit::policy::lru::LruCache;
///
/// let err = LruCache::<u64, u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when a structural invariant is violated.
///
/// Produced by [`SplayTree::check_invariants`](crate::policy::splay::SplayTree::check_invariants)
/// and [`LruCache::check_invariants`](crate::policy::lru::LruCache::check_invariants).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// RangeError
// ---------------------------------------------------------------------------

/// Error returned when a range query or update addresses positions outside
/// the backing array, when `left > right`, or when the sum does not fit in
/// an `i64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeError(String);

impl RangeError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }

    pub(crate) fn out_of_bounds(index: usize, len: usize) -> Self {
        Self(format!("index {} out of bounds for array of length {}", index, len))
    }

    pub(crate) fn inverted(left: usize, right: usize) -> Self {
        Self(format!("inverted range: left {} > right {}", left, right))
    }

    pub(crate) fn overflow(left: usize, right: usize) -> Self {
        Self(format!("sum of range [{}, {}] overflows i64", left, right))
    }
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for RangeError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
