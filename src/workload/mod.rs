//! Consumers of the memo stores.
//!
//! - [`sequence`]: Fibonacci numbers memoized through any [`MemoStore`](crate::traits::MemoStore).
//! - [`range_sum`]: inclusive range sums over a mutable array, cached in an
//!   [`LruCache`](crate::policy::lru::LruCache) and invalidated on update.

pub mod range_sum;
pub mod sequence;
