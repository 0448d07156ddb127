//! Seams between the memo stores and the code that consumes them.
//!
//! ## Architecture
//!
//! ```text
//!                     ┌──────────────────────────┐
//!                     │     MemoStore<K, V>      │
//!                     │  lookup / store / len    │
//!                     └────────────┬─────────────┘
//!          ┌──────────────┬────────┴──────┬────────────────┐
//!          ▼              ▼               ▼                ▼
//!     SplayTree       LruCache      UnboundedMemo      MemoTable
//!     (K: Ord)     (K: Eq + Hash)   (K: Eq + Hash)    (dispatch)
//!
//!                     ┌──────────────────────────┐
//!                     │        RangeKey          │
//!                     │  contains_index(&index)  │
//!                     └──────────────────────────┘
//!            (T, T)                         RangeInclusive<T>
//! ```
//!
//! Drivers in [`workload`](crate::workload) are written against
//! [`MemoStore`], so the same computation runs over any strategy.

use std::ops::RangeInclusive;

/// A key→value memo table.
///
/// `lookup` takes `&mut self` because lookups reorganize both the splay tree
/// and the LRU recency order.
///
/// # Example
///
/// ```
/// use memokit::policy::splay::SplayTree;
/// use memokit::traits::MemoStore;
///
/// fn square_memo<S: MemoStore<u32, u64>>(store: &mut S, n: u32) -> u64 {
///     if let Some(v) = store.lookup(&n) {
///         return v;
///     }
///     let v = u64::from(n) * u64::from(n);
///     store.store(n, v);
///     v
/// }
///
/// let mut tree = SplayTree::new();
/// assert_eq!(square_memo(&mut tree, 12), 144);
/// assert_eq!(tree.len(), 1);
/// ```
pub trait MemoStore<K, V> {
    /// Returns a copy of the memoized value for `key`, or `None` on a miss.
    fn lookup(&mut self, key: &K) -> Option<V>;

    /// Records `value` for `key`, replacing any earlier value.
    fn store(&mut self, key: K, value: V);

    /// Number of memoized entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An interval key that can answer whether it covers an index.
///
/// Implemented for inclusive `(left, right)` tuples and
/// [`RangeInclusive`]. Used by
/// [`LruCache::invalidate_ranges_containing`](crate::policy::lru::LruCache::invalidate_ranges_containing).
pub trait RangeKey {
    type Index;

    /// Returns `true` if `left <= index <= right`.
    fn contains_index(&self, index: &Self::Index) -> bool;
}

impl<T: PartialOrd> RangeKey for (T, T) {
    type Index = T;

    #[inline]
    fn contains_index(&self, index: &T) -> bool {
        self.0 <= *index && *index <= self.1
    }
}

impl<T: PartialOrd> RangeKey for RangeInclusive<T> {
    type Index = T;

    #[inline]
    fn contains_index(&self, index: &T) -> bool {
        self.contains(index)
    }
}
