//! Cached inclusive range sums over a mutable array.
//!
//! [`RangeSumIndex`] answers `sum(values[left..=right])`, memoizing each
//! answer in an [`LruCache`] keyed by `(left, right)`. Every update to
//! position `i` drops the cached ranges that cover `i` before returning, so
//! a cached answer is never stale.
//!
//! ## Example
//!
//! ```
//! use memokit::workload::range_sum::RangeSumIndex;
//!
//! let mut index = RangeSumIndex::new(vec![1, 2, 3, 4, 5], 8);
//! assert_eq!(index.range_sum(1, 3), Ok(9));
//! assert_eq!(index.range_sum(1, 3), Ok(9)); // served from cache
//!
//! index.update(2, 30).unwrap();
//! assert_eq!(index.range_sum(1, 3), Ok(36));
//! ```

use crate::error::{ConfigError, RangeError};
use crate::policy::lru::LruCache;

#[derive(Debug)]
pub struct RangeSumIndex {
    values: Vec<i64>,
    cache: LruCache<(usize, usize), i64>,
}

impl RangeSumIndex {
    /// # Panics
    ///
    /// Panics if `cache_capacity` is zero. See [`try_new`](Self::try_new).
    pub fn new(values: Vec<i64>, cache_capacity: usize) -> Self {
        match Self::try_new(values, cache_capacity) {
            Ok(index) => index,
            Err(e) => panic!("{}", e),
        }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError`] if `cache_capacity` is zero.
    pub fn try_new(values: Vec<i64>, cache_capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            values,
            cache: LruCache::try_new(cache_capacity)?,
        })
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn cache(&self) -> &LruCache<(usize, usize), i64> {
        &self.cache
    }

    /// Sum of `values[left..=right]`, served from the cache when possible.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError`] if `left > right`, `right` is out of bounds, or
    /// the sum overflows `i64`. Overflowing ranges are never cached.
    pub fn range_sum(&mut self, left: usize, right: usize) -> Result<i64, RangeError> {
        self.check_range(left, right)?;
        if let Some(&sum) = self.cache.get(&(left, right)) {
            return Ok(sum);
        }
        let sum = self.sum_of(left, right)?;
        self.cache.put((left, right), sum);
        Ok(sum)
    }

    /// Sum of `values[left..=right]` computed directly, bypassing the cache.
    pub fn range_sum_uncached(&self, left: usize, right: usize) -> Result<i64, RangeError> {
        self.check_range(left, right)?;
        self.sum_of(left, right)
    }

    /// Sets `values[index] = value` and invalidates every cached range that
    /// contains `index`. Returns the previous value.
    pub fn update(&mut self, index: usize, value: i64) -> Result<i64, RangeError> {
        let len = self.values.len();
        let slot = self
            .values
            .get_mut(index)
            .ok_or_else(|| RangeError::out_of_bounds(index, len))?;
        let old = std::mem::replace(slot, value);
        let removed = self.cache.invalidate_ranges_containing(&index);
        tracing::debug!(index, removed, "array updated, cached ranges invalidated");
        Ok(old)
    }

    fn sum_of(&self, left: usize, right: usize) -> Result<i64, RangeError> {
        // i128 cannot overflow for any addressable slice of i64s
        let wide: i128 = self.values[left..=right].iter().map(|&v| i128::from(v)).sum();
        i64::try_from(wide).map_err(|_| RangeError::overflow(left, right))
    }

    fn check_range(&self, left: usize, right: usize) -> Result<(), RangeError> {
        if left > right {
            return Err(RangeError::inverted(left, right));
        }
        if right >= self.values.len() {
            return Err(RangeError::out_of_bounds(right, self.values.len()));
        }
        Ok(())
    }
}
