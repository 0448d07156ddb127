//! Capacity-bounded LRU cache with range invalidation.
//!
//! ## Architecture
//!
//! ```text
//!   map: FxHashMap<K, SlotId>            list: RecencyList<Entry<K, V>>
//!   ┌──────────┬────────┐
//!   │ (2, 5)   │ id_1   │──┐     head (MRU)                      tail (LRU)
//!   │ (10, 20) │ id_2   │──┼──►  [id_1] ◄──► [id_3] ◄──► [id_2]
//!   │ (0, 3)   │ id_3   │──┘
//!   └──────────┴────────┘
//! ```
//!
//! The map gives O(1) key lookup; the list gives O(1) move-to-front and
//! O(1) removal of the least recently used entry. `get` and `put` are O(1)
//! amortized. [`invalidate_ranges_containing`](LruCache::invalidate_ranges_containing)
//! walks every entry and is O(len).
//!
//! ## Example
//!
//! ```
//! use memokit::policy::lru::LruCache;
//!
//! let mut cache = LruCache::new(2);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! assert_eq!(cache.get(&"a"), Some(&1));
//!
//! // "b" is now least recently used
//! cache.put("c", 3);
//! assert_eq!(cache.get(&"b"), None);
//! assert_eq!(cache.get(&"c"), Some(&3));
//! ```
//!
//! Range keys:
//!
//! ```
//! use memokit::policy::lru::LruCache;
//!
//! let mut cache = LruCache::new(16);
//! cache.put((2, 5), 10);
//! cache.put((10, 20), 99);
//!
//! assert_eq!(cache.invalidate_ranges_containing(&4), 1);
//! assert_eq!(cache.get(&(2, 5)), None);
//! assert_eq!(cache.get(&(10, 20)), Some(&99));
//! assert_eq!(cache.invalidate_ranges_containing(&4), 0);
//! ```

use std::hash::Hash;
use std::mem;

use rustc_hash::FxHashMap;

use crate::ds::recency_list::RecencyList;
use crate::ds::slot_arena::SlotId;
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, LruMetricsRecorder, MetricsSnapshotProvider};
use crate::traits::{MemoStore, RangeKey};

#[derive(Debug)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// Fixed-capacity key→value cache with least-recently-used eviction.
#[derive(Debug)]
pub struct LruCache<K, V> {
    map: FxHashMap<K, SlotId>,
    list: RecencyList<Entry<K, V>>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. See [`try_new`](Self::try_new).
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a cache holding at most `capacity` entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("cache capacity must be greater than zero"));
        }
        tracing::debug!(capacity, "creating lru cache");
        Ok(Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            list: RecencyList::with_capacity(capacity),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if `key` is cached. Does not update recency.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Returns the value for `key` and marks it most recently used.
    ///
    /// A miss is `None`; there is no sentinel value.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let Some(&id) = self.map.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();

        self.list.move_to_front(id);
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Returns the value for `key` without touching recency order.
    pub fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.map.get(key)?;
        self.list.get(id).map(|entry| &entry.value)
    }

    /// Inserts or overwrites `key`, making it most recently used.
    ///
    /// Returns the previous value when `key` was already cached. Inserting a
    /// new key into a full cache first evicts the least recently used entry.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(&id) = self.map.get(&key) {
            if let Some(entry) = self.list.get_mut(id) {
                #[cfg(feature = "metrics")]
                self.metrics.record_insert_update();

                let old = mem::replace(&mut entry.value, value);
                self.list.move_to_front(id);
                return Some(old);
            }
        }

        if self.map.len() >= self.capacity {
            self.evict_lru();
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        let id = self.list.push_front(Entry {
            key: key.clone(),
            value,
        });
        self.map.insert(key, id);
        None
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.map.remove(key)?;

        #[cfg(feature = "metrics")]
        self.metrics.record_remove();

        self.list.remove(id).map(|entry| entry.value)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        let entry = self.list.pop_back()?;
        self.map.remove(&entry.key);

        #[cfg(feature = "metrics")]
        self.metrics.record_remove();

        Some((entry.key, entry.value))
    }

    /// Returns the most recently used entry without changing recency.
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        self.list.front().map(|entry| (&entry.key, &entry.value))
    }

    /// Returns the least recently used entry without removing it.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.back().map(|entry| (&entry.key, &entry.value))
    }

    /// Marks `key` most recently used; returns `false` if it is not cached.
    pub fn touch(&mut self, key: &K) -> bool {
        match self.map.get(key) {
            Some(&id) => self.list.move_to_front(id),
            None => false,
        }
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.list
            .iter_entries()
            .map(|(_, entry)| (&entry.key, &entry.value))
    }

    /// Removes every entry for which `keep` returns `false`; returns how many
    /// were removed. Relative recency of the survivors is unchanged.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&K, &V) -> bool,
    {
        let doomed: Vec<SlotId> = self
            .list
            .iter_entries()
            .filter(|(_, entry)| !keep(&entry.key, &entry.value))
            .map(|(id, _)| id)
            .collect();

        for &id in &doomed {
            if let Some(entry) = self.list.remove(id) {
                self.map.remove(&entry.key);
            }
        }
        doomed.len()
    }

    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.map.clear();
        self.list.clear();
    }

    /// Verifies that the key index and recency list agree and that the size
    /// bound holds.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.map.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "map has {} keys but recency list has {} entries",
                self.map.len(),
                self.list.len()
            )));
        }
        if self.map.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.map.len(),
                self.capacity
            )));
        }
        if self.list.slot_count() > self.capacity {
            return Err(InvariantError::new(format!(
                "recency list holds {} slots for capacity {}",
                self.list.slot_count(),
                self.capacity
            )));
        }
        for (id, entry) in self.list.iter_entries() {
            if self.map.get(&entry.key) != Some(&id) {
                return Err(InvariantError::new(
                    "recency list entry not indexed under its own key",
                ));
            }
        }
        if self.map.values().any(|&id| !self.list.contains(id)) {
            return Err(InvariantError::new("key indexes a vacant recency slot"));
        }
        Ok(())
    }

    fn evict_lru(&mut self) {
        if let Some(entry) = self.list.pop_back() {
            self.map.remove(&entry.key);

            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
        }
    }
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone + RangeKey,
{
    /// Removes every cached entry whose interval key `(L, R)` satisfies
    /// `L <= index <= R`; returns the number removed.
    ///
    /// The caller must invoke this after mutating position `index` of the
    /// data the cached aggregates were computed from. Calling it again for
    /// the same index is a no-op.
    pub fn invalidate_ranges_containing(&mut self, index: &K::Index) -> usize {
        #[cfg(feature = "metrics")]
        self.metrics.record_invalidate_call();

        let removed = self.retain(|key, _| !key.contains_index(index));

        #[cfg(feature = "metrics")]
        self.metrics.record_invalidated_entries(removed as u64);

        tracing::trace!(removed, remaining = self.map.len(), "invalidated cached ranges");
        removed
    }
}

impl<K, V> MemoStore<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn lookup(&mut self, key: &K) -> Option<V> {
        self.get(key).cloned()
    }

    fn store(&mut self, key: K, value: V) {
        self.put(key, value);
    }

    fn len(&self) -> usize {
        LruCache::len(self)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            evicted_entries: self.metrics.evicted_entries,
            removals: self.metrics.removals,
            invalidate_calls: self.metrics.invalidate_calls,
            invalidated_entries: self.metrics.invalidated_entries,
            clears: self.metrics.clears,
            cache_len: self.map.len(),
            capacity: self.capacity,
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMetricsSnapshot> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMetricsSnapshot {
        self.metrics_snapshot()
    }
}
