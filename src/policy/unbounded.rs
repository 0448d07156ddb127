//! Unbounded hash-map memo table.
//!
//! The baseline the bounded and self-adjusting stores are compared against:
//! every stored entry stays until [`clear`](UnboundedMemo::clear), and
//! lookups never reorder anything.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::traits::MemoStore;

#[derive(Debug, Clone)]
pub struct UnboundedMemo<K, V> {
    map: FxHashMap<K, V>,
}

impl<K, V> UnboundedMemo<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    /// Inserts `value`, returning the previous value for `key`.
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.map.insert(key, value)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<K: Eq + Hash, V> Default for UnboundedMemo<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> MemoStore<K, V> for UnboundedMemo<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn lookup(&mut self, key: &K) -> Option<V> {
        self.map.get(key).cloned()
    }

    fn store(&mut self, key: K, value: V) {
        self.map.insert(key, value);
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}
