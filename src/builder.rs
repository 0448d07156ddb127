//! Unified memo table builder.
//!
//! Lets a caller pick a strategy at runtime while writing the consuming code
//! once against [`MemoTable`] (or the [`MemoStore`] trait).
//!
//! ## Example
//!
//! ```rust
//! use memokit::builder::{MemoBuilder, MemoStrategy};
//!
//! let mut memo = MemoBuilder::new(MemoStrategy::Lru { capacity: 2 }).build::<u64, u64>();
//! memo.insert(1, 10);
//! memo.insert(2, 20);
//! memo.insert(3, 30);
//! assert_eq!(memo.get(&1), None);
//! assert_eq!(memo.get(&3), Some(&30));
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
use crate::policy::lru::LruCache;
use crate::policy::splay::SplayTree;
use crate::policy::unbounded::UnboundedMemo;
use crate::traits::MemoStore;

/// Available memo strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoStrategy {
    /// Self-adjusting binary search tree; unbounded.
    Splay,
    /// Least-recently-used cache holding at most `capacity` entries.
    Lru { capacity: usize },
    /// Plain hash map; unbounded.
    Unbounded,
}

/// Builder for [`MemoTable`].
#[derive(Debug, Clone)]
pub struct MemoBuilder {
    strategy: MemoStrategy,
    initial_capacity: usize,
}

impl MemoBuilder {
    pub fn new(strategy: MemoStrategy) -> Self {
        Self {
            strategy,
            initial_capacity: 0,
        }
    }

    /// Preallocation hint for the unbounded strategies. Ignored by `Lru`,
    /// which always reserves its full capacity.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Builds the table.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid. See [`try_build`](Self::try_build).
    pub fn build<K, V>(self) -> MemoTable<K, V>
    where
        K: Ord + Eq + Hash + Clone,
    {
        match self.try_build() {
            Ok(table) => table,
            Err(e) => panic!("{}", e),
        }
    }

    /// Builds the table, rejecting invalid configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for `MemoStrategy::Lru { capacity: 0 }`.
    pub fn try_build<K, V>(self) -> Result<MemoTable<K, V>, ConfigError>
    where
        K: Ord + Eq + Hash + Clone,
    {
        let inner = match self.strategy {
            MemoStrategy::Splay => MemoInner::Splay(SplayTree::with_capacity(self.initial_capacity)),
            MemoStrategy::Lru { capacity } => MemoInner::Lru(LruCache::try_new(capacity)?),
            MemoStrategy::Unbounded => {
                MemoInner::Unbounded(UnboundedMemo::with_capacity(self.initial_capacity))
            },
        };
        Ok(MemoTable {
            strategy: self.strategy,
            inner,
        })
    }
}

/// Memo table that dispatches to the strategy chosen at build time.
#[derive(Debug)]
pub struct MemoTable<K, V> {
    strategy: MemoStrategy,
    inner: MemoInner<K, V>,
}

#[derive(Debug)]
enum MemoInner<K, V> {
    Splay(SplayTree<K, V>),
    Lru(LruCache<K, V>),
    Unbounded(UnboundedMemo<K, V>),
}

impl<K, V> MemoTable<K, V>
where
    K: Ord + Eq + Hash + Clone,
{
    /// Insert a key-value pair. Returns the previous value if the key existed.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match &mut self.inner {
            MemoInner::Splay(tree) => tree.insert(key, value),
            MemoInner::Lru(lru) => lru.put(key, value),
            MemoInner::Unbounded(map) => map.insert(key, value),
        }
    }

    /// Look up a value; the splay and LRU strategies record the access.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match &mut self.inner {
            MemoInner::Splay(tree) => tree.find(key),
            MemoInner::Lru(lru) => lru.get(key),
            MemoInner::Unbounded(map) => map.get(key),
        }
    }

    pub fn len(&self) -> usize {
        match &self.inner {
            MemoInner::Splay(tree) => tree.len(),
            MemoInner::Lru(lru) => lru.len(),
            MemoInner::Unbounded(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries, or `None` for the unbounded strategies.
    pub fn capacity(&self) -> Option<usize> {
        match &self.inner {
            MemoInner::Lru(lru) => Some(lru.capacity()),
            MemoInner::Splay(_) | MemoInner::Unbounded(_) => None,
        }
    }

    pub fn strategy(&self) -> MemoStrategy {
        self.strategy
    }

    pub fn clear(&mut self) {
        match &mut self.inner {
            MemoInner::Splay(tree) => tree.clear(),
            MemoInner::Lru(lru) => lru.clear(),
            MemoInner::Unbounded(map) => map.clear(),
        }
    }
}

impl<K, V> MemoStore<K, V> for MemoTable<K, V>
where
    K: Ord + Eq + Hash + Clone,
    V: Clone,
{
    fn lookup(&mut self, key: &K) -> Option<V> {
        self.get(key).cloned()
    }

    fn store(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn len(&self) -> usize {
        MemoTable::len(self)
    }
}
