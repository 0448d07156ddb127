//! Self-adjusting binary search tree (splay tree).
//!
//! Every `find` or `insert` splays the tree on the requested key: rotations
//! pull the key (or the last node on its search path, when absent) up to the
//! root. Recently accessed keys therefore sit near the top, and any sequence
//! of operations costs amortized O(log n) per operation.
//!
//! ## Architecture
//!
//! ```text
//!   nodes: Vec<Node<K, V>>            root ─► NodeId
//!   ┌────────┬───────────────────────────────────────┐
//!   │ NodeId │ Node { key, value, left, right }      │
//!   ├────────┼───────────────────────────────────────┤
//!   │   0    │ { 10, "a", left: Some(1), right: None }│
//!   │   1    │ {  4, "b", left: None,    right: None }│
//!   └────────┴───────────────────────────────────────┘
//! ```
//!
//! Nodes are owned by the tree and linked by index; there are no parent
//! pointers and no `unsafe`. Nodes are only ever added (there is no remove),
//! so indices never dangle.
//!
//! ## Splay
//!
//! The splay works two levels at a time from the top of the search path:
//!
//! ```text
//!   zig-zig (key < r.left.key)        zig-zag (r.left.key < key < r.key)
//!
//!         r                                  r
//!        /            splay l.left          /          splay l.right,
//!       l         ─►  then rotate r,       l       ─►  rotate l left,
//!      /              then rotate again     \          then rotate r right
//!     *                                      *
//! ```
//!
//! Mirror cases (zag-zag, zag-zig) handle keys greater than `r.key`. When
//! the key equals a child's key a single rotation (zig / zag) finishes the
//! pair. The descent records one `Step` per pair on an explicit stack and
//! the rotations are applied while unwinding it, so deep degenerate trees
//! cannot overflow the call stack.
//!
//! ## Example
//!
//! ```
//! use memokit::policy::splay::SplayTree;
//!
//! let mut tree = SplayTree::new();
//! tree.insert(20, "twenty");
//! tree.insert(10, "ten");
//! tree.insert(30, "thirty");
//!
//! assert_eq!(tree.find(&10), Some(&"ten"));
//! assert_eq!(tree.root_key(), Some(&10));
//!
//! assert_eq!(tree.find(&15), None);
//! assert_eq!(tree.insert(30, "THIRTY"), Some("thirty"));
//! assert_eq!(tree.len(), 3);
//!
//! let keys: Vec<_> = tree.keys().copied().collect();
//! assert_eq!(keys, vec![10, 20, 30]);
//! ```

use std::cmp::Ordering;
use std::mem;

use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::SplayMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::SplayMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{CoreMetricsRecorder, MetricsSnapshotProvider, SplayMetricsRecorder};
use crate::traits::MemoStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeId(usize);

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// One two-level pair recorded on the way down, carrying the child on the
/// search path. The parent is stored next to it on the path stack.
#[derive(Debug, Clone, Copy)]
enum Step {
    /// key == left child key
    Zig(NodeId),
    ZigZig(NodeId),
    ZigZag(NodeId),
    /// key == right child key
    Zag(NodeId),
    ZagZag(NodeId),
    ZagZig(NodeId),
}

/// Ordered key→value store that splays on every access.
///
/// Lookups take `&mut self` because they restructure the tree.
#[derive(Debug)]
pub struct SplayTree<K, V> {
    nodes: Vec<Node<K, V>>,
    root: Option<NodeId>,
    // scratch stack reused across splays
    path: Vec<(NodeId, Step)>,
    #[cfg(feature = "metrics")]
    metrics: SplayMetrics,
}

impl<K, V> SplayTree<K, V>
where
    K: Ord,
{
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty tree with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root: None,
            path: Vec::new(),
            #[cfg(feature = "metrics")]
            metrics: SplayMetrics::default(),
        }
    }

    /// Returns the number of keys in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the key currently at the root, i.e. the most recently
    /// accessed one (or the last node on the most recent search path).
    #[inline]
    pub fn root_key(&self) -> Option<&K> {
        self.root.map(|id| &self.node(id).key)
    }

    /// Inserts `key` with `value`, returning the previous value if the key was
    /// already present. Either way `key` ends up at the root.
    ///
    /// # Example
    ///
    /// ```
    /// use memokit::policy::splay::SplayTree;
    ///
    /// let mut tree = SplayTree::new();
    /// assert_eq!(tree.insert(5, 'a'), None);
    /// assert_eq!(tree.insert(3, 'b'), None);
    /// assert_eq!(tree.insert(5, 'c'), Some('a'));
    /// assert_eq!(tree.root_key(), Some(&5));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        let Some(root) = self.splay(&key) else {
            let id = self.alloc(key, value, None, None);
            self.root = Some(id);
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_new();
            return None;
        };

        let id = match key.cmp(&self.node(root).key) {
            Ordering::Equal => {
                #[cfg(feature = "metrics")]
                self.metrics.record_insert_update();
                return Some(mem::replace(&mut self.node_mut(root).value, value));
            },
            Ordering::Less => {
                let left = self.node_mut(root).left.take();
                self.alloc(key, value, left, Some(root))
            },
            Ordering::Greater => {
                let right = self.node_mut(root).right.take();
                self.alloc(key, value, Some(root), right)
            },
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_insert_new();

        self.root = Some(id);
        None
    }

    /// Looks up `key`, splaying it (or its nearest neighbour on the search
    /// path) to the root. Returns `None` if the key is absent.
    pub fn find(&mut self, key: &K) -> Option<&V> {
        let id = self.find_id(key)?;
        Some(&self.node(id).value)
    }

    /// Like [`find`](Self::find) but returns a mutable reference to the value.
    ///
    /// Keys are never handed out mutably, so the ordering cannot be broken
    /// through this reference.
    pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.find_id(key)?;
        Some(&mut self.node_mut(id).value)
    }

    /// Returns `true` if `key` is present. Does not restructure the tree.
    pub fn contains_key(&self, key: &K) -> bool {
        let mut cursor = self.root;
        while let Some(id) = cursor {
            let node = self.node(id);
            cursor = match key.cmp(&node.key) {
                Ordering::Equal => return true,
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        false
    }

    /// Number of nodes on the longest root-to-leaf path (0 when empty).
    pub fn height(&self) -> usize {
        let mut max = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|id| (id, 1)).into_iter().collect();
        while let Some((id, depth)) = stack.pop() {
            max = max.max(depth);
            let node = self.node(id);
            stack.extend(node.left.map(|l| (l, depth + 1)));
            stack.extend(node.right.map(|r| (r, depth + 1)));
        }
        max
    }

    /// In-order iterator over `(&K, &V)`; keys come out strictly increasing.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter {
            tree: self,
            stack: Vec::new(),
        };
        iter.push_left_spine(self.root);
        iter
    }

    /// In-order iterator over keys.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _)| k)
    }

    /// Removes every node.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        tracing::trace!(len = self.nodes.len(), "clearing splay tree");
        self.nodes.clear();
        self.root = None;
    }

    /// Verifies that every node is reachable exactly once from the root and
    /// that an in-order walk yields strictly increasing keys.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut visited = vec![false; self.nodes.len()];
        let mut reachable = 0usize;
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let seen = visited
                .get_mut(id.0)
                .ok_or_else(|| InvariantError::new(format!("node index {} out of range", id.0)))?;
            if *seen {
                return Err(InvariantError::new(format!(
                    "node {} reachable along more than one path",
                    id.0
                )));
            }
            *seen = true;
            reachable += 1;
            let node = self.node(id);
            stack.extend(node.left);
            stack.extend(node.right);
        }
        if reachable != self.nodes.len() {
            return Err(InvariantError::new(format!(
                "{} nodes allocated but {} reachable from root",
                self.nodes.len(),
                reachable
            )));
        }

        let mut prev: Option<&K> = None;
        for (key, _) in self.iter() {
            if prev.is_some_and(|p| p >= key) {
                return Err(InvariantError::new("in-order keys are not strictly increasing"));
            }
            prev = Some(key);
        }
        Ok(())
    }

    fn find_id(&mut self, key: &K) -> Option<NodeId> {
        let hit = self.splay(key).filter(|&root| self.node(root).key == *key);

        #[cfg(feature = "metrics")]
        {
            if hit.is_some() {
                self.metrics.record_get_hit();
            } else {
                self.metrics.record_get_miss();
            }
        }

        hit
    }

    /// Splays the whole tree on `key` and returns the new root.
    fn splay(&mut self, key: &K) -> Option<NodeId> {
        let root = self.root?;
        let new_root = self.splay_from(root, key);
        self.root = Some(new_root);
        Some(new_root)
    }

    fn splay_from(&mut self, root: NodeId, key: &K) -> NodeId {
        #[cfg(feature = "metrics")]
        self.metrics.record_splay_call();

        let mut path = mem::take(&mut self.path);
        path.clear();

        // Descend two levels at a time; `splayed` is the result for the
        // subtree below the last recorded step.
        let mut cursor = Some(root);
        let mut splayed = loop {
            let Some(r) = cursor else { break None };
            let node = self.node(r);
            let step = match key.cmp(&node.key) {
                Ordering::Equal => break Some(r),
                Ordering::Less => {
                    let Some(l) = node.left else { break Some(r) };
                    let child = self.node(l);
                    match key.cmp(&child.key) {
                        Ordering::Less => {
                            cursor = child.left;
                            Step::ZigZig(l)
                        },
                        Ordering::Greater => {
                            cursor = child.right;
                            Step::ZigZag(l)
                        },
                        Ordering::Equal => {
                            cursor = None;
                            Step::Zig(l)
                        },
                    }
                },
                Ordering::Greater => {
                    let Some(rt) = node.right else { break Some(r) };
                    let child = self.node(rt);
                    match key.cmp(&child.key) {
                        Ordering::Greater => {
                            cursor = child.right;
                            Step::ZagZag(rt)
                        },
                        Ordering::Less => {
                            cursor = child.left;
                            Step::ZagZig(rt)
                        },
                        Ordering::Equal => {
                            cursor = None;
                            Step::Zag(rt)
                        },
                    }
                },
            };
            path.push((r, step));
        };

        while let Some((r, step)) = path.pop() {
            let top = match step {
                Step::Zig(l) => self.rotate_right(r, l),
                Step::ZigZig(l) => {
                    self.node_mut(l).left = splayed;
                    let top = self.rotate_right(r, l);
                    match splayed {
                        Some(s) => self.rotate_right(top, s),
                        None => top,
                    }
                },
                Step::ZigZag(l) => {
                    self.node_mut(l).right = splayed;
                    let pivot = match splayed {
                        Some(s) => {
                            let s = self.rotate_left(l, s);
                            self.node_mut(r).left = Some(s);
                            s
                        },
                        None => l,
                    };
                    self.rotate_right(r, pivot)
                },
                Step::Zag(rt) => self.rotate_left(r, rt),
                Step::ZagZag(rt) => {
                    self.node_mut(rt).right = splayed;
                    let top = self.rotate_left(r, rt);
                    match splayed {
                        Some(s) => self.rotate_left(top, s),
                        None => top,
                    }
                },
                Step::ZagZig(rt) => {
                    self.node_mut(rt).left = splayed;
                    let pivot = match splayed {
                        Some(s) => {
                            let s = self.rotate_right(rt, s);
                            self.node_mut(r).right = Some(s);
                            s
                        },
                        None => rt,
                    };
                    self.rotate_left(r, pivot)
                },
            };
            splayed = Some(top);
        }

        self.path = path;
        // An empty path means the descent stopped at `root` itself.
        splayed.unwrap_or(root)
    }

    /// Rotates `x` right around its left child `y`; returns `y`.
    #[inline]
    fn rotate_right(&mut self, x: NodeId, y: NodeId) -> NodeId {
        debug_assert_eq!(self.node(x).left, Some(y));
        self.node_mut(x).left = self.node(y).right;
        self.node_mut(y).right = Some(x);

        #[cfg(feature = "metrics")]
        self.metrics.record_rotation();

        y
    }

    /// Rotates `x` left around its right child `y`; returns `y`.
    #[inline]
    fn rotate_left(&mut self, x: NodeId, y: NodeId) -> NodeId {
        debug_assert_eq!(self.node(x).right, Some(y));
        self.node_mut(x).right = self.node(y).left;
        self.node_mut(y).left = Some(x);

        #[cfg(feature = "metrics")]
        self.metrics.record_rotation();

        y
    }

    #[inline]
    fn alloc(&mut self, key: K, value: V, left: Option<NodeId>, right: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            key,
            value,
            left,
            right,
        });
        id
    }

    #[inline]
    fn node(&self, id: NodeId) -> &Node<K, V> {
        &self.nodes[id.0]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        &mut self.nodes[id.0]
    }
}

impl<K: Ord, V> Default for SplayTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V: Clone> MemoStore<K, V> for SplayTree<K, V> {
    fn lookup(&mut self, key: &K) -> Option<V> {
        self.find(key).cloned()
    }

    fn store(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn len(&self) -> usize {
        SplayTree::len(self)
    }
}

#[cfg(feature = "metrics")]
impl<K: Ord, V> SplayTree<K, V> {
    pub fn metrics_snapshot(&self) -> SplayMetricsSnapshot {
        SplayMetricsSnapshot {
            find_calls: self.metrics.find_calls,
            find_hits: self.metrics.find_hits,
            find_misses: self.metrics.find_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            splay_calls: self.metrics.splay_calls,
            rotations: self.metrics.rotations,
            clears: self.metrics.clears,
            tree_len: self.nodes.len(),
            tree_height: self.height(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<K: Ord, V> MetricsSnapshotProvider<SplayMetricsSnapshot> for SplayTree<K, V> {
    fn snapshot(&self) -> SplayMetricsSnapshot {
        self.metrics_snapshot()
    }
}

/// In-order iterator returned by [`SplayTree::iter`].
pub struct Iter<'a, K, V> {
    tree: &'a SplayTree<K, V>,
    stack: Vec<NodeId>,
}

impl<K, V> Iter<'_, K, V> {
    fn push_left_spine(&mut self, mut cursor: Option<NodeId>) {
        while let Some(id) = cursor {
            self.stack.push(id);
            cursor = self.tree.nodes[id.0].left;
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let tree = self.tree;
        let node = &tree.nodes[id.0];
        self.push_left_spine(node.right);
        Some((&node.key, &node.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn children(tree: &SplayTree<i32, i32>, key: i32) -> (Option<i32>, Option<i32>) {
        let node = tree.nodes.iter().find(|n| n.key == key).expect("key present");
        (
            node.left.map(|id| tree.nodes[id.0].key),
            node.right.map(|id| tree.nodes[id.0].key),
        )
    }

    #[test]
    fn empty_tree() {
        let mut tree: SplayTree<i32, &str> = SplayTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.find(&1), None);
        assert_eq!(tree.root_key(), None);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.iter().count(), 0);
        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn first_insert_becomes_root() {
        let mut tree = SplayTree::new();
        assert_eq!(tree.insert(42, "x"), None);
        assert_eq!(tree.root_key(), Some(&42));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.find(&42), Some(&"x"));
    }

    #[test]
    fn insert_smaller_key_adopts_root_as_right_child() {
        let mut tree = SplayTree::new();
        tree.insert(10, 10);
        tree.insert(20, 20);
        // 20 is root with 10 on its left
        tree.insert(15, 15);

        assert_eq!(tree.root_key(), Some(&15));
        assert_eq!(children(&tree, 15), (Some(10), Some(20)));
        assert_eq!(children(&tree, 20), (None, None));
        tree.check_invariants().unwrap();
    }

    #[test]
    fn ascending_inserts_build_left_spine() {
        let mut tree = SplayTree::new();
        for k in 1..=5 {
            tree.insert(k, k * 10);
            assert_eq!(tree.root_key(), Some(&k));
        }
        assert_eq!(tree.height(), 5);
        assert_eq!(children(&tree, 5), (Some(4), None));
        assert_eq!(children(&tree, 2), (Some(1), None));
    }

    #[test]
    fn zig_zig_find_on_left_spine() {
        let mut tree = SplayTree::new();
        for k in 1..=5 {
            tree.insert(k, k);
        }

        assert_eq!(tree.find(&1), Some(&1));
        assert_eq!(tree.root_key(), Some(&1));
        assert_eq!(children(&tree, 1), (None, Some(4)));
        assert_eq!(children(&tree, 4), (Some(2), Some(5)));
        assert_eq!(children(&tree, 2), (None, Some(3)));
        assert_eq!(tree.height(), 4);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn zig_zag_find() {
        let mut tree = SplayTree::new();
        for k in [50, 20, 40] {
            tree.insert(k, k);
        }
        // 40 root, 20 left, 50 right; bring 20 up then 50 back.
        assert_eq!(tree.find(&20), Some(&20));
        assert_eq!(tree.root_key(), Some(&20));
        assert_eq!(tree.find(&50), Some(&50));
        assert_eq!(tree.root_key(), Some(&50));
        tree.check_invariants().unwrap();
    }

    #[test]
    fn single_zig_when_key_is_root_child() {
        let mut tree = SplayTree::new();
        tree.insert(1, 1);
        tree.insert(2, 2);
        assert_eq!(children(&tree, 2), (Some(1), None));

        assert_eq!(tree.find(&1), Some(&1));
        assert_eq!(children(&tree, 1), (None, Some(2)));
    }

    #[test]
    fn missing_key_splays_nearest_node() {
        let mut tree = SplayTree::new();
        for k in [10, 20, 30, 40] {
            tree.insert(k, k);
        }
        assert_eq!(tree.find(&25), None);
        let root = *tree.root_key().unwrap();
        assert!(root == 20 || root == 30, "root {} should neighbour 25", root);
        assert_eq!(tree.len(), 4);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn update_keeps_size_and_replaces_value() {
        let mut tree = SplayTree::new();
        for k in 0..10 {
            tree.insert(k, k);
        }
        assert_eq!(tree.insert(3, 300), Some(3));
        assert_eq!(tree.len(), 10);
        assert_eq!(tree.root_key(), Some(&3));
        assert_eq!(tree.find(&3), Some(&300));
    }

    #[test]
    fn find_mut_changes_value_in_place() {
        let mut tree = SplayTree::new();
        tree.insert("b", 1);
        tree.insert("a", 2);
        *tree.find_mut(&"b").unwrap() += 40;
        assert_eq!(tree.find(&"b"), Some(&41));
        assert_eq!(tree.find_mut(&"z"), None);
    }

    #[test]
    fn contains_key_does_not_splay() {
        let mut tree = SplayTree::new();
        for k in 0..8 {
            tree.insert(k, ());
        }
        let before = tree.root_key().copied();
        assert!(tree.contains_key(&0));
        assert!(!tree.contains_key(&99));
        assert_eq!(tree.root_key().copied(), before);
    }

    #[test]
    fn deep_degenerate_tree_does_not_overflow_stack() {
        let mut tree = SplayTree::with_capacity(200_000);
        for k in 0..200_000u32 {
            tree.insert(k, k);
        }
        assert_eq!(tree.height(), 200_000);
        assert_eq!(tree.find(&0), Some(&0));
        assert!(tree.height() < 200_000);
        assert_eq!(tree.find(&199_999), Some(&199_999));
    }

    #[test]
    fn memo_store_lookup_clones_value() {
        let mut tree: SplayTree<u64, String> = SplayTree::new();
        MemoStore::store(&mut tree, 7, "seven".to_string());
        assert_eq!(tree.lookup(&7), Some("seven".to_string()));
        assert_eq!(tree.lookup(&8), None);
        assert_eq!(MemoStore::len(&tree), 1);
    }

    #[test]
    fn clear_resets_tree() {
        let mut tree = SplayTree::new();
        tree.insert(1, 1);
        tree.insert(2, 2);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.root_key(), None);
        tree.insert(3, 3);
        assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn check_invariants_detects_broken_order() {
        let mut tree = SplayTree::new();
        tree.insert(1, 1);
        tree.insert(2, 2);
        tree.nodes[0].key = 5;
        let err = tree.check_invariants().unwrap_err();
        assert!(err.message().contains("strictly increasing"));
    }

    #[test]
    fn check_invariants_detects_unreachable_node() {
        let mut tree = SplayTree::new();
        tree.insert(1, 1);
        tree.insert(2, 2);
        tree.node_mut(NodeId(1)).left = None;
        let err = tree.check_invariants().unwrap_err();
        assert!(err.message().contains("reachable"));
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn metrics_track_hits_misses_and_rotations() {
        let mut tree = SplayTree::new();
        for k in 1..=5 {
            tree.insert(k, k);
        }
        tree.find(&1);
        tree.find(&100);

        let snap = tree.metrics_snapshot();
        assert_eq!(snap.insert_new, 5);
        assert_eq!(snap.find_hits, 1);
        assert_eq!(snap.find_misses, 1);
        assert!(snap.rotations >= 4);
        assert_eq!(snap.tree_len, 5);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    #[derive(Debug, Clone)]
    enum Op {
        Insert(u16, u32),
        Find(u16),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u16..64, any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
            (0u16..64).prop_map(Op::Find),
        ]
    }

    /// Pointer-based recursive splay tree used as the shape oracle.
    #[derive(Debug)]
    struct RecNode {
        key: u16,
        value: u32,
        left: Option<Box<RecNode>>,
        right: Option<Box<RecNode>>,
    }

    impl RecNode {
        fn leaf(key: u16, value: u32) -> Box<Self> {
            Box::new(Self {
                key,
                value,
                left: None,
                right: None,
            })
        }
    }

    fn rec_rotate_right(mut x: Box<RecNode>) -> Box<RecNode> {
        let mut y = x.left.take().expect("rotate_right needs a left child");
        x.left = y.right.take();
        y.right = Some(x);
        y
    }

    fn rec_rotate_left(mut x: Box<RecNode>) -> Box<RecNode> {
        let mut y = x.right.take().expect("rotate_left needs a right child");
        x.right = y.left.take();
        y.left = Some(x);
        y
    }

    fn rec_splay(root: Option<Box<RecNode>>, key: u16) -> Option<Box<RecNode>> {
        let mut root = root?;
        if key == root.key {
            return Some(root);
        }
        if key < root.key {
            let Some(mut left) = root.left.take() else {
                return Some(root);
            };
            if key < left.key {
                left.left = rec_splay(left.left.take(), key);
                root.left = Some(left);
                root = rec_rotate_right(root);
            } else if key > left.key {
                left.right = rec_splay(left.right.take(), key);
                if left.right.is_some() {
                    left = rec_rotate_left(left);
                }
                root.left = Some(left);
            } else {
                root.left = Some(left);
            }
            Some(if root.left.is_none() { root } else { rec_rotate_right(root) })
        } else {
            let Some(mut right) = root.right.take() else {
                return Some(root);
            };
            if key < right.key {
                right.left = rec_splay(right.left.take(), key);
                if right.left.is_some() {
                    right = rec_rotate_right(right);
                }
                root.right = Some(right);
            } else if key > right.key {
                right.right = rec_splay(right.right.take(), key);
                root.right = Some(right);
                root = rec_rotate_left(root);
            } else {
                root.right = Some(right);
            }
            Some(if root.right.is_none() { root } else { rec_rotate_left(root) })
        }
    }

    fn rec_insert(root: &mut Option<Box<RecNode>>, key: u16, value: u32) {
        let Some(mut top) = rec_splay(root.take(), key) else {
            *root = Some(RecNode::leaf(key, value));
            return;
        };
        if top.key == key {
            top.value = value;
            *root = Some(top);
            return;
        }
        let mut node = RecNode::leaf(key, value);
        if key < top.key {
            node.left = top.left.take();
            node.right = Some(top);
        } else {
            node.right = top.right.take();
            node.left = Some(top);
        }
        *root = Some(node);
    }

    fn rec_find(root: &mut Option<Box<RecNode>>, key: u16) -> Option<u32> {
        *root = rec_splay(root.take(), key);
        root.as_ref().filter(|n| n.key == key).map(|n| n.value)
    }

    /// Pre-order walk with explicit holes, so equal walks mean equal shapes.
    fn rec_shape(node: &Option<Box<RecNode>>, out: &mut Vec<Option<(u16, u32)>>) {
        match node {
            Some(n) => {
                out.push(Some((n.key, n.value)));
                rec_shape(&n.left, out);
                rec_shape(&n.right, out);
            }
            None => out.push(None),
        }
    }

    fn arena_shape(
        tree: &SplayTree<u16, u32>,
        id: Option<NodeId>,
        out: &mut Vec<Option<(u16, u32)>>,
    ) {
        match id {
            Some(id) => {
                let node = tree.node(id);
                out.push(Some((node.key, node.value)));
                arena_shape(tree, node.left, out);
                arena_shape(tree, node.right, out);
            }
            None => out.push(None),
        }
    }

    fn shapes(
        tree: &SplayTree<u16, u32>,
        reference: &Option<Box<RecNode>>,
    ) -> (Vec<Option<(u16, u32)>>, Vec<Option<(u16, u32)>>) {
        let mut ours = Vec::new();
        arena_shape(tree, tree.root, &mut ours);
        let mut theirs = Vec::new();
        rec_shape(reference, &mut theirs);
        (ours, theirs)
    }

    proptest! {
        /// In-order traversal is strictly increasing after any insert sequence.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_inorder_sorted(keys in prop::collection::vec(any::<i32>(), 0..200)) {
            let mut tree = SplayTree::new();
            for k in &keys {
                tree.insert(*k, ());
            }
            let walked: Vec<i32> = tree.keys().copied().collect();
            let mut expected = keys.clone();
            expected.sort_unstable();
            expected.dedup();
            prop_assert_eq!(walked, expected);
            prop_assert!(tree.check_invariants().is_ok());
        }

        /// Tree agrees with a BTreeMap model; accessed present keys end at the root.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_matches_model_and_splays_to_root(
            ops in prop::collection::vec(op_strategy(), 0..300)
        ) {
            let mut tree = SplayTree::new();
            let mut model = BTreeMap::new();
            for op in ops {
                match op {
                    Op::Insert(k, v) => {
                        prop_assert_eq!(tree.insert(k, v), model.insert(k, v));
                        prop_assert_eq!(tree.root_key(), Some(&k));
                    }
                    Op::Find(k) => {
                        prop_assert_eq!(tree.find(&k).copied(), model.get(&k).copied());
                        if model.contains_key(&k) {
                            prop_assert_eq!(tree.root_key(), Some(&k));
                        }
                    }
                }
                prop_assert_eq!(tree.len(), model.len());
            }
            prop_assert!(tree.check_invariants().is_ok());
            let pairs: Vec<(u16, u32)> = tree.iter().map(|(k, v)| (*k, *v)).collect();
            let expected: Vec<(u16, u32)> = model.into_iter().collect();
            prop_assert_eq!(pairs, expected);
        }

        /// The iterative splay leaves exactly the same tree shape as the
        /// recursive pointer-based formulation after every operation.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_shape_matches_recursive_splay(
            ops in prop::collection::vec(op_strategy(), 0..400)
        ) {
            let mut tree = SplayTree::new();
            let mut reference: Option<Box<RecNode>> = None;
            for op in ops {
                match op {
                    Op::Insert(k, v) => {
                        tree.insert(k, v);
                        rec_insert(&mut reference, k, v);
                    }
                    Op::Find(k) => {
                        prop_assert_eq!(tree.find(&k).copied(), rec_find(&mut reference, k));
                    }
                }
                let (ours, theirs) = shapes(&tree, &reference);
                prop_assert_eq!(ours, theirs);
            }
        }
    }
}
