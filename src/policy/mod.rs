//! Memo store strategies.
//!
//! - [`splay`]: self-adjusting BST, unbounded, recency-biased access cost.
//! - [`lru`]: fixed-capacity LRU cache with range invalidation.
//! - [`unbounded`]: plain hash-map baseline.

pub mod lru;
pub mod splay;
pub mod unbounded;
