//! memokit: memoization stores over ordered key spaces.
//!
//! Two interchangeable strategies live under [`policy`]:
//!
//! - [`SplayTree`](policy::splay::SplayTree): self-adjusting BST that moves
//!   every accessed key to the root.
//! - [`LruCache`](policy::lru::LruCache): capacity-bounded LRU cache with
//!   invalidation of interval keys covering a mutated index.
//!
//! The [`workload`] module contains the two consumers they were built for:
//! a memoized numeric sequence and a cached range-sum index.

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;
pub mod traits;
pub mod workload;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
