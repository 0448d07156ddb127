//! # Metrics Trait Hierarchy
//!
//! ```text
//!                 ┌─────────────────────────────┐
//!                 │     CoreMetricsRecorder     │
//!                 │  get_hit/get_miss/insert    │
//!                 │  clear                      │
//!                 └──────────────┬──────────────┘
//!                                │
//!                ┌───────────────┴───────────────┐
//!                ▼                               ▼
//!     ┌─────────────────────┐         ┌─────────────────────┐
//!     │ SplayMetricsRecorder│         │  LruMetricsRecorder │
//!     │ splay/rotation      │         │ evict/invalidate    │
//!     └─────────────────────┘         └─────────────────────┘
//!
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Counters shared by both stores.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_clear(&mut self);
}

/// Structural work done by the splay tree.
pub trait SplayMetricsRecorder: CoreMetricsRecorder {
    fn record_splay_call(&mut self);
    fn record_rotation(&mut self);
}

/// Recency-cache removals.
pub trait LruMetricsRecorder: CoreMetricsRecorder {
    fn record_evicted_entry(&mut self);
    fn record_remove(&mut self);
    fn record_invalidate_call(&mut self);
    /// Adds `count` entries removed by a single invalidation sweep.
    fn record_invalidated_entries(&mut self, count: u64);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Export/publish metrics to monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
