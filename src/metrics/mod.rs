//! Operation counters for the memo stores (feature `metrics`).
//!
//! Recording, snapshotting and export are split into separate traits so the
//! stores only ever increment counters; readers take copies via
//! [`MetricsSnapshotProvider`](traits::MetricsSnapshotProvider).

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
