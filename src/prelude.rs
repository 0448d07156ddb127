pub use crate::builder::{MemoBuilder, MemoStrategy, MemoTable};
pub use crate::ds::{RecencyList, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError, RangeError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::{LruMetricsSnapshot, SplayMetricsSnapshot};
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::MetricsSnapshotProvider;
pub use crate::policy::lru::LruCache;
pub use crate::policy::splay::SplayTree;
pub use crate::policy::unbounded::UnboundedMemo;
pub use crate::traits::{MemoStore, RangeKey};
pub use crate::workload::range_sum::RangeSumIndex;
pub use crate::workload::sequence::{fibonacci, fibonacci_uncached};
