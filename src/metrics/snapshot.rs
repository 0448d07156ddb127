#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SplayMetricsSnapshot {
    pub find_calls: u64,
    pub find_hits: u64,
    pub find_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,

    pub splay_calls: u64,
    pub rotations: u64,
    pub clears: u64,

    // gauges captured at snapshot time
    pub tree_len: usize,
    pub tree_height: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LruMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,

    pub evicted_entries: u64,
    pub removals: u64,
    pub invalidate_calls: u64,
    pub invalidated_entries: u64,
    pub clears: u64,

    // gauges captured at snapshot time
    pub cache_len: usize,
    pub capacity: usize,
}

impl LruMetricsSnapshot {
    /// Fraction of `get` calls that hit; `0.0` before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}
