use crate::metrics::traits::{CoreMetricsRecorder, LruMetricsRecorder, SplayMetricsRecorder};

#[derive(Debug, Default)]
pub struct SplayMetrics {
    pub find_calls: u64,
    pub find_hits: u64,
    pub find_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub splay_calls: u64,
    pub rotations: u64,
    pub clears: u64,
}

impl CoreMetricsRecorder for SplayMetrics {
    fn record_get_hit(&mut self) {
        self.find_calls += 1;
        self.find_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.find_calls += 1;
        self.find_misses += 1;
    }

    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

impl SplayMetricsRecorder for SplayMetrics {
    fn record_splay_call(&mut self) {
        self.splay_calls += 1;
    }

    fn record_rotation(&mut self) {
        self.rotations += 1;
    }
}

#[derive(Debug, Default)]
pub struct LruMetrics {
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
}

impl CoreMetricsRecorder for LruMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

impl LruMetricsRecorder for LruMetrics {
    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_remove(&mut self) {
        self.removals += 1;
    }

    fn record_invalidate_call(&mut self) {
        self.invalidate_calls += 1;
    }

    fn record_invalidated_entries(&mut self, count: u64) {
        self.invalidated_entries += count;
    }
}
