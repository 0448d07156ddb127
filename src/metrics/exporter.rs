use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::{LruMetricsSnapshot, SplayMetricsSnapshot};
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for memo store snapshots.
///
/// Writes the Prometheus text exposition format so the output can be scraped
/// directly or forwarded to a collector. Write failures are dropped.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_sample(&self, kind: &str, name: &str, value: u64) {
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_counter(&self, suffix: &str, value: u64) {
        self.write_sample("counter", &self.metric_name(suffix), value);
    }

    fn write_gauge(&self, suffix: &str, value: u64) {
        self.write_sample("gauge", &self.metric_name(suffix), value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<SplayMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &SplayMetricsSnapshot) {
        self.write_counter("find_calls_total", snapshot.find_calls);
        self.write_counter("find_hits_total", snapshot.find_hits);
        self.write_counter("find_misses_total", snapshot.find_misses);
        self.write_counter("insert_calls_total", snapshot.insert_calls);
        self.write_counter("insert_updates_total", snapshot.insert_updates);
        self.write_counter("insert_new_total", snapshot.insert_new);
        self.write_counter("splay_calls_total", snapshot.splay_calls);
        self.write_counter("rotations_total", snapshot.rotations);
        self.write_counter("clears_total", snapshot.clears);
        self.write_gauge("tree_len", snapshot.tree_len as u64);
        self.write_gauge("tree_height", snapshot.tree_height as u64);
    }
}

impl<W: Write + Send> MetricsExporter<LruMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &LruMetricsSnapshot) {
        self.write_counter("get_calls_total", snapshot.get_calls);
        self.write_counter("get_hits_total", snapshot.get_hits);
        self.write_counter("get_misses_total", snapshot.get_misses);
        self.write_counter("insert_calls_total", snapshot.insert_calls);
        self.write_counter("insert_updates_total", snapshot.insert_updates);
        self.write_counter("insert_new_total", snapshot.insert_new);
        self.write_counter("evicted_entries_total", snapshot.evicted_entries);
        self.write_counter("removals_total", snapshot.removals);
        self.write_counter("invalidate_calls_total", snapshot.invalidate_calls);
        self.write_counter("invalidated_entries_total", snapshot.invalidated_entries);
        self.write_counter("clears_total", snapshot.clears);
        self.write_gauge("cache_len", snapshot.cache_len as u64);
        self.write_gauge("capacity", snapshot.capacity as u64);
    }
}
