//! Query metrics
//!
//! - Counters only, monotonic
//! - Updated from finished worker results after the scan has joined, never
//!   from inside a worker

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

#[derive(Debug, Default)]
pub struct QueryMetrics {
    queries_executed: AtomicU64,
    queries_failed: AtomicU64,
    workers_spawned: AtomicU64,
    lineitems_scanned: AtomicU64,
    lineitems_admitted: AtomicU64,
}

impl QueryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_queries_executed(&self) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_queries_failed(&self) {
        self.queries_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_workers_spawned(&self, n: u64) {
        self.workers_spawned.fetch_add(n, Ordering::Relaxed);
    }

    /// Records one worker's scan counts
    pub fn record_scan(&self, scanned: u64, admitted: u64) {
        self.lineitems_scanned.fetch_add(scanned, Ordering::Relaxed);
        self.lineitems_admitted.fetch_add(admitted, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            queries_failed: self.queries_failed.load(Ordering::Relaxed),
            workers_spawned: self.workers_spawned.load(Ordering::Relaxed),
            lineitems_scanned: self.lineitems_scanned.load(Ordering::Relaxed),
            lineitems_admitted: self.lineitems_admitted.load(Ordering::Relaxed),
        }
    }

    /// Current counters as a JSON object
    pub fn to_json(&self) -> String {
        // A struct of plain integers always serializes
        serde_json::to_string(&self.snapshot()).unwrap_or_default()
    }
}

/// A point-in-time copy of all counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub queries_executed: u64,
    pub queries_failed: u64,
    pub workers_spawned: u64,
    pub lineitems_scanned: u64,
    pub lineitems_admitted: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_metrics_are_zero() {
        let metrics = QueryMetrics::new();
        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.queries_executed, 0);
        assert_eq!(snapshot.lineitems_scanned, 0);
    }

    #[test]
    fn test_record_scan_accumulates() {
        let metrics = QueryMetrics::new();
        metrics.record_scan(100, 7);
        metrics.record_scan(50, 3);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.lineitems_scanned, 150);
        assert_eq!(snapshot.lineitems_admitted, 10);
    }

    #[test]
    fn test_to_json() {
        let metrics = QueryMetrics::new();
        metrics.increment_queries_executed();
        metrics.add_workers_spawned(4);

        let parsed: serde_json::Value = serde_json::from_str(&metrics.to_json()).unwrap();
        assert_eq!(parsed["queries_executed"], 1);
        assert_eq!(parsed["workers_spawned"], 4);
        assert_eq!(parsed["queries_failed"], 0);
    }
}
