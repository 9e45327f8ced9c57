//! Counters for the contact book server.
//!
//! Cheap atomic counters shared through `Arc`, plus a [`Timer`] that logs the
//! duration of an operation through `tracing`.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Process-wide counters, cloned into every component that reports.
#[derive(Debug, Clone, Default)]
pub struct MetricsTracker {
    requests_total: Arc<AtomicU64>,
    request_errors_total: Arc<AtomicU64>,
    index_rebuilds_total: Arc<AtomicU64>,
    search_queries_total: Arc<AtomicU64>,
    duplicates_rejected_total: Arc<AtomicU64>,
    dropped_rows_total: Arc<AtomicU64>,
}

/// Point-in-time copy of every counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub request_errors_total: u64,
    pub index_rebuilds_total: u64,
    pub search_queries_total: u64,
    pub duplicates_rejected_total: u64,
    pub dropped_rows_total: u64,
}

impl MetricsTracker {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a completed service operation.
    pub fn track_request(&self, operation: &str, duration_ms: u128, success: bool) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);

        if !success {
            self.request_errors_total.fetch_add(1, Ordering::Relaxed);
        }

        tracing::debug!(
            operation = %operation,
            duration_ms = duration_ms,
            success = success,
            "Request completed"
        );
    }

    /// Track one load of the store and the index rebuild that followed it.
    ///
    /// Malformed rows are skipped by the store; this is where they become visible.
    pub fn track_snapshot_load(&self, contacts: usize, dropped_rows: usize) {
        self.index_rebuilds_total.fetch_add(1, Ordering::Relaxed);

        if dropped_rows > 0 {
            self.dropped_rows_total
                .fetch_add(dropped_rows as u64, Ordering::Relaxed);
        }

        tracing::trace!(
            contacts = contacts,
            dropped_rows = dropped_rows,
            "Snapshot loaded"
        );
    }

    /// Track a search query.
    pub fn track_search_query(&self, duration_ms: u128, result_count: usize) {
        self.search_queries_total.fetch_add(1, Ordering::Relaxed);

        tracing::info!(
            duration_ms = duration_ms,
            result_count = result_count,
            "Search query completed"
        );
    }

    /// Track an add rejected because its email or phone already exists.
    pub fn track_duplicate_rejected(&self) {
        self.duplicates_rejected_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests_total(&self) -> u64 {
        self.requests_total.load(Ordering::Relaxed)
    }

    pub fn request_errors_total(&self) -> u64 {
        self.request_errors_total.load(Ordering::Relaxed)
    }

    pub fn index_rebuilds_total(&self) -> u64 {
        self.index_rebuilds_total.load(Ordering::Relaxed)
    }

    pub fn search_queries_total(&self) -> u64 {
        self.search_queries_total.load(Ordering::Relaxed)
    }

    pub fn duplicates_rejected_total(&self) -> u64 {
        self.duplicates_rejected_total.load(Ordering::Relaxed)
    }

    /// Total malformed rows skipped across all loads.
    pub fn dropped_rows_total(&self) -> u64 {
        self.dropped_rows_total.load(Ordering::Relaxed)
    }

    /// Get the request error rate (0.0 to 1.0).
    pub fn request_error_rate(&self) -> f64 {
        let errors = self.request_errors_total() as f64;
        let total = self.requests_total() as f64;

        if total == 0.0 {
            0.0
        } else {
            errors / total
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_total: self.requests_total(),
            request_errors_total: self.request_errors_total(),
            index_rebuilds_total: self.index_rebuilds_total(),
            search_queries_total: self.search_queries_total(),
            duplicates_rejected_total: self.duplicates_rejected_total(),
            dropped_rows_total: self.dropped_rows_total(),
        }
    }

    /// Human-readable summary of all counters, logged at shutdown.
    pub fn summary(&self) -> String {
        format!(
            "Metrics Summary:\n\
             Requests: {}\n\
             Request Errors: {} ({:.2}% error rate)\n\
             Index Rebuilds: {}\n\
             Search Queries: {}\n\
             Duplicates Rejected: {}\n\
             Dropped Rows: {}",
            self.requests_total(),
            self.request_errors_total(),
            self.request_error_rate() * 100.0,
            self.index_rebuilds_total(),
            self.search_queries_total(),
            self.duplicates_rejected_total(),
            self.dropped_rows_total(),
        )
    }
}

/// A timer for tracking operation duration.
pub struct Timer {
    start: Instant,
    operation: String,
}

impl Timer {
    /// Start a new timer for the given operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            operation: operation.into(),
        }
    }

    /// Milliseconds since the timer started.
    pub fn elapsed_ms(&self) -> u128 {
        self.start.elapsed().as_millis()
    }

    /// Finish the timer and return the elapsed time in milliseconds.
    pub fn finish(self) -> u128 {
        let duration_ms = self.elapsed_ms();

        tracing::debug!(
            operation = %self.operation,
            duration_ms = duration_ms,
            "Operation completed"
        );

        duration_ms
    }
}
