//! Observability for the contact book server.
//!
//! Counters for requests, searches, rebuilds, rejected duplicates and
//! malformed rows dropped on load, alongside structured `tracing` logs.

pub mod metrics;

pub use metrics::{MetricsSnapshot, MetricsTracker, Timer};
