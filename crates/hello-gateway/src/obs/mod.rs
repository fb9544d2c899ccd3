//! Lightweight in-process metrics.
//!
//! Metrics are stored as atomics behind a registry handle that components
//! receive at construction, and rendered in Prometheus text format by the
//! `/metrics` handler.

pub mod http;
pub mod metrics;

pub use metrics::{Counter, CounterVec, MeterRegistry, MetricsRegistry};
