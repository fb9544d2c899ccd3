//! Minimal metrics registry for the gateway.
//!
//! Named counters are registered once and handed out as `Arc<Counter>`; the
//! registry keeps a clone so it can render current values. Labelled counters
//! use `CounterVec`, keyed by sorted label pairs for deterministic output.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use hello_core::error::{HelloError, Result};

const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
const DRAINING: &str = "hello_draining";

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// `[a-zA-Z_:][a-zA-Z0-9_:]*`
fn valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

/// Capability to register counters. Components take this at construction and
/// never own the registry behind it.
pub trait MeterRegistry: Send + Sync {
    fn register_counter(&self, name: &str, help: &str) -> Result<Arc<Counter>>;
}

/// Monotonic counter.
#[derive(Debug, Default)]
pub struct Counter {
    value: AtomicU64,
}

impl Counter {
    /// Increment by 1, returning the value this increment produced.
    pub fn inc(&self) -> u64 {
        self.add(1)
    }

    /// Increment by an arbitrary value, returning the new value.
    pub fn add(&self, v: u64) -> u64 {
        self.value.fetch_add(v, Ordering::Relaxed) + v
    }

    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self.map.entry(label_key(labels)).or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for one label set (0 if never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, name: &str, help: &str, out: &mut String) {
        let _ = writeln!(out, "# HELP {} {}", name, escape_help(help));
        let _ = writeln!(out, "# TYPE {} counter", name);

        let mut rows: Vec<(String, u64)> = self
            .map
            .iter()
            .map(|r| {
                let label_str = r
                    .key()
                    .iter()
                    .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                    .collect::<Vec<_>>()
                    .join(",");
                (label_str, r.value().load(Ordering::Relaxed))
            })
            .collect();
        rows.sort();

        for (label_str, val) in rows {
            let _ = writeln!(out, "{}{{{}}} {}", name, label_str, val);
        }
    }
}

fn label_key(labels: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut key: Vec<(String, String)> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

struct Registered {
    help: String,
    counter: Arc<Counter>,
}

/// Process-wide registry rendered by `/metrics`.
#[derive(Default)]
pub struct MetricsRegistry {
    counters: DashMap<String, Registered>,
    /// Requests per `method`, matched `route`, and response `status`.
    pub http_requests: CounterVec,
    draining: AtomicBool,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark draining state.
    pub fn set_draining(&self) {
        self.draining.store(true, Ordering::Relaxed);
    }

    /// Return whether draining is active.
    pub fn is_draining(&self) -> bool {
        self.draining.load(Ordering::Relaxed)
    }

    /// Look up a registered counter's current value.
    pub fn counter_value(&self, name: &str) -> Option<u64> {
        self.counters.get(name).map(|r| r.counter.get())
    }

    /// Render all registered metrics, sorted by name.
    pub fn render(&self) -> String {
        let mut out = String::new();

        let mut named: Vec<(String, String, u64)> = self
            .counters
            .iter()
            .map(|r| (r.key().clone(), r.value().help.clone(), r.value().counter.get()))
            .collect();
        named.sort();

        for (name, help, val) in named {
            let _ = writeln!(out, "# HELP {} {}", name, escape_help(&help));
            let _ = writeln!(out, "# TYPE {} counter", name);
            let _ = writeln!(out, "{} {}", name, val);
        }

        self.http_requests.render(
            HTTP_REQUESTS_TOTAL,
            "Total HTTP requests by route and status",
            &mut out,
        );

        let _ = writeln!(out, "# HELP {} 1 while the server is shutting down", DRAINING);
        let _ = writeln!(out, "# TYPE {} gauge", DRAINING);
        let _ = writeln!(out, "{} {}", DRAINING, if self.is_draining() { 1 } else { 0 });
        out
    }
}

impl MeterRegistry for MetricsRegistry {
    /// Idempotent for an identical `(name, help)` pair; a conflicting help
    /// string or a built-in name is rejected.
    fn register_counter(&self, name: &str, help: &str) -> Result<Arc<Counter>> {
        if !valid_metric_name(name) {
            return Err(HelloError::Metrics(format!("invalid metric name: {name:?}")));
        }
        if name == HTTP_REQUESTS_TOTAL || name == DRAINING {
            return Err(HelloError::Metrics(format!("metric name is reserved: {name}")));
        }

        match self.counters.entry(name.to_string()) {
            Entry::Occupied(e) => {
                let existing = e.get();
                if existing.help == help {
                    Ok(Arc::clone(&existing.counter))
                } else {
                    Err(HelloError::Metrics(format!(
                        "counter {name} already registered with help {:?}",
                        existing.help
                    )))
                }
            }
            Entry::Vacant(e) => {
                let counter = Arc::new(Counter::default());
                e.insert(Registered {
                    help: help.to_string(),
                    counter: Arc::clone(&counter),
                });
                Ok(counter)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn metric_names() {
        assert!(valid_metric_name("app_hello_requests_total"));
        assert!(valid_metric_name("ns:sub_total"));
        assert!(!valid_metric_name(""));
        assert!(!valid_metric_name("9lives"));
        assert!(!valid_metric_name("has-dash"));
    }

    #[test]
    fn concurrent_increments_observe_distinct_values() {
        let c = Arc::new(Counter::default());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let c = Arc::clone(&c);
                std::thread::spawn(move || (0..500).map(|_| c.inc()).collect::<Vec<_>>())
            })
            .collect();

        let mut seen: Vec<u64> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
        seen.sort_unstable();
        assert_eq!(seen, (1..=4000).collect::<Vec<u64>>());
    }

    #[test]
    fn counter_vec_sorts_label_keys() {
        let v = CounterVec::default();
        v.inc(&[("b", "2"), ("a", "1")]);
        v.inc(&[("a", "1"), ("b", "2")]);
        assert_eq!(v.get(&[("a", "1"), ("b", "2")]), 2);

        let mut out = String::new();
        v.render("x_total", "x", &mut out);
        assert!(out.contains("x_total{a=\"1\",b=\"2\"} 2"));
    }
}
