#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;

use hello_core::error::{HelloError, Result};
use hello_core::DEFAULT_GREETING;
use hello_gateway::obs::{Counter, MeterRegistry, MetricsRegistry};
use hello_gateway::services::greeting::{GreetingService, HELLO_COUNTER, HELLO_COUNTER_HELP};

/// Registry whose backend is down.
struct BrokenRegistry;

impl MeterRegistry for BrokenRegistry {
    fn register_counter(&self, _name: &str, _help: &str) -> Result<Arc<Counter>> {
        Err(HelloError::Metrics("backend unavailable".into()))
    }
}

#[test]
fn registers_counter_at_construction() {
    let registry = MetricsRegistry::new();
    let svc = GreetingService::new(&registry, DEFAULT_GREETING);

    assert_eq!(registry.counter_value(HELLO_COUNTER), Some(0));
    assert_eq!(svc.requests_served(), 0);
    assert!(svc.counter_exported());

    let text = registry.render();
    assert!(text.contains(&format!("# HELP {HELLO_COUNTER} {HELLO_COUNTER_HELP}")));
    assert!(text.contains(&format!("# TYPE {HELLO_COUNTER} counter")));
    assert!(text.lines().any(|l| l == format!("{HELLO_COUNTER} 0")));
}

#[test]
fn sequential_calls_add_exactly_n() {
    let registry = MetricsRegistry::new();
    let svc = GreetingService::new(&registry, DEFAULT_GREETING);

    for n in [0u64, 1, 7, 50] {
        let before = svc.requests_served();
        for _ in 0..n {
            svc.greet();
        }
        assert_eq!(svc.requests_served(), before + n);
        assert_eq!(registry.counter_value(HELLO_COUNTER), Some(before + n));
    }
}

#[test]
fn concurrent_calls_lose_no_updates() {
    const THREADS: usize = 128;
    const CALLS: usize = 25;

    let registry = MetricsRegistry::new();
    let svc = Arc::new(GreetingService::new(&registry, DEFAULT_GREETING));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let svc = Arc::clone(&svc);
            thread::spawn(move || {
                for _ in 0..CALLS {
                    svc.greet();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let expected = (THREADS * CALLS) as u64;
    assert_eq!(svc.requests_served(), expected);
    assert_eq!(registry.counter_value(HELLO_COUNTER), Some(expected));
}

#[test]
fn every_response_is_identical() {
    let registry = MetricsRegistry::new();
    let svc = GreetingService::new(&registry, DEFAULT_GREETING);

    let first = serde_json::to_vec(&svc.greet()).unwrap();
    for _ in 0..49 {
        assert_eq!(serde_json::to_vec(&svc.greet()).unwrap(), first);
    }
    assert_eq!(first, br#"{"message":"Hello from Spring Boot on Cloud Foundry!"}"#);
}

#[test]
fn configured_message_is_served() {
    let registry = MetricsRegistry::new();
    let svc = GreetingService::new(&registry, "Hello from Rust");
    assert_eq!(svc.greet().message, "Hello from Rust");
}

#[test]
fn metrics_failure_does_not_block_greeting() {
    let svc = GreetingService::new(&BrokenRegistry, DEFAULT_GREETING);

    for _ in 0..3 {
        assert_eq!(svc.greet().message, DEFAULT_GREETING);
    }
    assert_eq!(svc.requests_served(), 3);
    assert!(!svc.counter_exported());
}

#[test]
fn conflicting_registration_falls_back_to_local_counter() {
    let registry = MetricsRegistry::new();
    let squatter = registry.register_counter(HELLO_COUNTER, "something else").unwrap();

    let svc = GreetingService::new(&registry, DEFAULT_GREETING);
    svc.greet();

    assert_eq!(svc.requests_served(), 1);
    assert_eq!(squatter.get(), 0);
}

#[test]
fn registry_rules() {
    let registry = MetricsRegistry::new();

    let a = registry.register_counter("jobs_total", "Jobs").unwrap();
    let b = registry.register_counter("jobs_total", "Jobs").unwrap();
    assert_eq!(a.inc(), 1);
    assert_eq!(b.inc(), 2);
    assert_eq!(a.add(3), 5);
    assert_eq!(b.get(), 5);

    assert!(registry.register_counter("jobs_total", "Other").is_err());
    assert!(registry.register_counter("bad name", "x").is_err());
    assert!(registry.register_counter("http_requests_total", "x").is_err());
}
