use std::sync::Arc;

use hello_core::GreetingResponse;

use crate::obs::{Counter, MeterRegistry};

pub const HELLO_COUNTER: &str = "app_hello_requests_total";
pub const HELLO_COUNTER_HELP: &str = "Total /api/hello requests";

/// Serves the fixed greeting and counts every call.
///
/// The counter is registered with the registry handed to `new`. If the
/// registry refuses it, the service keeps counting on a detached counter:
/// a metrics failure never blocks the greeting.
pub struct GreetingService {
    counter: Arc<Counter>,
    exported: bool,
    response: GreetingResponse,
}

impl GreetingService {
    pub fn new(registry: &dyn MeterRegistry, message: impl Into<String>) -> Self {
        let registered = registry.register_counter(HELLO_COUNTER, HELLO_COUNTER_HELP);
        let (counter, exported) = match registered {
            Ok(counter) => (counter, true),
            Err(e) => {
                tracing::warn!(
                    counter = HELLO_COUNTER,
                    error = %e,
                    "counter registration failed; not exported"
                );
                (Arc::new(Counter::default()), false)
            }
        };

        Self {
            counter,
            exported,
            response: GreetingResponse::new(message),
        }
    }

    pub fn greet(&self) -> GreetingResponse {
        let requests = self.counter.inc();
        tracing::debug!(requests, "greeting served");
        self.response.clone()
    }

    /// Calls to `greet` observed by this instance's counter.
    pub fn requests_served(&self) -> u64 {
        self.counter.get()
    }

    /// Whether the counter made it into the registry (false after a fail-open
    /// fallback).
    pub fn counter_exported(&self) -> bool {
        self.exported
    }
}
