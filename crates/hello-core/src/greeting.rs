//! Greeting payload returned by `GET /api/hello`.

use serde::{Deserialize, Serialize};

/// Greeting served when the configuration does not override it.
pub const DEFAULT_GREETING: &str = "Hello from Spring Boot on Cloud Foundry!";

/// Immutable `{"message": ...}` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreetingResponse {
    pub message: String,
}

impl GreetingResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl Default for GreetingResponse {
    fn default() -> Self {
        Self::new(DEFAULT_GREETING)
    }
}
