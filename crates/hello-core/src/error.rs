//! Shared error type across hellogate crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed configuration.
    BadRequest,
    /// No route matched.
    NotFound,
    /// Refused by policy (e.g. CORS origin).
    Forbidden,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Metrics registry rejected an operation.
    Metrics,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::Forbidden => "FORBIDDEN",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Metrics => "METRICS",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, HelloError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum HelloError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("metrics: {0}")]
    Metrics(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl HelloError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            HelloError::BadRequest(_) => ClientCode::BadRequest,
            HelloError::NotFound(_) => ClientCode::NotFound,
            HelloError::Forbidden(_) => ClientCode::Forbidden,
            HelloError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            HelloError::Metrics(_) => ClientCode::Metrics,
            HelloError::Internal(_) => ClientCode::Internal,
        }
    }
}
