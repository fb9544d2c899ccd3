//! Policy layer.
//!
//! Cross-origin rules compiled from config once at startup and applied as
//! axum middleware.

pub mod cors;

pub use cors::CorsPolicy;
