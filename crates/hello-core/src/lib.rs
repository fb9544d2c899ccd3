//! hellogate core: the greeting payload and the error surface shared by the
//! gateway and its tests.
//!
//! This crate carries no transport or runtime dependencies so the payload
//! contract can be checked in isolation.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. All fallible paths
//! surface as `HelloError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod greeting;

pub use error::{HelloError, Result};
pub use greeting::{GreetingResponse, DEFAULT_GREETING};
