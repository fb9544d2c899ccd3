//! Public HTTP API.

pub mod error;
pub mod hello;

pub use error::{not_found, ApiError};
