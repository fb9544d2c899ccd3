//! Top-level facade crate for hellogate.
//!
//! Re-exports core types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use hello_core::*;
}

pub mod gateway {
    pub use hello_gateway::*;
}
