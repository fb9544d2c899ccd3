//! Built-in services.

pub mod greeting;

pub use greeting::GreetingService;
