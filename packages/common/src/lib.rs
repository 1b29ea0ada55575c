//! Shared utilities: identifier generation and clock access.

pub mod id;

pub use id::*;
