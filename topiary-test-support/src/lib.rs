//! Shared test utilities used across topiary crates.

pub mod fixtures;
pub mod property;
pub mod tracing;
