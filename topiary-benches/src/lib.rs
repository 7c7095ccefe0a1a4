//! Benchmark support crate for topiary.
//!
//! Provides seeded synthetic merge tables and parameter types used by the
//! Criterion benchmarks for tree walking and group listing.

pub mod error;
pub mod params;
pub mod synthetic;
