//! Benchmark setup error type.
//!
//! Aggregates the errors that may arise while preparing benchmark inputs so
//! that setup functions can propagate failures with `?`.

use topiary_core::TopicTreeError;

use crate::synthetic::SyntheticError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic merge table generation failed.
    #[error("synthetic merge table generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// Topic tree configuration or walking failed.
    #[error("topic tree operation failed: {0}")]
    Tree(#[from] TopicTreeError),
}
