//! Benchmark parameter types.

use std::fmt;

use crate::synthetic::SyntheticShape;

/// Parameters for a walk or listing benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct WalkBenchParams {
    /// Number of original topics in the generated table.
    pub topic_count: usize,
    /// Merge order used to generate the table.
    pub shape: SyntheticShape,
}

impl fmt::Display for WalkBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},n={}", self.shape.label(), self.topic_count)
    }
}
