//! Seeded synthetic merge tables for benchmarking.
//!
//! Tables follow the usual agglomerative convention: original topics take
//! ids `0..n` and each merge creates the next parent id, so the root is
//! `2n - 2`. Distances strictly increase with every merge.

use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom};
use topiary_core::{MergeRecord, MergeTable, TopicId};

const VOCABULARY: [&str; 12] = [
    "space", "nasa", "orbit", "rocket", "moon", "hockey", "team", "game", "season", "car",
    "engine", "dealer",
];

const WORDS_PER_LABEL: usize = 3;

/// Errors that may occur during synthetic table generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// Fewer than two topics were requested, so nothing can be merged.
    #[error("at least two topics are required, got {got}")]
    TooFewTopics {
        /// The requested topic count.
        got: usize,
    },
    /// The requested topic count cannot be expressed as topic ids.
    #[error("topic count {got} does not fit in the topic id range")]
    TopicCountOverflow {
        /// The requested topic count.
        got: usize,
    },
}

/// Order in which topics are merged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyntheticShape {
    /// Merge two randomly chosen active clusters at each step.
    Random,
    /// Merge every topic into one growing cluster, producing maximal depth.
    Chain,
    /// Pair clusters level by level, producing minimal depth.
    Balanced,
}

impl SyntheticShape {
    /// Every shape, in benchmark order.
    pub const ALL: [Self; 3] = [Self::Random, Self::Chain, Self::Balanced];

    /// Short name used in benchmark identifiers and table names.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Chain => "chain",
            Self::Balanced => "balanced",
        }
    }
}

/// Configuration for synthetic merge table generation.
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    /// Number of original topics.
    pub topic_count: usize,
    /// Merge order.
    pub shape: SyntheticShape,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Generates a merge table of `topic_count - 1` records.
///
/// # Errors
///
/// Returns [`SyntheticError::TooFewTopics`] when fewer than two topics are
/// requested, or [`SyntheticError::TopicCountOverflow`] when the parent ids
/// would not fit in a [`TopicId`].
///
/// # Examples
///
/// ```
/// use topiary_benches::synthetic::{SyntheticConfig, SyntheticShape, generate};
///
/// let config = SyntheticConfig { topic_count: 8, shape: SyntheticShape::Balanced, seed: 7 };
/// let table = generate(&config).expect("valid config");
/// assert_eq!(table.len(), 7);
/// ```
pub fn generate(config: &SyntheticConfig) -> Result<MergeTable, SyntheticError> {
    let got = config.topic_count;
    if got < 2 {
        return Err(SyntheticError::TooFewTopics { got });
    }
    let topics = TopicId::try_from(got)
        .ok()
        .filter(|topics| topics.checked_mul(2).is_some())
        .ok_or(SyntheticError::TopicCountOverflow { got })?;

    let mut log = MergeLog::new(topics, got, config.seed);
    let originals: Vec<TopicId> = (0..topics).collect();
    match config.shape {
        SyntheticShape::Random => log.merge_random(originals),
        SyntheticShape::Chain => log.merge_chain(originals),
        SyntheticShape::Balanced => log.merge_balanced(originals),
    }
    Ok(MergeTable::new(
        format!("synthetic-{}", config.shape.label()),
        log.records,
    ))
}

/// Accumulates merge records while handing out parent ids.
struct MergeLog {
    rng: SmallRng,
    next_parent: TopicId,
    distance: f64,
    records: Vec<MergeRecord>,
}

impl MergeLog {
    fn new(first_parent: TopicId, topic_count: usize, seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            next_parent: first_parent,
            distance: 0.0,
            records: Vec::with_capacity(topic_count.saturating_sub(1)),
        }
    }

    fn merge(&mut self, left: TopicId, right: TopicId) -> TopicId {
        let parent = self.next_parent;
        self.next_parent = parent.saturating_add(1);
        self.advance_distance();
        let left_name = self.label();
        let right_name = self.label();
        self.records.push(MergeRecord::new(
            parent,
            left,
            right,
            left_name,
            right_name,
            self.distance,
        ));
        parent
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "merge distances grow by a random positive step"
    )]
    fn advance_distance(&mut self) {
        self.distance += self.rng.gen_range(0.01..0.25);
    }

    fn label(&mut self) -> String {
        let words: Vec<&str> = VOCABULARY
            .choose_multiple(&mut self.rng, WORDS_PER_LABEL)
            .copied()
            .collect();
        words.join("_")
    }

    fn merge_random(&mut self, mut active: Vec<TopicId>) {
        while active.len() > 1 {
            let left = active.swap_remove(self.rng.gen_range(0..active.len()));
            let right = active.swap_remove(self.rng.gen_range(0..active.len()));
            let parent = self.merge(left, right);
            active.push(parent);
        }
    }

    fn merge_chain(&mut self, originals: Vec<TopicId>) {
        let mut topics = originals.into_iter();
        let Some(mut current) = topics.next() else {
            return;
        };
        for topic in topics {
            current = self.merge(current, topic);
        }
    }

    fn merge_balanced(&mut self, originals: Vec<TopicId>) {
        let mut level = originals;
        while level.len() > 1 {
            let mut next = Vec::with_capacity(level.len().div_ceil(2));
            let mut nodes = level.into_iter();
            while let Some(left) = nodes.next() {
                let node = match nodes.next() {
                    Some(right) => self.merge(left, right),
                    None => left,
                };
                next.push(node);
            }
            level = next;
        }
    }
}
