//! Configured entry point that renders and flattens a merge table.
//!
//! A single [`TreeWalk`] feeds both the [`TreeRenderer`] and the
//! [`GroupCollector`], so the ASCII tree and the flattened listing are always
//! derived from the same traversal.

use tracing::{Span, field, info, instrument};

use crate::{
    Result,
    flatten::{FlattenOptions, GroupCollector, GroupRecord, format_groups},
    index::TreeIndex,
    render::TreeRenderer,
    table::MergeTable,
    walk::{NodeKind, TreeWalk},
};

/// Both artifacts of one walk over a merge table.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeReport {
    ascii_tree: String,
    records: Vec<GroupRecord>,
    max_distance: f64,
}

impl TreeReport {
    /// Returns the rendered ASCII tree.
    #[must_use]
    pub fn ascii_tree(&self) -> &str {
        &self.ascii_tree
    }

    /// Consumes the report and returns the ASCII tree.
    #[must_use]
    pub fn into_ascii_tree(self) -> String {
        self.ascii_tree
    }

    /// Returns the recorded nodes in traversal order. Pruned leaves are
    /// absent.
    #[must_use]
    pub fn records(&self) -> &[GroupRecord] {
        &self.records
    }

    /// Returns the pruning threshold the walk applied.
    #[must_use]
    pub const fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// Formats the flattened listing with `options`.
    #[must_use]
    pub fn groups(&self, options: &FlattenOptions) -> String {
        format_groups(&self.records, options)
    }
}

/// Renders merge tables as ASCII trees or depth-ordered group listings.
///
/// Construct instances through [`crate::TopicTreeBuilder`].
///
/// # Examples
/// ```
/// use topiary_core::{MergeRecord, MergeTable, TopicTreeBuilder};
///
/// let table = MergeTable::new(
///     "demo",
///     vec![
///         MergeRecord::new(10, 1, 2, "foo", "bar", 0.5),
///         MergeRecord::new(11, 10, 3, "foo_bar", "baz", 0.8),
///     ],
/// );
/// let tree = TopicTreeBuilder::new()
///     .with_max_distance(1.0)
///     .build()
///     .expect("configuration is valid");
/// let rendered = tree.run(&table).expect("table is not empty");
/// assert_eq!(
///     rendered,
///     ".\n├─foo_bar\n│    ├─■──foo ── Topic: 1\n│    └─■──bar ── Topic: 2\n└─■──baz ── Topic: 3\n",
/// );
/// ```
#[derive(Debug, Clone)]
pub struct TopicTree {
    max_distance: Option<f64>,
    tight_layout: bool,
    list_groups: bool,
    flatten: FlattenOptions,
}

impl TopicTree {
    pub(crate) const fn new(
        max_distance: Option<f64>,
        tight_layout: bool,
        list_groups: bool,
        flatten: FlattenOptions,
    ) -> Self {
        Self {
            max_distance,
            tight_layout,
            list_groups,
            flatten,
        }
    }

    /// Returns the configured pruning threshold, if any.
    #[must_use]
    pub const fn max_distance(&self) -> Option<f64> {
        self.max_distance
    }

    /// Returns whether the tight layout is selected.
    #[must_use]
    pub const fn tight_layout(&self) -> bool {
        self.tight_layout
    }

    /// Returns whether [`Self::run`] yields the flattened listing.
    #[must_use]
    pub const fn list_groups(&self) -> bool {
        self.list_groups
    }

    /// Returns the flattening options.
    #[must_use]
    pub const fn flatten_options(&self) -> &FlattenOptions {
        &self.flatten
    }

    /// Walks `table` once and returns both the ASCII tree and the recorded
    /// nodes.
    ///
    /// Without a configured threshold the walk uses the largest merge
    /// distance plus one, which prunes nothing.
    ///
    /// # Errors
    /// Returns [`crate::TopicTreeError::EmptyInput`] when `table` has no
    /// records.
    #[instrument(
        name = "core.walk",
        err,
        skip(self, table),
        fields(
            table = table.name(),
            records = table.len(),
            max_distance = field::Empty,
            tight_layout = self.tight_layout,
        ),
    )]
    pub fn walk(&self, table: &MergeTable) -> Result<TreeReport> {
        let index = TreeIndex::build(table)?;
        let max_distance = self
            .max_distance
            .unwrap_or_else(|| default_max_distance(&index));
        Span::current().record("max_distance", max_distance);

        let mut renderer = TreeRenderer::new();
        let mut collector = GroupCollector::default();
        let mut visited = 0_usize;
        let mut pruned = 0_usize;
        for visit in TreeWalk::new(&index, max_distance, self.tight_layout) {
            visited += 1;
            if visit.kind == NodeKind::Pruned {
                pruned += 1;
            }
            renderer.push(&visit);
            collector.push(&visit);
        }
        record_walk_metrics(visited, pruned);

        info!(visited, pruned, "topic tree walk completed");
        Ok(TreeReport {
            ascii_tree: renderer.finish(),
            records: collector.into_records(),
            max_distance,
        })
    }

    /// Returns the ASCII tree, or the flattened listing when
    /// [`Self::list_groups`] is set.
    ///
    /// # Errors
    /// Returns [`crate::TopicTreeError::EmptyInput`] when `table` has no
    /// records; nothing is rendered in either mode.
    #[instrument(
        name = "core.run",
        err,
        skip(self, table),
        fields(table = table.name(), list_groups = self.list_groups),
    )]
    pub fn run(&self, table: &MergeTable) -> Result<String> {
        let report = self.walk(table)?;
        if self.list_groups {
            Ok(report.groups(&self.flatten))
        } else {
            Ok(report.into_ascii_tree())
        }
    }
}

fn default_max_distance(index: &TreeIndex) -> f64 {
    index.max_merge_distance() + 1.0
}

#[cfg(feature = "metrics")]
fn record_walk_metrics(visited: usize, pruned: usize) {
    metrics::counter!("topic_tree_nodes_visited")
        .increment(u64::try_from(visited).unwrap_or(u64::MAX));
    metrics::counter!("topic_tree_leaves_pruned")
        .increment(u64::try_from(pruned).unwrap_or(u64::MAX));
}

#[cfg(not(feature = "metrics"))]
const fn record_walk_metrics(_visited: usize, _pruned: usize) {}
