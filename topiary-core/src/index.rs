//! Lookup structures derived from a [`MergeTable`].
//!
//! The tree is never materialised as linked nodes. Instead [`TreeIndex`]
//! keeps an adjacency map from parent id to its two children, a name table,
//! and the first-seen merge distance of every child, and the walk is a pure
//! function over those maps.

use std::{borrow::Cow, collections::HashMap};

use tracing::{debug, instrument, warn};

use crate::{
    Result,
    error::TopicTreeError,
    table::{MergeRecord, MergeTable, TopicId},
};

/// Distance reported for nodes that never appear as a child (the root, or
/// ids the table does not mention).
pub const FALLBACK_MERGE_DISTANCE: f64 = 10.0;

/// Maximum number of characters kept from a display name.
pub const MAX_LABEL_CHARS: usize = 100;

/// Mapping from node id to truncated display name.
///
/// Built by inserting every left child name in table order, then every right
/// child name in table order; later inserts win.
///
/// # Examples
/// ```
/// use topiary_core::{MergeRecord, NameTable};
///
/// let names = NameTable::from_records(&[
///     MergeRecord::new(10, 1, 2, "left", "right", 0.5),
///     MergeRecord::new(11, 2, 3, "renamed", "other", 0.7),
/// ]);
/// // Right-hand names are applied after all left-hand names.
/// assert_eq!(names.get(2), Some("right"));
/// assert_eq!(names.get(10), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameTable {
    names: HashMap<TopicId, String>,
}

impl NameTable {
    /// Builds the name table for `records`.
    #[must_use]
    pub fn from_records(records: &[MergeRecord]) -> Self {
        let mut names = HashMap::with_capacity(records.len().saturating_mul(2));
        for record in records {
            names.insert(record.left_child_id, truncate_label(&record.left_child_name));
        }
        for record in records {
            names.insert(
                record.right_child_id,
                truncate_label(&record.right_child_name),
            );
        }
        Self { names }
    }

    /// Returns the display name for `id`, if the table names it.
    #[must_use]
    pub fn get(&self, id: TopicId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// Returns the number of named ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` when no id is named.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn truncate_label(name: &str) -> String {
    name.chars().take(MAX_LABEL_CHARS).collect()
}

/// Index over a merge table used by [`crate::TreeWalk`].
///
/// # Examples
/// ```
/// use topiary_core::{MergeRecord, MergeTable, TreeIndex};
///
/// let table = MergeTable::new(
///     "demo",
///     vec![
///         MergeRecord::new(10, 1, 2, "foo", "bar", 0.5),
///         MergeRecord::new(11, 10, 3, "foo_bar", "baz", 0.8),
///     ],
/// );
/// let index = TreeIndex::build(&table).expect("table is not empty");
/// assert_eq!(index.root(), 11);
/// assert_eq!(index.max_original_topic(), 9);
/// assert_eq!(index.children(11), Some((10, 3)));
/// assert_eq!(index.merge_distance(10), 0.8);
/// ```
#[derive(Debug, Clone)]
pub struct TreeIndex {
    adjacency: HashMap<TopicId, (TopicId, TopicId)>,
    names: NameTable,
    distances: HashMap<TopicId, f64>,
    root: TopicId,
    max_original_topic: TopicId,
    max_merge_distance: f64,
}

impl TreeIndex {
    /// Builds the index for `table`.
    ///
    /// # Errors
    /// Returns [`TopicTreeError::EmptyInput`] when the table has no records.
    #[instrument(
        name = "core.index",
        err,
        skip(table),
        fields(table = table.name(), records = table.len()),
    )]
    pub fn build(table: &MergeTable) -> Result<Self> {
        let Some(first) = table.records().first() else {
            warn!("merge table is empty, returning error");
            return Err(TopicTreeError::EmptyInput {
                table: table.shared_name(),
            });
        };

        let mut root = first.parent_id;
        let mut min_parent = first.parent_id;
        let mut max_merge_distance = first.distance;
        let mut adjacency = HashMap::with_capacity(table.len());
        let mut distances = HashMap::with_capacity(table.len().saturating_mul(2));
        let mut repeated_parents = 0_usize;

        for record in table.records() {
            root = root.max(record.parent_id);
            min_parent = min_parent.min(record.parent_id);
            max_merge_distance = max_merge_distance.max(record.distance);
            if adjacency
                .insert(
                    record.parent_id,
                    (record.left_child_id, record.right_child_id),
                )
                .is_some()
            {
                repeated_parents += 1;
            }
            distances
                .entry(record.left_child_id)
                .or_insert(record.distance);
            distances
                .entry(record.right_child_id)
                .or_insert(record.distance);
        }

        if repeated_parents > 0 {
            warn!(
                repeated_parents,
                "merge table repeats parent ids; keeping the last record for each"
            );
        }

        let names = NameTable::from_records(table.records());
        let max_original_topic = min_parent.saturating_sub(1);
        debug!(
            root,
            max_original_topic,
            internal_nodes = adjacency.len(),
            named_nodes = names.len(),
            "merge table indexed"
        );

        Ok(Self {
            adjacency,
            names,
            distances,
            root,
            max_original_topic,
            max_merge_distance,
        })
    }

    /// Returns the root id (the largest parent id).
    #[must_use]
    pub const fn root(&self) -> TopicId {
        self.root
    }

    /// Returns the largest id still classified as an original topic.
    #[must_use]
    pub const fn max_original_topic(&self) -> TopicId {
        self.max_original_topic
    }

    /// Returns the largest merge distance in the table.
    #[must_use]
    pub const fn max_merge_distance(&self) -> f64 {
        self.max_merge_distance
    }

    /// Returns `true` when `id` is an original topic.
    ///
    /// Classification depends only on the id, even if a malformed table also
    /// lists it as a parent.
    #[must_use]
    pub const fn is_leaf(&self, id: TopicId) -> bool {
        id <= self.max_original_topic
    }

    /// Returns the `(left, right)` children of `id`, if it was merged.
    #[must_use]
    pub fn children(&self, id: TopicId) -> Option<(TopicId, TopicId)> {
        self.adjacency.get(&id).copied()
    }

    /// Returns the name table.
    #[must_use]
    pub const fn names(&self) -> &NameTable {
        &self.names
    }

    /// Returns the distance at which `id` was merged into its parent, or
    /// [`FALLBACK_MERGE_DISTANCE`] when no record lists it as a child.
    #[must_use]
    pub fn merge_distance(&self, id: TopicId) -> f64 {
        self.distances
            .get(&id)
            .copied()
            .unwrap_or(FALLBACK_MERGE_DISTANCE)
    }

    /// Returns the display label for `id`, falling back to its decimal form.
    #[must_use]
    pub fn label(&self, id: TopicId) -> Cow<'_, str> {
        self.names
            .get(id)
            .map_or_else(|| Cow::Owned(id.to_string()), Cow::Borrowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn scenario() -> MergeTable {
        MergeTable::new(
            "scenario",
            vec![
                MergeRecord::new(10, 1, 2, "foo", "bar", 0.5),
                MergeRecord::new(11, 10, 3, "foo_bar", "baz", 0.8),
            ],
        )
    }

    #[test]
    fn rejects_empty_tables() {
        let err = TreeIndex::build(&MergeTable::new("empty", Vec::new()))
            .expect_err("empty tables have no root");
        assert_eq!(
            err,
            TopicTreeError::EmptyInput {
                table: "empty".into()
            }
        );
    }

    #[test]
    fn derives_root_and_leaf_threshold() {
        let index = TreeIndex::build(&scenario()).expect("index must build");
        assert_eq!(index.root(), 11);
        assert_eq!(index.max_original_topic(), 9);
        assert!((index.max_merge_distance() - 0.8).abs() < f64::EPSILON);
        assert_eq!(index.children(11), Some((10, 3)));
        assert_eq!(index.children(10), Some((1, 2)));
        assert_eq!(index.children(3), None);
    }

    #[rstest]
    #[case::original(1, true)]
    #[case::threshold(9, true)]
    #[case::merged(10, false)]
    #[case::root(11, false)]
    #[case::negative(-1, true)]
    fn classifies_by_threshold_only(#[case] id: TopicId, #[case] expected: bool) {
        let index = TreeIndex::build(&scenario()).expect("index must build");
        assert_eq!(index.is_leaf(id), expected);
    }

    #[rstest]
    #[case::leaf(1, 0.5)]
    #[case::merged(10, 0.8)]
    #[case::root(11, FALLBACK_MERGE_DISTANCE)]
    #[case::unknown(42, FALLBACK_MERGE_DISTANCE)]
    fn looks_up_merge_distance(#[case] id: TopicId, #[case] expected: f64) {
        let index = TreeIndex::build(&scenario()).expect("index must build");
        assert!((index.merge_distance(id) - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn first_matching_record_supplies_distance() {
        let table = MergeTable::new(
            "duplicated-child",
            vec![
                MergeRecord::new(10, 1, 2, "a", "b", 0.25),
                MergeRecord::new(11, 2, 3, "b", "c", 0.75),
            ],
        );
        let index = TreeIndex::build(&table).expect("index must build");
        assert!((index.merge_distance(2) - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn later_parent_records_replace_earlier_children() {
        let table = MergeTable::new(
            "repeated-parent",
            vec![
                MergeRecord::new(10, 1, 2, "a", "b", 0.25),
                MergeRecord::new(10, 3, 4, "c", "d", 0.5),
            ],
        );
        let index = TreeIndex::build(&table).expect("index must build");
        assert_eq!(index.children(10), Some((3, 4)));
    }

    #[test]
    fn right_names_overwrite_left_names() {
        let names = NameTable::from_records(&[
            MergeRecord::new(10, 1, 2, "one", "two", 0.1),
            MergeRecord::new(11, 2, 1, "second-left", "second-right", 0.2),
        ]);
        assert_eq!(names.get(1), Some("second-right"));
        assert_eq!(names.get(2), Some("two"));
    }

    #[test]
    fn truncates_names_by_character() {
        let long = "é".repeat(MAX_LABEL_CHARS + 20);
        let names = NameTable::from_records(&[MergeRecord::new(5, 1, 2, long, "short", 0.1)]);
        let kept = names.get(1).expect("left child is named");
        assert_eq!(kept.chars().count(), MAX_LABEL_CHARS);
        assert_eq!(names.get(2), Some("short"));
    }

    #[test]
    fn label_falls_back_to_id() {
        let index = TreeIndex::build(&scenario()).expect("index must build");
        assert_eq!(index.label(3), "baz");
        assert_eq!(index.label(11), "11");
    }
}
