//! Merge table data model.
//!
//! A [`MergeTable`] is the flat record of an agglomerative clustering run:
//! each [`MergeRecord`] says which two nodes were combined into which parent
//! and at what dissimilarity. The table is read-only input; every structure
//! derived from it is rebuilt per invocation.

use std::sync::Arc;

/// Identifier of a topic or merged cluster.
pub type TopicId = i64;

/// One agglomerative merge event.
///
/// The child names are the display names produced at this merge step and are
/// authoritative for the ids they are paired with.
///
/// # Examples
/// ```
/// use topiary_core::MergeRecord;
///
/// let record = MergeRecord::new(10, 1, 2, "foo", "bar", 0.5);
/// assert_eq!(record.parent_id, 10);
/// assert_eq!(record.right_child_name, "bar");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MergeRecord {
    /// Identifier of the cluster produced by this merge.
    pub parent_id: TopicId,
    /// Identifier of the left child.
    pub left_child_id: TopicId,
    /// Identifier of the right child.
    pub right_child_id: TopicId,
    /// Display name of the left child.
    pub left_child_name: String,
    /// Display name of the right child.
    pub right_child_name: String,
    /// Dissimilarity at which the two children were merged.
    pub distance: f64,
}

impl MergeRecord {
    /// Creates a merge record.
    #[must_use]
    pub fn new(
        parent_id: TopicId,
        left_child_id: TopicId,
        right_child_id: TopicId,
        left_child_name: impl Into<String>,
        right_child_name: impl Into<String>,
        distance: f64,
    ) -> Self {
        Self {
            parent_id,
            left_child_id,
            right_child_id,
            left_child_name: left_child_name.into(),
            right_child_name: right_child_name.into(),
            distance,
        }
    }
}

/// Named, ordered collection of [`MergeRecord`]s.
///
/// Row order only matters as a tie-break: the first record mentioning a child
/// supplies its merge distance, and later names overwrite earlier ones.
///
/// # Examples
/// ```
/// use topiary_core::{MergeRecord, MergeTable};
///
/// let table = MergeTable::new("demo", vec![MergeRecord::new(10, 1, 2, "foo", "bar", 0.5)]);
/// assert_eq!(table.name(), "demo");
/// assert_eq!(table.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MergeTable {
    name: Arc<str>,
    records: Vec<MergeRecord>,
}

impl MergeTable {
    /// Creates a table from records in their upstream order.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, records: Vec<MergeRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    /// Returns the name used to identify the table in logs and errors.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn shared_name(&self) -> Arc<str> {
        Arc::clone(&self.name)
    }

    /// Returns the records in table order.
    #[must_use]
    pub fn records(&self) -> &[MergeRecord] {
        &self.records
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when the table holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
