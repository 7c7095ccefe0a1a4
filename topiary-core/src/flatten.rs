//! Depth-ordered flattening of the labels seen during a walk.
//!
//! The walk visits nodes in pre-order, which interleaves branches at
//! different depths. Flattening filters and deduplicates the recorded nodes,
//! then stably sorts them by depth so the listing reads from the most general
//! group down while keeping left-to-right sibling order within a depth.

use std::collections::HashSet;

use crate::{
    table::TopicId,
    walk::{NodeKind, Visit},
};

const INDENT_UNIT: &str = "  ";

/// A node recorded during the walk.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRecord {
    /// Depth below the root.
    pub depth: usize,
    /// Display label (before separator substitution).
    pub label: String,
    /// Whether the node is an original topic.
    pub is_leaf: bool,
    /// Node identifier.
    pub id: TopicId,
    /// Distance at which the node merged into its parent.
    pub distance: f64,
}

/// Records [`Visit`] events for flattening. Pruned leaves are not recorded.
#[derive(Debug, Clone, Default)]
pub struct GroupCollector {
    records: Vec<GroupRecord>,
}

impl GroupCollector {
    /// Records `visit` unless it is a pruned leaf.
    pub fn push(&mut self, visit: &Visit<'_>) {
        let is_leaf = match visit.kind {
            NodeKind::Pruned => return,
            NodeKind::Leaf => true,
            NodeKind::Top | NodeKind::Internal => false,
        };
        self.records.push(GroupRecord {
            depth: visit.depth,
            label: visit.label.clone().into_owned(),
            is_leaf,
            id: visit.id,
            distance: visit.distance,
        });
    }

    /// Returns the records in traversal order.
    #[must_use]
    pub fn into_records(self) -> Vec<GroupRecord> {
        self.records
    }
}

/// Options controlling [`select_groups`] and [`format_groups`].
///
/// # Examples
/// ```
/// use topiary_core::FlattenOptions;
///
/// let options = FlattenOptions::default();
/// assert!(!options.include_leaves);
/// assert!(options.unique);
/// assert!(!options.indent_output);
/// assert_eq!(options.label_sep, "_");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenOptions {
    /// Keep leaf records.
    pub include_leaves: bool,
    /// Keep only the first record for each `(label, is_leaf)` pair.
    pub unique: bool,
    /// Indent each line by two spaces per depth level.
    pub indent_output: bool,
    /// Replacement for `_` in printed labels.
    pub label_sep: String,
}

impl Default for FlattenOptions {
    fn default() -> Self {
        Self {
            include_leaves: false,
            unique: true,
            indent_output: false,
            label_sep: "_".to_owned(),
        }
    }
}

/// Filters, deduplicates and depth-sorts `records`.
///
/// Deduplication keeps the earliest record in traversal order. The sort is
/// stable, so records at equal depth stay in traversal order.
#[must_use]
pub fn select_groups<'r>(
    records: &'r [GroupRecord],
    options: &FlattenOptions,
) -> Vec<&'r GroupRecord> {
    let mut seen: HashSet<(&str, bool)> = HashSet::new();
    let mut selected: Vec<&GroupRecord> = records
        .iter()
        .filter(|&record| options.include_leaves || !record.is_leaf)
        .filter(|&record| !options.unique || seen.insert((record.label.as_str(), record.is_leaf)))
        .collect();
    selected.sort_by_key(|record| record.depth);
    selected
}

/// Formats the selected records as a newline-joined listing.
///
/// # Examples
/// ```
/// use topiary_core::{FlattenOptions, GroupRecord, format_groups};
///
/// let records = vec![
///     GroupRecord { depth: 2, label: "deep_group".into(), is_leaf: false, id: 10, distance: 0.2 },
///     GroupRecord { depth: 1, label: "top_group".into(), is_leaf: false, id: 12, distance: 0.9 },
/// ];
/// let options = FlattenOptions {
///     indent_output: true,
///     label_sep: " ".into(),
///     ..FlattenOptions::default()
/// };
/// assert_eq!(format_groups(&records, &options), "  top group\n    deep group");
/// ```
#[must_use]
pub fn format_groups(records: &[GroupRecord], options: &FlattenOptions) -> String {
    select_groups(records, options)
        .into_iter()
        .map(|record| {
            let shown = record.label.replace('_', &options.label_sep);
            if options.indent_output {
                format!("{}{shown}", INDENT_UNIT.repeat(record.depth))
            } else {
                shown
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
