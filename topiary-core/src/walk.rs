//! Single depth-first traversal of the implicit merge tree.
//!
//! [`TreeWalk`] yields one [`Visit`] per rendered node in pre-order. Both the
//! ASCII renderer and the group collector consume the same event stream, so
//! the tree and the flattened listing always agree on depth and ordering.
//!
//! The walk keeps an explicit stack; tree height is bounded by memory rather
//! than by the native call stack.

use std::borrow::Cow;

use tracing::warn;

use crate::{index::TreeIndex, table::TopicId};

/// Connector drawn before every child except the last.
pub const BRANCH: &str = "├─";
/// Connector drawn before the last child.
pub const TERMINAL: &str = "└─";
/// Indentation column continuing a branch past a non-last child.
pub const CONTINUATION: &str = "│";

const WIDE_BRANCH_WIDTH: usize = 4;
const TIGHT_BRANCH_WIDTH: usize = 1;

/// How a visited node is rendered and recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The root: the single top-level aggregated label.
    Top,
    /// An original topic merged below the pruning threshold.
    Leaf,
    /// An original topic merged at or above the pruning threshold.
    Pruned,
    /// A merged cluster other than the root.
    Internal,
}

/// One node visit emitted by [`TreeWalk`].
#[derive(Debug, Clone, PartialEq)]
pub struct Visit<'a> {
    /// Indentation plus connector glyph preceding the node's line.
    pub prefix: String,
    /// Depth below the root (the root is at depth `0`).
    pub depth: usize,
    /// Node identifier.
    pub id: TopicId,
    /// Resolved display label.
    pub label: Cow<'a, str>,
    /// Distance at which the node merged into its parent.
    pub distance: f64,
    /// Rendering classification.
    pub kind: NodeKind,
}

#[derive(Debug)]
struct Frame {
    id: TopicId,
    depth: usize,
    prefix: String,
    indent: String,
}

/// Pre-order iterator over the merge tree rooted at [`TreeIndex::root`].
///
/// # Examples
/// ```
/// use topiary_core::{MergeRecord, MergeTable, NodeKind, TreeIndex, TreeWalk};
///
/// let table = MergeTable::new("demo", vec![MergeRecord::new(10, 1, 2, "foo", "bar", 0.5)]);
/// let index = TreeIndex::build(&table).expect("table is not empty");
/// let kinds: Vec<NodeKind> = TreeWalk::new(&index, 1.0, false)
///     .map(|visit| visit.kind)
///     .collect();
/// assert_eq!(kinds, [NodeKind::Top, NodeKind::Leaf, NodeKind::Leaf]);
/// ```
#[derive(Debug)]
pub struct TreeWalk<'a> {
    index: &'a TreeIndex,
    max_distance: f64,
    branch_width: usize,
    stack: Vec<Frame>,
    path: Vec<TopicId>,
}

impl<'a> TreeWalk<'a> {
    /// Starts a walk at the root of `index`.
    ///
    /// Leaves whose merge distance is not below `max_distance` are reported
    /// as [`NodeKind::Pruned`]. `tight_layout` narrows branch indentation
    /// from four columns to one.
    #[must_use]
    pub fn new(index: &'a TreeIndex, max_distance: f64, tight_layout: bool) -> Self {
        let branch_width = if tight_layout {
            TIGHT_BRANCH_WIDTH
        } else {
            WIDE_BRANCH_WIDTH
        };
        Self {
            index,
            max_distance,
            branch_width,
            stack: vec![Frame {
                id: index.root(),
                depth: 0,
                prefix: String::new(),
                indent: String::new(),
            }],
            path: Vec::new(),
        }
    }

    fn classify(&self, frame: &Frame) -> (NodeKind, Cow<'a, str>) {
        let index = self.index;
        if frame.depth == 0 {
            // The table never lists the root as a child, so it is unnamed.
            let label = index.names().get(frame.id).unwrap_or_default();
            return (NodeKind::Top, Cow::Borrowed(label));
        }
        let label = index.label(frame.id);
        if !index.is_leaf(frame.id) {
            return (NodeKind::Internal, label);
        }
        if index.merge_distance(frame.id) < self.max_distance {
            (NodeKind::Leaf, label)
        } else {
            (NodeKind::Pruned, label)
        }
    }

    fn push_children(&mut self, frame: &Frame, left: TopicId, right: TopicId) {
        let depth = frame.depth + 1;
        let padding = " ".repeat(self.branch_width);
        self.stack.push(Frame {
            id: right,
            depth,
            prefix: format!("{}{TERMINAL}", frame.indent),
            indent: format!("{} {padding}", frame.indent),
        });
        self.stack.push(Frame {
            id: left,
            depth,
            prefix: format!("{}{BRANCH}", frame.indent),
            indent: format!("{}{CONTINUATION}{padding}", frame.indent),
        });
    }
}

impl<'a> Iterator for TreeWalk<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.stack.pop()?;
        self.path.truncate(frame.depth);
        let revisits_ancestor = self.path.contains(&frame.id);
        self.path.push(frame.id);

        let (kind, label) = self.classify(&frame);
        if revisits_ancestor {
            warn!(
                id = frame.id,
                depth = frame.depth,
                "merge table contains a cycle; treating node as a dead end"
            );
        } else if let Some((left, right)) = self.index.children(frame.id) {
            self.push_children(&frame, left, right);
        }

        Some(Visit {
            distance: self.index.merge_distance(frame.id),
            prefix: frame.prefix,
            depth: frame.depth,
            id: frame.id,
            label,
            kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::table::{MergeRecord, MergeTable};

    fn scenario_index() -> TreeIndex {
        let table = MergeTable::new(
            "scenario",
            vec![
                MergeRecord::new(10, 1, 2, "foo", "bar", 0.5),
                MergeRecord::new(11, 10, 3, "foo_bar", "baz", 0.8),
            ],
        );
        TreeIndex::build(&table).expect("index must build")
    }

    #[test]
    fn visits_in_pre_order_with_depths() {
        let index = scenario_index();
        let visits: Vec<(TopicId, usize, NodeKind)> = TreeWalk::new(&index, 1.0, false)
            .map(|visit| (visit.id, visit.depth, visit.kind))
            .collect();
        assert_eq!(
            visits,
            [
                (11, 0, NodeKind::Top),
                (10, 1, NodeKind::Internal),
                (1, 2, NodeKind::Leaf),
                (2, 2, NodeKind::Leaf),
                (3, 1, NodeKind::Leaf),
            ]
        );
    }

    #[test]
    fn builds_connector_prefixes() {
        let index = scenario_index();
        let prefixes: Vec<String> = TreeWalk::new(&index, 1.0, false)
            .map(|visit| visit.prefix)
            .collect();
        assert_eq!(prefixes, ["", "├─", "│    ├─", "│    └─", "└─"]);
    }

    #[test]
    fn tight_layout_narrows_indentation() {
        let index = scenario_index();
        let prefixes: Vec<String> = TreeWalk::new(&index, 1.0, true)
            .map(|visit| visit.prefix)
            .collect();
        assert_eq!(prefixes, ["", "├─", "│ ├─", "│ └─", "└─"]);
    }

    #[test]
    fn prunes_leaves_at_or_above_threshold() {
        let index = scenario_index();
        let pruned: Vec<TopicId> = TreeWalk::new(&index, 0.8, false)
            .filter(|visit| visit.kind == NodeKind::Pruned)
            .map(|visit| visit.id)
            .collect();
        assert_eq!(pruned, [3]);
    }

    #[test]
    fn root_is_unnamed() {
        let index = scenario_index();
        let top = TreeWalk::new(&index, 1.0, false)
            .next()
            .expect("walk yields the root");
        assert_eq!(top.label, "");
        assert!((top.distance - crate::FALLBACK_MERGE_DISTANCE).abs() < f64::EPSILON);
    }

    #[test]
    fn dangling_internal_ids_are_dead_ends() {
        let table = MergeTable::new(
            "dangling",
            vec![
                MergeRecord::new(10, 1, 2, "a", "b", 0.1),
                MergeRecord::new(12, 10, 11, "a_b", "ghost", 0.4),
            ],
        );
        let index = TreeIndex::build(&table).expect("index must build");
        let visits: Vec<(TopicId, NodeKind)> = TreeWalk::new(&index, 1.0, false)
            .map(|visit| (visit.id, visit.kind))
            .collect();
        assert_eq!(
            visits,
            [
                (12, NodeKind::Top),
                (10, NodeKind::Internal),
                (1, NodeKind::Leaf),
                (2, NodeKind::Leaf),
                (11, NodeKind::Internal),
            ]
        );
    }

    #[test]
    fn cycles_terminate() {
        // Node 1 merges its own ancestor 10.
        let table = MergeTable::new(
            "cyclic",
            vec![
                MergeRecord::new(10, 1, 2, "a", "b", 0.1),
                MergeRecord::new(1, 10, 3, "again", "c", 0.2),
            ],
        );
        let index = TreeIndex::build(&table).expect("index must build");
        let ids: Vec<TopicId> = TreeWalk::new(&index, 1.0, false)
            .map(|visit| visit.id)
            .collect();
        assert_eq!(ids, [10, 1, 10, 3, 2]);
    }
}
