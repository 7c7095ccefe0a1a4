//! ASCII rendering of walk events.

use crate::walk::{NodeKind, Visit};

/// First line of every rendered tree.
pub const ROOT_MARKER: &str = ".";
/// Glyph drawn before a leaf's label.
pub const LEAF_GLYPH: &str = "■──";
/// Line drawn in place of a leaf pruned by the distance threshold.
///
/// The line is exactly `O`; no trailing space is written after the marker.
pub const PRUNED_MARKER: &str = "O";
const TOPIC_SUFFIX: &str = " ── Topic: ";

/// Accumulates [`Visit`] events into the ASCII tree.
///
/// # Examples
/// ```
/// use topiary_core::{MergeRecord, MergeTable, TreeIndex, TreeRenderer, TreeWalk};
///
/// let table = MergeTable::new("demo", vec![MergeRecord::new(10, 1, 2, "foo", "bar", 0.5)]);
/// let index = TreeIndex::build(&table).expect("table is not empty");
/// let mut renderer = TreeRenderer::new();
/// for visit in TreeWalk::new(&index, 1.0, false) {
///     renderer.push(&visit);
/// }
/// assert_eq!(
///     renderer.finish(),
///     ".\n├─■──foo ── Topic: 1\n└─■──bar ── Topic: 2\n",
/// );
/// ```
#[derive(Debug, Clone)]
pub struct TreeRenderer {
    out: String,
}

impl Default for TreeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeRenderer {
    /// Creates a renderer holding only the root marker line.
    #[must_use]
    pub fn new() -> Self {
        let mut out = String::from(ROOT_MARKER);
        out.push('\n');
        Self { out }
    }

    /// Appends the line for `visit`.
    pub fn push(&mut self, visit: &Visit<'_>) {
        if visit.kind == NodeKind::Top && visit.label.is_empty() {
            return;
        }
        self.out.push_str(&visit.prefix);
        match visit.kind {
            NodeKind::Top | NodeKind::Internal => self.out.push_str(&visit.label),
            NodeKind::Leaf => {
                self.out.push_str(LEAF_GLYPH);
                self.out.push_str(&visit.label);
                self.out.push_str(TOPIC_SUFFIX);
                self.out.push_str(&visit.id.to_string());
            }
            NodeKind::Pruned => self.out.push_str(PRUNED_MARKER),
        }
        self.out.push('\n');
    }

    /// Returns the rendered tree.
    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::borrow::Cow;

    use rstest::rstest;

    fn visit(kind: NodeKind, label: &'static str) -> Visit<'static> {
        Visit {
            prefix: "│    └─".to_owned(),
            depth: 2,
            id: 7,
            label: Cow::Borrowed(label),
            distance: 0.5,
            kind,
        }
    }

    #[rstest]
    #[case::leaf(NodeKind::Leaf, "│    └─■──seven ── Topic: 7\n")]
    #[case::pruned(NodeKind::Pruned, "│    └─O\n")]
    #[case::internal(NodeKind::Internal, "│    └─seven\n")]
    fn formats_node_lines(#[case] kind: NodeKind, #[case] expected_line: &str) {
        let mut renderer = TreeRenderer::new();
        renderer.push(&visit(kind, "seven"));
        assert_eq!(renderer.finish(), format!(".\n{expected_line}"));
    }

    #[test]
    fn unnamed_top_adds_no_line() {
        let mut renderer = TreeRenderer::new();
        renderer.push(&Visit {
            prefix: String::new(),
            depth: 0,
            id: 11,
            label: Cow::Borrowed(""),
            distance: 10.0,
            kind: NodeKind::Top,
        });
        assert_eq!(renderer.finish(), ".\n");
    }
}
