//! Topiary core library.
//!
//! Reconstructs the binary merge tree implied by a table of agglomerative
//! merge records, renders it as an ASCII diagram with distance-based pruning,
//! and flattens its group labels into a depth-ordered listing.
//!
//! # Metrics
//!
//! When the `metrics` feature is enabled every walk emits:
//!
//! - `topic_tree_nodes_visited` (counter)
//! - `topic_tree_leaves_pruned` (counter)
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod error;
mod flatten;
mod index;
mod render;
mod table;
mod topic_tree;
mod walk;

pub use crate::{
    builder::TopicTreeBuilder,
    error::{Result, TopicTreeError, TopicTreeErrorCode},
    flatten::{FlattenOptions, GroupCollector, GroupRecord, format_groups, select_groups},
    index::{FALLBACK_MERGE_DISTANCE, MAX_LABEL_CHARS, NameTable, TreeIndex},
    render::{LEAF_GLYPH, PRUNED_MARKER, ROOT_MARKER, TreeRenderer},
    table::{MergeRecord, MergeTable, TopicId},
    topic_tree::{TopicTree, TreeReport},
    walk::{BRANCH, CONTINUATION, NodeKind, TERMINAL, TreeWalk, Visit},
};
