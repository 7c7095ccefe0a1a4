//! Builder utilities for configuring [`TopicTree`] instances.
//!
//! Every tunable is an explicit value carried by the built [`TopicTree`];
//! nothing is read from global state.

use crate::{Result, error::TopicTreeError, flatten::FlattenOptions, topic_tree::TopicTree};

/// Configures and constructs [`TopicTree`] instances.
///
/// # Examples
/// ```
/// use topiary_core::TopicTreeBuilder;
///
/// let tree = TopicTreeBuilder::new()
///     .with_max_distance(1.5)
///     .with_list_groups(true)
///     .with_label_sep(" ")
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(tree.max_distance(), Some(1.5));
/// assert!(tree.list_groups());
/// assert_eq!(tree.flatten_options().label_sep, " ");
/// ```
#[derive(Debug, Clone)]
pub struct TopicTreeBuilder {
    max_distance: Option<f64>,
    tight_layout: bool,
    list_groups: bool,
    flatten: FlattenOptions,
}

impl Default for TopicTreeBuilder {
    fn default() -> Self {
        Self {
            max_distance: None,
            tight_layout: false,
            list_groups: false,
            flatten: FlattenOptions::default(),
        }
    }
}

impl TopicTreeBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use topiary_core::TopicTreeBuilder;
    ///
    /// let builder = TopicTreeBuilder::new();
    /// assert_eq!(builder.max_distance(), None);
    /// assert!(!builder.tight_layout());
    /// assert!(!builder.list_groups());
    /// assert!(builder.unique());
    /// assert_eq!(builder.label_sep(), "_");
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pruning threshold. Leaves merged at or above it render as
    /// the pruning marker. Without a threshold nothing is pruned.
    #[must_use]
    pub fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = Some(max_distance);
        self
    }

    /// Returns the configured pruning threshold.
    #[must_use]
    pub const fn max_distance(&self) -> Option<f64> {
        self.max_distance
    }

    /// Selects one-column branch indentation instead of four.
    #[must_use]
    pub fn with_tight_layout(mut self, tight_layout: bool) -> Self {
        self.tight_layout = tight_layout;
        self
    }

    /// Returns whether the tight layout is selected.
    #[must_use]
    pub const fn tight_layout(&self) -> bool {
        self.tight_layout
    }

    /// Makes [`TopicTree::run`] return the flattened listing instead of the
    /// ASCII tree.
    #[must_use]
    pub fn with_list_groups(mut self, list_groups: bool) -> Self {
        self.list_groups = list_groups;
        self
    }

    /// Returns whether the flattened listing is selected.
    #[must_use]
    pub const fn list_groups(&self) -> bool {
        self.list_groups
    }

    /// Keeps leaf topics in the flattened listing.
    #[must_use]
    pub fn with_include_leaves(mut self, include_leaves: bool) -> Self {
        self.flatten.include_leaves = include_leaves;
        self
    }

    /// Returns whether leaves are listed.
    #[must_use]
    pub const fn include_leaves(&self) -> bool {
        self.flatten.include_leaves
    }

    /// Controls first-seen deduplication of listed labels.
    #[must_use]
    pub fn with_unique(mut self, unique: bool) -> Self {
        self.flatten.unique = unique;
        self
    }

    /// Returns whether listed labels are deduplicated.
    #[must_use]
    pub const fn unique(&self) -> bool {
        self.flatten.unique
    }

    /// Indents listed labels by depth.
    #[must_use]
    pub fn with_indent_output(mut self, indent_output: bool) -> Self {
        self.flatten.indent_output = indent_output;
        self
    }

    /// Returns whether listed labels are indented.
    #[must_use]
    pub const fn indent_output(&self) -> bool {
        self.flatten.indent_output
    }

    /// Sets the replacement for `_` in listed labels.
    #[must_use]
    pub fn with_label_sep(mut self, label_sep: impl Into<String>) -> Self {
        self.flatten.label_sep = label_sep.into();
        self
    }

    /// Returns the label separator.
    #[must_use]
    pub fn label_sep(&self) -> &str {
        &self.flatten.label_sep
    }

    /// Validates the configuration and constructs a [`TopicTree`].
    ///
    /// # Errors
    /// Returns [`TopicTreeError::InvalidMaxDistance`] when the pruning
    /// threshold is NaN.
    ///
    /// # Examples
    /// ```
    /// use topiary_core::{TopicTreeBuilder, TopicTreeError};
    ///
    /// let err = TopicTreeBuilder::new()
    ///     .with_max_distance(f64::NAN)
    ///     .build()
    ///     .expect_err("NaN thresholds are rejected");
    /// assert!(matches!(err, TopicTreeError::InvalidMaxDistance { .. }));
    /// ```
    pub fn build(self) -> Result<TopicTree> {
        if let Some(got) = self.max_distance.filter(|value| value.is_nan()) {
            return Err(TopicTreeError::InvalidMaxDistance { got });
        }
        Ok(TopicTree::new(
            self.max_distance,
            self.tight_layout,
            self.list_groups,
            self.flatten,
        ))
    }
}
