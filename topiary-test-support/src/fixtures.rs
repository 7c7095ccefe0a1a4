//! Merge-table fixtures shared by unit, integration and CLI tests.
//!
//! Rows are plain structs so this crate does not depend on `topiary-core`;
//! callers convert them into their own record type.

use std::{fs::File, io, path::Path, sync::Arc};

use arrow_array::{ArrayRef, Float64Array, Int64Array, RecordBatch, StringArray};
use arrow_schema::{ArrowError, DataType, Field, Schema};
use parquet::{arrow::ArrowWriter, errors::ParquetError};

/// Column headers in the order every fixture writes them.
pub const COLUMNS: [&str; 6] = [
    "Parent_ID",
    "Child_Left_ID",
    "Child_Right_ID",
    "Child_Left_Name",
    "Child_Right_Name",
    "Distance",
];

/// One merge of two children into a parent.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeRow {
    pub parent_id: i64,
    pub left_child_id: i64,
    pub right_child_id: i64,
    pub left_child_name: String,
    pub right_child_name: String,
    pub distance: f64,
}

impl MergeRow {
    /// Convenience constructor taking borrowed names.
    #[must_use]
    pub fn new(
        parent_id: i64,
        left_child_id: i64,
        right_child_id: i64,
        left_child_name: &str,
        right_child_name: &str,
        distance: f64,
    ) -> Self {
        Self {
            parent_id,
            left_child_id,
            right_child_id,
            left_child_name: left_child_name.to_owned(),
            right_child_name: right_child_name.to_owned(),
            distance,
        }
    }
}

/// The two-merge table used throughout the documentation.
///
/// Topics 1 and 2 merge into 10 at 0.5; 10 and topic 3 merge into the root
/// 11 at 0.8.
#[must_use]
pub fn scenario_rows() -> Vec<MergeRow> {
    vec![
        MergeRow::new(10, 1, 2, "foo", "bar", 0.5),
        MergeRow::new(11, 10, 3, "foo_bar", "baz", 0.8),
    ]
}

/// A caterpillar tree over `topics` original topics.
///
/// Topics 1 and 2 merge first; every later merge joins the previous group
/// with the next topic, so the tree is `topics - 1` levels deep. Distances
/// grow with each merge. Returns no rows for fewer than two topics.
#[must_use]
pub fn chain_rows(topics: i64) -> Vec<MergeRow> {
    if topics < 2 {
        return Vec::new();
    }
    let mut rows = Vec::new();
    let mut previous = (1, topic_name(1));
    for step in 1..topics {
        let parent = topics + step;
        let right = step + 1;
        let row = MergeRow {
            parent_id: parent,
            left_child_id: previous.0,
            right_child_id: right,
            left_child_name: previous.1,
            right_child_name: topic_name(right),
            distance: step as f64,
        };
        previous = (parent, group_name(parent));
        rows.push(row);
    }
    rows
}

/// A balanced tree over `topics` original topics.
///
/// Nodes are paired level by level; an odd node out is carried to the next
/// level. Every merge on level `n` happens at distance `n`. Returns no rows
/// for fewer than two topics.
#[must_use]
pub fn balanced_rows(topics: i64) -> Vec<MergeRow> {
    if topics < 2 {
        return Vec::new();
    }
    let mut rows = Vec::new();
    let mut level: Vec<(i64, String)> = (1..=topics).map(|id| (id, topic_name(id))).collect();
    let mut next_parent = topics + 1;
    let mut distance = 1.0;
    while level.len() > 1 {
        let mut next_level = Vec::with_capacity(level.len().div_ceil(2));
        let mut nodes = level.into_iter();
        while let Some(left) = nodes.next() {
            let Some(right) = nodes.next() else {
                next_level.push(left);
                break;
            };
            rows.push(MergeRow {
                parent_id: next_parent,
                left_child_id: left.0,
                right_child_id: right.0,
                left_child_name: left.1,
                right_child_name: right.1,
                distance,
            });
            next_level.push((next_parent, group_name(next_parent)));
            next_parent += 1;
        }
        level = next_level;
        distance += 1.0;
    }
    rows
}

fn topic_name(id: i64) -> String {
    format!("topic{id}")
}

fn group_name(id: i64) -> String {
    format!("group{id}")
}

/// Serializes `rows` as delimited text with a header row.
///
/// Fields containing the delimiter, a quote or a newline are quoted.
///
/// # Examples
/// ```
/// use topiary_test_support::fixtures::{scenario_rows, to_delimited};
///
/// let text = to_delimited(&scenario_rows(), b',');
/// assert!(text.starts_with("Parent_ID,Child_Left_ID,"));
/// assert!(text.ends_with("11,10,3,foo_bar,baz,0.8\n"));
/// ```
#[must_use]
pub fn to_delimited(rows: &[MergeRow], delimiter: u8) -> String {
    let separator = char::from(delimiter).to_string();
    let mut out = COLUMNS.join(&separator);
    out.push('\n');
    for row in rows {
        let fields = [
            row.parent_id.to_string(),
            row.left_child_id.to_string(),
            row.right_child_id.to_string(),
            quote(&row.left_child_name, delimiter),
            quote(&row.right_child_name, delimiter),
            row.distance.to_string(),
        ];
        out.push_str(&fields.join(&separator));
        out.push('\n');
    }
    out
}

fn quote(field: &str, delimiter: u8) -> String {
    let needs_quotes = field
        .chars()
        .any(|c| c == char::from(delimiter) || c == '"' || c == '\n');
    if needs_quotes {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

/// Errors raised while writing a Parquet fixture.
#[derive(Debug, thiserror::Error)]
pub enum ParquetFixtureError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
    #[error("parquet error: {0}")]
    Parquet(#[from] ParquetError),
}

/// Builds a record batch with `Int64` ids, `Utf8` names and a `Float64`
/// distance.
///
/// # Errors
/// Returns an [`ArrowError`] if the columns do not match the schema.
pub fn to_record_batch(rows: &[MergeRow]) -> Result<RecordBatch, ArrowError> {
    let schema = Arc::new(Schema::new(vec![
        Field::new(COLUMNS[0], DataType::Int64, false),
        Field::new(COLUMNS[1], DataType::Int64, false),
        Field::new(COLUMNS[2], DataType::Int64, false),
        Field::new(COLUMNS[3], DataType::Utf8, false),
        Field::new(COLUMNS[4], DataType::Utf8, false),
        Field::new(COLUMNS[5], DataType::Float64, false),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.parent_id))),
        Arc::new(Int64Array::from_iter_values(
            rows.iter().map(|r| r.left_child_id),
        )),
        Arc::new(Int64Array::from_iter_values(
            rows.iter().map(|r| r.right_child_id),
        )),
        Arc::new(StringArray::from_iter_values(
            rows.iter().map(|r| r.left_child_name.as_str()),
        )),
        Arc::new(StringArray::from_iter_values(
            rows.iter().map(|r| r.right_child_name.as_str()),
        )),
        Arc::new(Float64Array::from_iter_values(
            rows.iter().map(|r| r.distance),
        )),
    ];
    RecordBatch::try_new(schema, columns)
}

/// Writes `rows` to a Parquet file at `path`.
///
/// # Errors
/// Returns a [`ParquetFixtureError`] if the file cannot be created or
/// written.
pub fn write_parquet(rows: &[MergeRow], path: &Path) -> Result<(), ParquetFixtureError> {
    let batch = to_record_batch(rows)?;
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}
