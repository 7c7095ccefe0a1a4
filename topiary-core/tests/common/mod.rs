//! Helpers shared by the topiary-core integration tests.
#![allow(dead_code)]

use std::path::PathBuf;

use serde::Deserialize;
use topiary_core::{MergeRecord, MergeTable};
use topiary_test_support::fixtures::MergeRow;

/// One row of a JSON fixture, using the column names of a BERTopic
/// hierarchy export.
#[derive(Debug, Deserialize)]
struct FixtureRow {
    #[serde(rename = "Parent_ID")]
    parent_id: i64,
    #[serde(rename = "Child_Left_ID")]
    left_child_id: i64,
    #[serde(rename = "Child_Right_ID")]
    right_child_id: i64,
    #[serde(rename = "Child_Left_Name")]
    left_child_name: String,
    #[serde(rename = "Child_Right_Name")]
    right_child_name: String,
    #[serde(rename = "Distance")]
    distance: f64,
}

/// Loads `tests/fixtures/<name>.json` into a merge table called `name`.
pub fn load_fixture(name: &str) -> MergeTable {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(format!("{name}.json"));
    let raw = std::fs::read_to_string(&path).expect("fixture must be readable");
    let rows: Vec<FixtureRow> = serde_json::from_str(&raw).expect("fixture must be valid JSON");
    let records = rows
        .into_iter()
        .map(|row| {
            MergeRecord::new(
                row.parent_id,
                row.left_child_id,
                row.right_child_id,
                row.left_child_name,
                row.right_child_name,
                row.distance,
            )
        })
        .collect();
    MergeTable::new(name, records)
}

/// Converts shared fixture rows into a merge table.
pub fn table_from_rows(name: &str, rows: Vec<MergeRow>) -> MergeTable {
    let records = rows
        .into_iter()
        .map(|row| {
            MergeRecord::new(
                row.parent_id,
                row.left_child_id,
                row.right_child_id,
                row.left_child_name,
                row.right_child_name,
                row.distance,
            )
        })
        .collect();
    MergeTable::new(name, records)
}
