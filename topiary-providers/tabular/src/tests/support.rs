use std::sync::Arc;

use arrow_array::{
    ArrayRef, Float32Array, Int32Array, Int64Array, LargeStringArray, RecordBatch, StringArray,
};
use arrow_schema::{DataType, Field, Schema};
use bytes::Bytes;
use parquet::arrow::arrow_writer::ArrowWriter;
use topiary_core::MergeRecord;
use topiary_test_support::fixtures::{MergeRow, scenario_rows};

use crate::MERGE_COLUMNS;

pub(crate) fn scenario_records() -> Vec<MergeRecord> {
    scenario_rows().into_iter().map(to_record).collect()
}

pub(crate) fn to_record(row: MergeRow) -> MergeRecord {
    MergeRecord::new(
        row.parent_id,
        row.left_child_id,
        row.right_child_id,
        row.left_child_name,
        row.right_child_name,
        row.distance,
    )
}

/// The scenario table stored with narrower Arrow types.
pub(crate) fn narrow_batch() -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![
        Field::new(MERGE_COLUMNS[0], DataType::Int32, false),
        Field::new(MERGE_COLUMNS[1], DataType::Int32, false),
        Field::new(MERGE_COLUMNS[2], DataType::Int32, false),
        Field::new(MERGE_COLUMNS[3], DataType::LargeUtf8, false),
        Field::new(MERGE_COLUMNS[4], DataType::LargeUtf8, false),
        Field::new(MERGE_COLUMNS[5], DataType::Float32, false),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int32Array::from(vec![10, 11])),
        Arc::new(Int32Array::from(vec![1, 10])),
        Arc::new(Int32Array::from(vec![2, 3])),
        Arc::new(LargeStringArray::from(vec!["foo", "foo_bar"])),
        Arc::new(LargeStringArray::from(vec!["bar", "baz"])),
        Arc::new(Float32Array::from(vec![0.5, 0.75])),
    ];
    RecordBatch::try_new(schema, columns).expect("valid batch")
}

/// The scenario table with ids stored as text, as pandas writes them.
pub(crate) fn string_id_batch(parent_ids: [&str; 2]) -> RecordBatch {
    let schema = Arc::new(Schema::new(
        MERGE_COLUMNS
            .iter()
            .enumerate()
            .map(|(index, column)| {
                let data_type = if index == 5 {
                    DataType::Float64
                } else {
                    DataType::Utf8
                };
                Field::new(*column, data_type, false)
            })
            .collect::<Vec<_>>(),
    ));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(parent_ids.to_vec())),
        Arc::new(StringArray::from(vec!["1", "10"])),
        Arc::new(StringArray::from(vec!["2", "3"])),
        Arc::new(StringArray::from(vec!["foo", "foo_bar"])),
        Arc::new(StringArray::from(vec!["bar", "baz"])),
        Arc::new(arrow_array::Float64Array::from(vec![0.5, 0.8])),
    ];
    RecordBatch::try_new(schema, columns).expect("valid batch")
}

/// A two-row batch whose `Child_Right_Name` is null in the second row.
pub(crate) fn batch_with_null_name() -> RecordBatch {
    let schema = Arc::new(Schema::new(
        MERGE_COLUMNS
            .iter()
            .enumerate()
            .map(|(index, column)| {
                let data_type = match index {
                    3 | 4 => DataType::Utf8,
                    5 => DataType::Float64,
                    _ => DataType::Int64,
                };
                Field::new(*column, data_type, true)
            })
            .collect::<Vec<_>>(),
    ));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(vec![10, 11])),
        Arc::new(Int64Array::from(vec![1, 10])),
        Arc::new(Int64Array::from(vec![2, 3])),
        Arc::new(StringArray::from(vec![Some("foo"), Some("foo_bar")])),
        Arc::new(StringArray::from(vec![Some("bar"), None])),
        Arc::new(arrow_array::Float64Array::from(vec![0.5, 0.8])),
    ];
    RecordBatch::try_new(schema, columns).expect("valid batch")
}

/// Appends BERTopic's extra columns to `batch`.
pub(crate) fn with_extra_columns(batch: &RecordBatch) -> RecordBatch {
    let rows = batch.num_rows();
    let mut fields: Vec<Field> = batch
        .schema()
        .fields()
        .iter()
        .map(|field| field.as_ref().clone())
        .collect();
    fields.push(Field::new("Parent_Name", DataType::Utf8, false));
    fields.push(Field::new("Topics", DataType::Utf8, false));
    let mut columns = batch.columns().to_vec();
    columns.push(Arc::new(StringArray::from(vec!["parent"; rows])));
    columns.push(Arc::new(StringArray::from(vec!["[1, 2]"; rows])));
    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns).expect("valid batch")
}

pub(crate) fn parquet_bytes(batch: &RecordBatch) -> Bytes {
    let mut buffer = Vec::new();
    let mut writer =
        ArrowWriter::try_new(&mut buffer, batch.schema(), None).expect("create writer");
    writer.write(batch).expect("write batch");
    writer.close().expect("close writer");
    Bytes::from(buffer)
}
