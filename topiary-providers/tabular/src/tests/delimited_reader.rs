use std::io::Cursor;

use rstest::rstest;
use topiary_core::MergeRecord;
use topiary_test_support::{
    fixtures::{MergeRow, scenario_rows, to_delimited},
    tracing::RecordingLayer,
};
use tracing_subscriber::layer::SubscriberExt;

use super::{MergeTableProvider, TabularProviderError, support::*};

fn load(text: &str, delimiter: u8) -> Result<MergeTableProvider, TabularProviderError> {
    MergeTableProvider::try_from_delimited_reader("text", Cursor::new(text.to_owned()), delimiter)
}

#[rstest]
#[case::csv(b',')]
#[case::tsv(b'\t')]
fn reads_scenario(#[case] delimiter: u8) {
    let provider = load(&to_delimited(&scenario_rows(), delimiter), delimiter).expect("valid text");
    assert_eq!(provider.table().records(), scenario_records().as_slice());
}

#[rstest]
fn reads_quoted_names() {
    let rows = vec![MergeRow::new(10, 1, 2, "cats, dogs", "say \"hi\"", 0.25)];
    let provider = load(&to_delimited(&rows, b','), b',').expect("valid text");
    assert_eq!(
        provider.table().records(),
        &[MergeRecord::new(10, 1, 2, "cats, dogs", "say \"hi\"", 0.25)]
    );
}

#[rstest]
fn ignores_extra_columns_in_any_position() {
    let text = "Topics,Distance,Parent_ID,Parent_Name,Child_Left_ID,Child_Right_ID,Child_Left_Name,Child_Right_Name\n\
                \"[1, 2]\",0.5,10,foo_bar,1,2,foo,bar\n";
    let provider = load(text, b',').expect("valid text");
    assert_eq!(
        provider.table().records(),
        &[MergeRecord::new(10, 1, 2, "foo", "bar", 0.5)]
    );
}

#[rstest]
fn header_only_text_is_an_empty_table() {
    let provider = load(&to_delimited(&[], b','), b',').expect("valid text");
    assert!(provider.is_empty());
}

#[rstest]
fn missing_column_is_reported() {
    let text = "Parent_ID,Child_Left_ID,Child_Right_ID,Child_Left_Name,Child_Right_Name\n10,1,2,foo,bar\n";
    let err = load(text, b',').expect_err("Distance is missing");
    assert!(matches!(
        err,
        TabularProviderError::ColumnNotFound { ref column } if column == "Distance"
    ));
}

#[rstest]
fn empty_id_cell_is_a_null_value() {
    let text = "Parent_ID,Child_Left_ID,Child_Right_ID,Child_Left_Name,Child_Right_Name,Distance\n\
                10,1,2,foo,bar,0.5\n\
                11,,3,foo_bar,baz,0.8\n";
    let err = load(text, b',').expect_err("empty ids are rejected");
    assert!(matches!(
        err,
        TabularProviderError::NullValue { ref column, row: 1 } if column == "Child_Left_ID"
    ));
}

#[rstest]
fn unparsable_id_is_an_arrow_error() {
    let text = "Parent_ID,Child_Left_ID,Child_Right_ID,Child_Left_Name,Child_Right_Name,Distance\n\
                ten,1,2,foo,bar,0.5\n";
    let err = load(text, b',').expect_err("ids must be integers");
    assert!(matches!(err, TabularProviderError::Arrow(_)));
}

#[rstest]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = MergeTableProvider::try_from_delimited_path("gone", dir.path().join("gone.csv"), b',')
        .expect_err("file does not exist");
    assert!(matches!(err, TabularProviderError::Io(_)));
}

#[rstest]
fn records_loaded_rows_on_span() {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let text = to_delimited(&scenario_rows(), b'\t');
    let provider = tracing::subscriber::with_default(subscriber, || load(&text, b'\t'))
        .expect("valid text");
    assert_eq!(provider.len(), 2);

    let span = layer
        .span_named("providers.delimited")
        .expect("providers.delimited span must exist");
    assert_eq!(span.field("table"), Some("text"));
    assert_eq!(span.field("delimiter"), Some("\t"));
    assert_eq!(span.field("rows"), Some("2"));
    assert!(layer.has_event(tracing::Level::INFO, "merge table loaded"));
}
