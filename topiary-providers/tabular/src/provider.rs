//! Merge-table provider backed by Parquet files or delimited text.
use std::{
    fs::File,
    io::{Read, Seek},
    path::Path,
    sync::Arc,
};

use arrow_array::{RecordBatch, RecordBatchReader};
use arrow_csv::{ReaderBuilder, reader::Format};
use arrow_schema::{ArrowError, Field, Schema, SchemaRef};
use parquet::arrow::{ProjectionMask, arrow_reader::ParquetRecordBatchReaderBuilder};
use parquet::file::reader::ChunkReader;
use tracing::{Span, field, info, instrument};

use topiary_core::{MergeRecord, MergeTable};

use crate::columns::{MERGE_COLUMNS, MergeColumns, delimited_type};
use crate::errors::TabularProviderError;

/// Loads a [`MergeTable`] from tabular storage.
///
/// Only the six merge columns are read. Extra columns, such as the
/// `Parent_Name` and `Topics` columns written by BERTopic, are ignored.
#[derive(Debug, Clone)]
pub struct MergeTableProvider {
    table: MergeTable,
}

impl MergeTableProvider {
    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.table.name()
    }

    /// Returns the number of merge records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns whether no merge records were read.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Borrows the loaded table.
    #[must_use]
    pub fn table(&self) -> &MergeTable {
        &self.table
    }

    /// Consumes the provider and returns the loaded table.
    #[must_use]
    pub fn into_table(self) -> MergeTable {
        self.table
    }

    /// Loads records from a single in-memory batch.
    pub fn try_from_record_batch(
        name: impl Into<String>,
        batch: &RecordBatch,
    ) -> Result<Self, TabularProviderError> {
        let columns = MergeColumns::resolve(&batch.schema())?;
        let mut records = Vec::with_capacity(batch.num_rows());
        columns.append_batch(batch, 0, &mut records)?;
        Ok(Self::from_records(name.into(), records))
    }

    /// Loads records from a Parquet file.
    pub fn try_from_parquet_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, TabularProviderError> {
        let file = File::open(path)?;
        Self::try_from_parquet_reader(name, file)
    }

    /// Loads records from a Parquet reader.
    pub fn try_from_parquet_reader<R>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, TabularProviderError>
    where
        R: ChunkReader + 'static,
    {
        read_parquet(name.into(), reader)
    }

    /// Loads records from a delimited text file with a header row.
    pub fn try_from_delimited_path(
        name: impl Into<String>,
        path: impl AsRef<Path>,
        delimiter: u8,
    ) -> Result<Self, TabularProviderError> {
        let file = File::open(path)?;
        Self::try_from_delimited_reader(name, file, delimiter)
    }

    /// Loads records from delimited text with a header row.
    ///
    /// The header decides which columns exist; the merge columns are then
    /// parsed with their proper types and every other column as text.
    pub fn try_from_delimited_reader<R>(
        name: impl Into<String>,
        reader: R,
        delimiter: u8,
    ) -> Result<Self, TabularProviderError>
    where
        R: Read + Seek,
    {
        read_delimited(name.into(), reader, delimiter)
    }

    fn from_records(name: String, records: Vec<MergeRecord>) -> Self {
        Self {
            table: MergeTable::new(name, records),
        }
    }
}

#[instrument(
    name = "providers.parquet",
    err,
    skip_all,
    fields(table = %name, rows = field::Empty),
)]
fn read_parquet<R>(name: String, reader: R) -> Result<MergeTableProvider, TabularProviderError>
where
    R: ChunkReader + 'static,
{
    let builder = ParquetRecordBatchReaderBuilder::try_new(reader)?;
    MergeColumns::resolve(builder.schema())?;
    let mask = ProjectionMask::columns(builder.parquet_schema(), MERGE_COLUMNS);
    let reader = builder.with_projection(mask).build()?;
    collect_batches(name, &reader.schema(), reader)
}

#[instrument(
    name = "providers.delimited",
    err,
    skip_all,
    fields(table = %name, delimiter = %char::from(delimiter), rows = field::Empty),
)]
fn read_delimited<R>(
    name: String,
    mut reader: R,
    delimiter: u8,
) -> Result<MergeTableProvider, TabularProviderError>
where
    R: Read + Seek,
{
    let format = Format::default()
        .with_header(true)
        .with_delimiter(delimiter);
    let (inferred, _) = format.infer_schema(&mut reader, Some(1))?;
    reader.rewind()?;
    let schema = Arc::new(typed_schema(&inferred));
    let batches = ReaderBuilder::new(Arc::clone(&schema))
        .with_format(format)
        .build(reader)?;
    collect_batches(name, &schema, batches)
}

/// Rebuilds `inferred` with merge columns typed for parsing.
fn typed_schema(inferred: &Schema) -> Schema {
    let fields: Vec<Field> = inferred
        .fields()
        .iter()
        .map(|field| Field::new(field.name(), delimited_type(field.name()), true))
        .collect();
    Schema::new(fields)
}

fn collect_batches<I>(
    name: String,
    schema: &SchemaRef,
    batches: I,
) -> Result<MergeTableProvider, TabularProviderError>
where
    I: IntoIterator<Item = Result<RecordBatch, ArrowError>>,
{
    let columns = MergeColumns::resolve(schema)?;
    let mut records = Vec::new();
    for batch in batches {
        let batch = batch?;
        columns.append_batch(&batch, records.len(), &mut records)?;
    }
    Span::current().record("rows", records.len());
    info!(rows = records.len(), "merge table loaded");
    Ok(MergeTableProvider::from_records(name, records))
}
