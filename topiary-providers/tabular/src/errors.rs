use arrow_schema::{ArrowError, DataType};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TabularProviderError {
    #[error("column `{column}` not found in schema")]
    ColumnNotFound { column: String },
    #[error("column `{column}` must be one of {expected} but found {actual:?}")]
    InvalidColumnType {
        column: String,
        expected: &'static str,
        actual: DataType,
    },
    #[error("column `{column}` holds `{value}` at row {row}, which is not an integer id")]
    InvalidId {
        column: String,
        row: usize,
        value: String,
    },
    #[error("column `{column}` is null at row {row}")]
    NullValue { column: String, row: usize },
    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),
    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
