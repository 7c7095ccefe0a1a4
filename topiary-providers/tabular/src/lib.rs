//! Tabular providers that load merge tables from Parquet and delimited text.

mod columns;
mod errors;
mod provider;

pub use columns::{
    DISTANCE, LEFT_CHILD_ID, LEFT_CHILD_NAME, MERGE_COLUMNS, PARENT_ID, RIGHT_CHILD_ID,
    RIGHT_CHILD_NAME,
};
pub use errors::TabularProviderError;
pub use provider::MergeTableProvider;

#[cfg(test)]
mod tests;
