pub(crate) use super::{MergeTableProvider, TabularProviderError};

mod delimited_reader;
mod support;
