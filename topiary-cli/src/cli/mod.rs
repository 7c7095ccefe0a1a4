//! Command-line interface orchestration for topiary.
//!
//! The `tree` command loads a merge table from Parquet, CSV or TSV and
//! prints either the ASCII tree or the flattened group listing.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, SourceArgs, TreeCommand, TreeOptions, TreeSource,
    render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
