//! Small helpers shared across CLI tests.
//!
//! The CLI unit tests build temporary merge tables and assert error
//! handling. These helpers keep the cases concise.

use std::path::PathBuf;

use tempfile::TempDir;
use topiary_test_support::fixtures::{MergeRow, to_delimited, write_parquet};

use super::{Cli, CliError, Command, SourceArgs, TreeCommand, TreeOptions, TreeSource, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

/// Writes `rows` into `dir` in the format `source` expects and returns the
/// matching source.
pub(super) fn write_source(dir: &TempDir, kind: &str, rows: &[MergeRow]) -> TreeSource {
    let path = dir.path().join(format!("hierarchy.{kind}"));
    match kind {
        "parquet" => {
            write_parquet(rows, &path).expect("write parquet fixture");
            TreeSource::Parquet(source_args(path))
        }
        "csv" => {
            std::fs::write(&path, to_delimited(rows, b',')).expect("write csv fixture");
            TreeSource::Csv(source_args(path))
        }
        "tsv" => {
            std::fs::write(&path, to_delimited(rows, b'\t')).expect("write tsv fixture");
            TreeSource::Tsv(source_args(path))
        }
        other => panic!("unknown fixture kind `{other}`"),
    }
}

pub(super) fn source_args(path: PathBuf) -> SourceArgs {
    SourceArgs { path, name: None }
}

pub(super) fn tree_cli(options: TreeOptions, source: TreeSource) -> Cli {
    Cli {
        command: Command::Tree(TreeCommand { options, source }),
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
