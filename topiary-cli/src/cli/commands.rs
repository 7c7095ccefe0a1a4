//! Command implementations and argument parsing for the topiary CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use topiary_core::{MergeTable, TopicTree, TopicTreeBuilder, TopicTreeError};
use topiary_providers_tabular::{MergeTableProvider, TabularProviderError};
use tracing::{Span, field, info, instrument};

const DEFAULT_LABEL_SEP: &str = "_";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "topiary",
    about = "Render topic-model merge hierarchies as ASCII trees."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Render a merge table as an ASCII tree or a flattened group listing.
    Tree(TreeCommand),
}

/// Options accepted by the `tree` command.
#[derive(Debug, Args, Clone)]
pub struct TreeCommand {
    /// Rendering and listing options.
    #[command(flatten)]
    pub options: TreeOptions,

    /// Merge table location.
    #[command(subcommand)]
    pub source: TreeSource,
}

/// Rendering and listing options shared by every source.
#[derive(Debug, Args, Clone, PartialEq)]
pub struct TreeOptions {
    /// Leaves merged at or above this distance are drawn as `O`. Defaults to
    /// one more than the largest merge distance.
    #[arg(long = "max-distance")]
    pub max_distance: Option<f64>,

    /// Indent branches by one column instead of four.
    #[arg(long)]
    pub tight_layout: bool,

    /// Print the depth-ordered group listing instead of the tree.
    #[arg(long)]
    pub list_groups: bool,

    /// Include original topics in the group listing.
    #[arg(long)]
    pub include_leaves: bool,

    /// Keep repeated labels in the group listing.
    #[arg(long)]
    pub keep_duplicates: bool,

    /// Indent listed groups by depth.
    #[arg(long)]
    pub indent_output: bool,

    /// Replacement for `_` in listed labels.
    #[arg(long, default_value = DEFAULT_LABEL_SEP)]
    pub label_sep: String,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            max_distance: None,
            tight_layout: false,
            list_groups: false,
            include_leaves: false,
            keep_duplicates: false,
            indent_output: false,
            label_sep: DEFAULT_LABEL_SEP.to_owned(),
        }
    }
}

/// Storage formats a merge table can be loaded from.
#[derive(Debug, Subcommand, Clone)]
pub enum TreeSource {
    /// Load a Parquet file holding the merge columns.
    Parquet(SourceArgs),
    /// Load comma-separated text with a header row.
    Csv(SourceArgs),
    /// Load tab-separated text with a header row.
    Tsv(SourceArgs),
}

impl TreeSource {
    fn label(&self) -> &'static str {
        match self {
            Self::Parquet(_) => "parquet",
            Self::Csv(_) => "csv",
            Self::Tsv(_) => "tsv",
        }
    }
}

/// Arguments shared by every source.
#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    /// Path to the merge table.
    pub path: PathBuf,

    /// Override name for the table (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while opening an input table.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Tabular ingestion failed.
    #[error(transparent)]
    Tabular(#[from] TabularProviderError),
    /// Tree construction or rendering failed.
    #[error(transparent)]
    Core(#[from] TopicTreeError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionSummary {
    /// Name of the loaded merge table.
    pub table: String,
    /// Number of merge records read.
    pub records: usize,
    /// Rendered tree or group listing.
    pub output: String,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading or rendering fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use topiary_cli::cli::{Cli, Command, SourceArgs, TreeCommand, TreeOptions, TreeSource, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(
///     file.path(),
///     "Parent_ID,Child_Left_ID,Child_Right_ID,Child_Left_Name,Child_Right_Name,Distance\n\
///      10,1,2,foo,bar,0.5\n",
/// )?;
/// let cli = Cli {
///     command: Command::Tree(TreeCommand {
///         options: TreeOptions::default(),
///         source: TreeSource::Csv(SourceArgs {
///             path: file.path().to_path_buf(),
///             name: None,
///         }),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.output, ".\n├─■──foo ── Topic: 1\n└─■──bar ── Topic: 2\n");
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Tree(tree) => {
            Span::current().record("command", field::display("tree"));
            run_command(tree)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(source = command.source.label(), list_groups = command.options.list_groups),
)]
pub(super) fn run_command(command: TreeCommand) -> Result<ExecutionSummary, CliError> {
    let TreeCommand { options, source } = command;
    let topic_tree = build_tree(&options)?;
    let table = load_table(source)?;
    let output = topic_tree.run(&table)?;

    info!(
        table = table.name(),
        records = table.len(),
        "command completed"
    );
    Ok(ExecutionSummary {
        table: table.name().to_owned(),
        records: table.len(),
        output,
    })
}

pub(super) fn build_tree(options: &TreeOptions) -> Result<TopicTree, TopicTreeError> {
    let mut builder = TopicTreeBuilder::new()
        .with_tight_layout(options.tight_layout)
        .with_list_groups(options.list_groups)
        .with_include_leaves(options.include_leaves)
        .with_unique(!options.keep_duplicates)
        .with_indent_output(options.indent_output)
        .with_label_sep(options.label_sep.as_str());
    if let Some(max_distance) = options.max_distance {
        builder = builder.with_max_distance(max_distance);
    }
    builder.build()
}

#[instrument(
    name = "cli.load",
    err,
    skip(source),
    fields(path = field::Empty, override_name = field::Empty),
)]
pub(super) fn load_table(source: TreeSource) -> Result<MergeTable, CliError> {
    let (args, delimiter) = match source {
        TreeSource::Parquet(args) => (args, None),
        TreeSource::Csv(args) => (args, Some(b',')),
        TreeSource::Tsv(args) => (args, Some(b'\t')),
    };
    let SourceArgs { path, name } = args;
    let span = Span::current();
    span.record("path", field::display(path.display()));
    span.record(
        "override_name",
        field::display(name.as_deref().unwrap_or("<derived>")),
    );
    let chosen_name = derive_table_name(&path, name.as_deref());
    let file = open_input(&path)?;
    let provider = match delimiter {
        None => MergeTableProvider::try_from_parquet_reader(chosen_name, file)?,
        Some(delimiter) => MergeTableProvider::try_from_delimited_reader(
            chosen_name,
            BufReader::new(file),
            delimiter,
        )?,
    };
    Ok(provider.into_table())
}

fn open_input(path: &Path) -> Result<File, CliError> {
    File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(super) fn derive_table_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "merge_table".to_owned())
}

/// Writes the rendered output of `summary` to `writer`, ending it with a
/// newline.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use topiary_cli::cli::{ExecutionSummary, render_summary};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     table: "demo".into(),
///     records: 1,
///     output: "\n  foo bar".into(),
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer)?, "\n  foo bar\n");
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writer.write_all(summary.output.as_bytes())?;
    if !summary.output.ends_with('\n') {
        writeln!(writer)?;
    }
    Ok(())
}
