//! CLI argument definitions for codefinder.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use codefinder_core::SourceKind;

#[derive(Parser)]
#[command(
    name = "codefinder",
    version,
    about = "Look up institution and department codes",
    long_about = "Look up institution and department codes.\n\n\
                  Pick a country or department, optionally narrow by state or\n\
                  sub-department and by name, then copy the matching code."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the categories and sub-categories of a data source.
    Categories(SourceArgs),

    /// Filter a data source once and print the matches.
    Lookup(LookupArgs),

    /// Filter a data source interactively, one command per line.
    Browse(SourceArgs),
}

#[derive(Args)]
pub struct SourceArgs {
    /// Data source shape.
    #[arg(value_enum, value_name = "SOURCE")]
    pub source: SourceArg,

    /// Data file path or http(s) URL; repeat for multi-file sources.
    ///
    /// Defaults to the standard file names under the data directory.
    #[arg(long = "data", value_name = "LOCATION")]
    pub data: Vec<String>,

    /// Directory holding the data files (default: $CODEFINDER_DATA_DIR or ./data).
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Ignore HTTP(S)_PROXY settings when fetching URLs.
    #[arg(long = "no-proxy")]
    pub no_proxy: bool,
}

#[derive(Args)]
pub struct LookupArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Category id (country code, country name or department).
    #[arg(long = "category", short = 'c')]
    pub category: Option<String>,

    /// Sub-category id (state or sub-department).
    #[arg(long = "sub-category", short = 's')]
    pub sub_category: Option<String>,

    /// Case-insensitive name filter.
    #[arg(long = "query")]
    pub query: Option<String>,

    /// Copy the code of this row (1-based) to the clipboard.
    #[arg(long = "copy", value_name = "ROW")]
    pub copy: Option<usize>,

    /// Seconds to keep serving a copied code before exiting (Linux only;
    /// ends early when another program takes the clipboard).
    #[arg(
        long = "copy-hold",
        value_name = "SECONDS",
        default_value_t = 10,
        requires = "copy"
    )]
    pub copy_hold: u64,

    /// Print matches as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

/// CLI data source choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum SourceArg {
    Institutions,
    Departments,
    Sponsors,
}

impl From<SourceArg> for SourceKind {
    fn from(value: SourceArg) -> Self {
        match value {
            SourceArg::Institutions => SourceKind::Institutions,
            SourceArg::Departments => SourceKind::Departments,
            SourceArg::Sponsors => SourceKind::Sponsors,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
