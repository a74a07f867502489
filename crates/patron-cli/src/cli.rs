//! Command-line interface definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};

/// Convert ragged customer exports into Symphony flat user records.
#[derive(Debug, Parser)]
#[command(name = "text2flat", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    #[command(flatten)]
    pub color: colorchoice_clap::Color,

    /// Explicit log level (overrides -v/-q)
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormatArg::Pretty)]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Identify columns, validate rows, and write flat user records
    Convert(ConvertArgs),
    /// Show the inferred column assignment for an input file
    Inspect(InspectArgs),
    /// List the field types the engine can identify
    Fields,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Input file (CSV, TSV, or delimited text)
    pub input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Run configuration file (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Flat layout file (JSON, defaults to the Symphony layout)
    #[arg(long, value_name = "FILE")]
    pub layout: Option<PathBuf>,

    /// Field delimiter (sniffed from the input when omitted)
    #[arg(short, long, value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// How to treat the first row
    #[arg(long, value_enum, default_value_t = HeaderArg::Auto)]
    pub header: HeaderArg,

    /// Column tracker profile
    #[arg(long, value_enum, default_value_t = ProfileArg::Default)]
    pub profile: ProfileArg,

    /// Also write records that were flagged for review
    #[arg(long)]
    pub include_review: bool,

    /// Identify and validate without writing output
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Input file (CSV, TSV, or delimited text)
    pub input: PathBuf,

    /// Run configuration file (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Field delimiter (sniffed from the input when omitted)
    #[arg(short, long, value_name = "CHAR")]
    pub delimiter: Option<char>,

    /// How to treat the first row
    #[arg(long, value_enum, default_value_t = HeaderArg::Auto)]
    pub header: HeaderArg,

    /// Column tracker profile
    #[arg(long, value_enum, default_value_t = ProfileArg::Default)]
    pub profile: ProfileArg,

    /// Emit the assignment as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log level argument for CLI.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Log format argument for CLI.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

/// First-row handling.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HeaderArg {
    /// Drop the first row when it looks like labels
    Auto,
    /// Always drop the first row
    Skip,
    /// Always keep the first row
    Keep,
}

/// Column tracker tuning profile.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProfileArg {
    /// Balanced thresholds
    Default,
    /// More evidence before a column is trusted
    Strict,
    /// Accept columns on thin evidence
    Relaxed,
}
