//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};

#[derive(Debug, Parser)]
#[command(name = "strain", version, about = "Normalize influenza strain names")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Write logs to a file instead of stderr.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormatArg::Compact)]
    pub log_format: LogFormatArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Normalize one or more strain names.
    Normalize(NormalizeArgs),
    /// Parse a passage-history string.
    Passage(TextArgs),
    /// Extract a reassortant lineage code.
    Reassortant(TextArgs),
}

#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Names to normalize; stdin is read when none are given.
    pub names: Vec<String>,

    /// Read names from a file, one per line.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Skip passage extraction from leftover text.
    #[arg(long)]
    pub no_passage: bool,

    /// Emit a diagnostic for empty input names.
    #[arg(long)]
    pub warn_on_empty: bool,
}

#[derive(Debug, Args)]
pub struct TextArgs {
    /// Text to parse.
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned table plus a diagnostics listing.
    Table,
    /// One JSON object per record.
    Json,
    /// `raw -> canonical` lines.
    Line,
}
