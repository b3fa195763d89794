//! CLI argument definitions for the income dashboard.

use std::path::PathBuf;

use clap::builder::TypedValueParser;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use income_analysis::{DEFAULT_BINS, MAX_BINS, MIN_BINS};
use income_ingest::EncodingCandidate;

/// Dataset opened when no file is given.
pub const DEFAULT_DATASET: &str = "국세청_근로소득 백분위(천분위) 자료_20241231.csv";

#[derive(Parser)]
#[command(
    name = "income-dash",
    version,
    about = "Earned income statistics dashboard for the terminal",
    long_about = "Load an income percentile table and show its summary statistics.\n\n\
                  The file encoding is detected by trying utf-8-sig, cp949, euc-kr\n\
                  and utf-8 in that order."
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
    /// Load a table and show metrics, statistics and a histogram.
    Show(ShowArgs),

    /// List the candidate encodings in the order they are tried.
    Encodings,
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Path to the comma-delimited statistics file.
    #[arg(value_name = "FILE", default_value = DEFAULT_DATASET)]
    pub file: PathBuf,

    /// Numeric column to build the histogram for (default: first numeric column).
    #[arg(long = "column", value_name = "NAME")]
    pub column: Option<String>,

    /// Encoding to try instead of the default order; repeat to try several.
    #[arg(long = "encoding", value_name = "NAME", value_parser = parse_encoding)]
    pub encodings: Vec<EncodingCandidate>,

    /// Number of histogram buckets.
    #[arg(
        long = "bins",
        default_value_t = DEFAULT_BINS,
        value_parser = clap::value_parser!(u16).range(MIN_BINS as i64..=MAX_BINS as i64).map(usize::from)
    )]
    pub bins: usize,

    /// Add a kernel density estimate for each bucket.
    #[arg(long = "kde")]
    pub kde: bool,

    /// Print the first N rows of the table.
    #[arg(long = "preview", value_name = "N")]
    pub preview: Option<usize>,

    /// Output format for the report.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

fn parse_encoding(value: &str) -> Result<EncodingCandidate, String> {
    EncodingCandidate::from_label(value).ok_or_else(|| {
        format!("unknown encoding '{value}' (expected utf-8-sig, cp949, euc-kr or utf-8)")
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
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
