//! CLI argument definitions for the labbook harness.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "labbook",
    version,
    about = "Interactive harness for the labbook record controller",
    long_about = "Drive the edit/selection state machine against an in-memory backend.\n\n\
                  Select rows, edit cells with optimistic validation, and watch the\n\
                  pending change-set submit, clear and reload exactly as the browser\n\
                  client would."
)]
pub struct Cli {
    /// Rows per page.
    #[arg(long = "page-size", value_name = "N", default_value_t = 10)]
    pub page_size: usize,

    /// JSON file overriding the client-side validation limits.
    #[arg(long = "limits", value_name = "PATH")]
    pub limits: Option<PathBuf>,

    /// JSON seed data: an array of records mapping field names to values.
    /// Without it a small sample dataset is loaded.
    #[arg(long = "data", value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
