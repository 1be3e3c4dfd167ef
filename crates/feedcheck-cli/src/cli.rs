//! CLI argument definitions for the feed checker.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "feedcheck",
    version,
    about = "Validate tab-delimited commissions feed files",
    long_about = "Validate tab-delimited commissions feed files against their\n\
                  template rules and reference headers, then cross-check\n\
                  paired templates for referential integrity."
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
    /// Validate the feed files in the source directory.
    Check(CheckArgs),

    /// List the configured templates and pairs.
    Templates(TemplatesArgs),
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Configuration file (default: ./feedcheck.toml when present).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the data files.
    #[arg(long = "source", value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Directory holding the reference header files.
    #[arg(long = "headers", value_name = "DIR")]
    pub headers: Option<PathBuf>,

    /// Only check these templates (repeatable).
    #[arg(long = "template", value_name = "NAME")]
    pub templates: Vec<String>,

    /// Report format written to stdout.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,

    /// Also write the JSON report to this file.
    #[arg(long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct TemplatesArgs {
    /// Configuration file (default: ./feedcheck.toml when present).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormatArg {
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
