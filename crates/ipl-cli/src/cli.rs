//! CLI argument definitions for `ipl-insight`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use ipl_cli::logging::LogFormat;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "ipl-insight",
    version,
    about = "Clean IPL season tables and run player analyses",
    long_about = "Clean a per-player, per-season IPL statistics table and run\n\
                  the analysis catalogue over it.\n\n\
                  Results print as tables or as JSON for downstream plotting."
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

    /// Prefix pretty and compact log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include the emitting module in each log line.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean a season table and report what cleaning changed.
    Ingest(IngestArgs),

    /// Clean a season table and run analyses over it.
    Analyze(AnalyzeArgs),

    /// List the analysis catalogue.
    Analyses,

    /// Print the default analysis configuration as JSON.
    Config,
}

/// Switches shared by every command that reads a source table.
#[derive(Args)]
pub struct SourceArgs {
    /// Path to the season CSV file.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Also null bowling averages above the ceiling.
    #[arg(long = "strict")]
    pub strict: bool,

    /// Keep rows whose season cannot be parsed instead of dropping them.
    #[arg(long = "keep-unparsed-seasons")]
    pub keep_unparsed_seasons: bool,
}

#[derive(Args)]
pub struct IngestArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print the first N cleaned rows.
    #[arg(long = "preview", value_name = "N")]
    pub preview: Option<usize>,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Analysis to run (repeatable; default: the whole catalogue).
    #[arg(long = "analysis", short = 'a', value_name = "NAME")]
    pub analyses: Vec<String>,

    /// JSON file overriding analysis parameters.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How results are printed.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
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

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
