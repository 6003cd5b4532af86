//! `ipl-insight`: IPL season table cleaning and analysis CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use ipl_cli::commands::{
    analyze_to_json, default_config_json, ingest_options, load_config, resolve_analyses,
    run_analyze, run_ingest,
};
use ipl_cli::logging::{LogConfig, init_logging};
use ipl_ingest::DatasetCache;
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{AnalyzeArgs, Cli, Command, IngestArgs, OutputFormatArg};
use crate::summary::{print_analyze, print_catalog, print_ingest};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match cli.command {
        Command::Ingest(args) => ingest(&args),
        Command::Analyze(args) => analyze(&args),
        Command::Analyses => {
            print_catalog();
            Ok(())
        }
        Command::Config => default_config_json().map(|json| println!("{json}")),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn ingest(args: &IngestArgs) -> Result<()> {
    let options = ingest_options(args.source.strict, args.source.keep_unparsed_seasons);
    let mut cache = DatasetCache::new();
    let run = run_ingest(&args.source.csv, &options, args.preview, &mut cache)?;
    print_ingest(&run);
    Ok(())
}

fn analyze(args: &AnalyzeArgs) -> Result<()> {
    let kinds = resolve_analyses(&args.analyses)?;
    let config = load_config(args.config.as_deref())?;
    let options = ingest_options(args.source.strict, args.source.keep_unparsed_seasons);
    let mut cache = DatasetCache::new();
    let run = run_analyze(&args.source.csv, &options, &kinds, &config, &mut cache)?;
    match args.format {
        OutputFormatArg::Table => print_analyze(&run),
        OutputFormatArg::Json => println!("{}", analyze_to_json(&run)?),
    }
    Ok(())
}

/// `--log-level` beats `-v/-q`, and either one turns off the `RUST_LOG`
/// override. ANSI follows `--color`, except that `auto` never colors a log
/// file or a non-terminal stderr.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let explicit = cli.log_level.map(LevelFilter::from);
    let ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig::new(explicit.unwrap_or_else(|| cli.verbosity.tracing_level_filter()))
        .with_env_override(explicit.is_none() && !cli.verbosity.is_present())
        .with_format(cli.log_format.into())
        .with_timestamps(cli.log_timestamps)
        .with_target(cli.log_target)
        .with_log_file(cli.log_file.clone())
        .with_ansi(ansi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipl_cli::logging::LogFormat;

    fn config_for(args: &[&str]) -> LogConfig {
        let argv = std::iter::once("ipl-insight")
            .chain(args.iter().copied())
            .chain(std::iter::once("analyses"));
        let cli = Cli::try_parse_from(argv).unwrap();
        log_config_from_cli(&cli)
    }

    #[test]
    fn defaults_defer_to_rust_log() {
        let config = config_for(&["--color", "never"]);
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert!(config.use_env_filter);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(!config.with_timestamps);
        assert!(!config.with_target);
        assert!(!config.with_ansi);
    }

    #[test]
    fn explicit_level_beats_verbosity_flags() {
        let config = config_for(&["-vv", "--log-level", "error"]);
        assert_eq!(config.level_filter, LevelFilter::ERROR);
        assert!(!config.use_env_filter);

        let config = config_for(&["-v"]);
        assert_eq!(config.level_filter, LevelFilter::INFO);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn log_line_options_reach_the_config() {
        let config = config_for(&[
            "--log-format",
            "json",
            "--log-timestamps",
            "--log-target",
            "--log-file",
            "ipl.log",
            "--color",
            "auto",
        ]);
        assert_eq!(config.format, LogFormat::Json);
        assert!(config.with_timestamps);
        assert!(config.with_target);
        assert_eq!(config.log_file, Some(std::path::PathBuf::from("ipl.log")));
        assert!(!config.with_ansi);

        let forced = config_for(&["--log-file", "ipl.log", "--color", "always"]);
        assert!(forced.with_ansi);
    }
}
