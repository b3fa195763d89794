//! Income statistics dashboard CLI.

use clap::{ColorChoice, Parser};
use income_cli::cli::{Cli, Command, LogFormatArg, LogLevelArg, OutputFormatArg};
use income_cli::commands::{run_encodings, run_show};
use income_cli::logging::{LogConfig, LogFormat, init_logging};
use income_cli::summary::{print_json, print_load_failure, print_report};
use income_cli::types::ShowOutcome;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Show(args) => match run_show(&args) {
            Ok(ShowOutcome::Report(report)) => {
                let printed = match args.format {
                    OutputFormatArg::Table => print_report(&report, args.preview),
                    OutputFormatArg::Json => print_json(&report),
                };
                match printed {
                    Ok(()) => 0,
                    Err(error) => {
                        eprintln!("error: {error:#}");
                        1
                    }
                }
            }
            Ok(ShowOutcome::LoadFailed(reason)) => {
                print_load_failure(&reason);
                1
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Encodings => match run_encodings() {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
