//! labbook: interactive harness for the record controller.

use std::fs;
use std::io::{self, IsTerminal};

use anyhow::Context;
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

mod cli;
mod logging;
mod render;
mod seed;
mod shell;

use labbook_core::{DataController, MemoryTransport};
use labbook_validate::{FieldRegistry, ValidationLimits};

use crate::cli::{Cli, LogFormatArg, LogLevelArg};
use crate::logging::{LogConfig, LogFormat, init_logging};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let limits = match &cli.limits {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading limits from {}", path.display()))?;
            serde_json::from_str::<ValidationLimits>(&raw).context("parsing validation limits")?
        }
        None => ValidationLimits::default(),
    };
    // The backend re-checks every submitted edit against its own registry;
    // in this harness both sides are built from the same limits.
    let client_registry = FieldRegistry::from_limits(&limits)?;
    let server_registry = FieldRegistry::from_limits(&limits)?;

    let mut transport = MemoryTransport::new(cli.page_size.max(1), server_registry);
    for cells in seed::load(cli.data.as_deref())? {
        transport.seed_row(cells);
    }

    let mut controller = DataController::new(transport, client_registry)?;
    shell::run(&mut controller)
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
