//! Logging initialization

use anyhow::{Context, Result};
use extblock_core::config::LoggingConfig;
use std::fs::File;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::args::{Args, LogFormat};

/// Initialize logging from CLI arguments, falling back to the config file
///
/// Console output goes to stderr so command output on stdout stays clean.
pub fn init(args: &Args, config: &LoggingConfig) -> Result<()> {
    let level = if args.quiet {
        Level::ERROR
    } else {
        match args.verbose {
            0 => config
                .level
                .parse()
                .with_context(|| format!("Invalid log level: {}", config.level))?,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let format = args.log_format.unwrap_or(if config.json_format {
        LogFormat::Json
    } else {
        LogFormat::Text
    });

    let log_file = args
        .log_file
        .as_deref()
        .or(config.file.as_deref())
        .map(|path| {
            File::create(path).with_context(|| format!("Failed to create log file: {path}"))
        })
        .transpose()?;

    match format {
        LogFormat::Text => {
            let subscriber = tracing_subscriber::registry().with(env_filter).with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(args.verbose >= 2)
                    .with_file(args.verbose >= 3)
                    .with_line_number(args.verbose >= 3),
            );

            if let Some(file) = log_file {
                subscriber
                    .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                    .init();
            } else {
                subscriber.init();
            }
        }
        LogFormat::Json => {
            let subscriber = tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr));

            if let Some(file) = log_file {
                subscriber.with(fmt::layer().json().with_writer(Mutex::new(file))).init();
            } else {
                subscriber.init();
            }
        }
        LogFormat::Compact => {
            let subscriber = tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().compact().with_writer(std::io::stderr));

            if let Some(file) = log_file {
                subscriber
                    .with(fmt::layer().compact().with_ansi(false).with_writer(Mutex::new(file)))
                    .init();
            } else {
                subscriber.init();
            }
        }
    }

    Ok(())
}
