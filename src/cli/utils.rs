use crate::cli::commands::{LogFormat, LogLevel};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs::{self, OpenOptions};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Pick the effective level: an explicit level wins, `--verbose` means debug
pub fn effective_level(verbose: bool, log_level: Option<LogLevel>) -> LogLevel {
    match (log_level, verbose) {
        (Some(level), _) => level,
        (None, true) => LogLevel::Debug,
        (None, false) => LogLevel::Info,
    }
}

/// Build the filter: our own crate at `level`, dependencies at warn
pub fn build_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::new(format!("warn,ai_hooks={}", level.as_filter()))
}

/// Install the global subscriber.
///
/// Console output goes to stderr, coloured only when stderr is a terminal.
/// With `log_file`, records are also appended there without colours and
/// with source locations.
pub fn init_logging(level: LogLevel, log_format: LogFormat, log_file: Option<&Path>) -> Result<()> {
    let console_layer = match log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(false)
            .with_span_list(false)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Text => fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_ansi(std::io::stderr().is_terminal())
            .with_writer(std::io::stderr)
            .boxed(),
    };

    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(Mutex::new(file))
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(build_filter(level))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    Ok(())
}

pub fn print_info() {
    println!("{} v{}", "ai-hooks".bright_white().bold(), env!("CARGO_PKG_VERSION"));
    println!("{}", env!("CARGO_PKG_DESCRIPTION"));
    println!();
    println!("Authors: {}", env!("CARGO_PKG_AUTHORS"));
    println!("License: {}", env!("CARGO_PKG_LICENSE"));
    println!();
    println!("For more information, visit: {}", env!("CARGO_PKG_REPOSITORY"));
}
