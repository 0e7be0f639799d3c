//! Tracing setup for the viewer and the headless runner.
//!
//! The viewer owns the terminal, so it only ever logs to a file. The headless runner may also
//! log to stderr, leaving stdout free for the JSON report.

use crate::error::{Error, Result};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

static LOG_GUARD: Mutex<Option<tracing_appender::non_blocking::WorkerGuard>> = Mutex::new(None);

/// Installs the global subscriber.
///
/// `level` is the default filter (unknown names fall back to `warn`); `RUST_LOG` overrides it.
///
/// # Errors
///
/// Returns [`Error::Logging`] if the log file cannot be created or a subscriber is already set.
pub fn init(level: &str, file: Option<&Path>, stderr: bool) -> Result<()> {
    let default_level = parse_level(level).unwrap_or(LevelFilter::WARN);
    let filter = || {
        EnvFilter::builder()
            .with_default_directive(default_level.into())
            .from_env_lossy()
    };

    let stderr_layer = stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_filter(filter())
    });

    let file_layer = match file {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| Error::Logging(format!("{}: {e}", path.display())))?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            if let Ok(mut g) = LOG_GUARD.lock() {
                *g = Some(guard);
            }
            Some(
                fmt::layer()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(filter()),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}

fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.to_lowercase().as_str() {
        "off" => Some(LevelFilter::OFF),
        "error" => Some(LevelFilter::ERROR),
        "warn" => Some(LevelFilter::WARN),
        "info" => Some(LevelFilter::INFO),
        "debug" => Some(LevelFilter::DEBUG),
        "trace" => Some(LevelFilter::TRACE),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/logging.rs"]
mod tests;
