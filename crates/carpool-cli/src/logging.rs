//! Tracing subscriber setup driven by environment variables.
//!
//! `CARPOOL_TRACE` holds an `EnvFilter` directive (default `off`),
//! `CARPOOL_LOG_FORMAT` is `pretty` or `json`, and `CARPOOL_LOG_FILE`
//! optionally mirrors events into an appended file. Events go to stderr so
//! stdout stays reserved for the plan.

use std::env;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io;
use std::sync::Mutex;

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug)]
pub enum LoggingError {
    InvalidFilter(String),
    InvalidFormat(String),
    LogFile(io::Error),
    Init(String),
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggingError::InvalidFilter(msg) => write!(f, "Invalid log filter: {msg}"),
            LoggingError::InvalidFormat(format) => write!(
                f,
                "Invalid CARPOOL_LOG_FORMAT '{format}' (expected 'json' or 'pretty')"
            ),
            LoggingError::LogFile(err) => write!(f, "Failed to open log file: {err}"),
            LoggingError::Init(msg) => write!(f, "Failed to initialize logging: {msg}"),
        }
    }
}

impl std::error::Error for LoggingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoggingError::LogFile(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Pretty,
    Json,
}

fn parse_format(value: &str) -> Result<LogFormat, LoggingError> {
    if value.eq_ignore_ascii_case("pretty") {
        Ok(LogFormat::Pretty)
    } else if value.eq_ignore_ascii_case("json") {
        Ok(LogFormat::Json)
    } else {
        Err(LoggingError::InvalidFormat(value.to_string()))
    }
}

fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    if level.eq_ignore_ascii_case("off") {
        Ok(EnvFilter::default().add_directive(LevelFilter::OFF.into()))
    } else {
        EnvFilter::try_new(level).map_err(|err| LoggingError::InvalidFilter(err.to_string()))
    }
}

fn open_log_file(path: &str) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(LoggingError::LogFile)
}

/// Install the global subscriber.
///
/// `level` overrides `CARPOOL_TRACE`. Returns `false` when a subscriber was
/// already installed.
pub fn init(level: Option<&str>) -> Result<bool, LoggingError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }

    let level = level
        .map(str::to_string)
        .or_else(|| env::var("CARPOOL_TRACE").ok())
        .unwrap_or_else(|| "off".to_string());
    let filter = build_filter(&level)?;
    let format = parse_format(
        &env::var("CARPOOL_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
    )?;
    let file = env::var("CARPOOL_LOG_FILE")
        .ok()
        .map(|path| open_log_file(&path))
        .transpose()?;
    let init_err = |err: tracing_subscriber::util::TryInitError| LoggingError::Init(err.to_string());

    match format {
        LogFormat::Json => {
            let stderr = tracing_subscriber::fmt::layer().with_writer(io::stderr).json();
            let file = file.map(|file| {
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .json()
            });
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr)
                .with(file)
                .try_init()
                .map_err(init_err)?;
        }
        LogFormat::Pretty => {
            let stderr = tracing_subscriber::fmt::layer().with_writer(io::stderr).pretty();
            let file = file.map(|file| {
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .pretty()
            });
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr)
                .with(file)
                .try_init()
                .map_err(init_err)?;
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_are_case_insensitive() {
        assert_eq!(parse_format("JSON").unwrap(), LogFormat::Json);
        assert_eq!(parse_format("pretty").unwrap(), LogFormat::Pretty);
        assert!(matches!(
            parse_format("xml"),
            Err(LoggingError::InvalidFormat(_))
        ));
    }

    #[test]
    fn filters_accept_off_and_directives() {
        assert!(build_filter("off").is_ok());
        assert!(build_filter("carpool_matching=debug,warn").is_ok());
        assert!(matches!(
            build_filter("carpool=loudest"),
            Err(LoggingError::InvalidFilter(_))
        ));
    }
}
