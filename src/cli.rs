//! CLI command implementations for tugmath.

pub(crate) mod check_config;
pub(crate) mod play;
pub(crate) mod simulate;

mod audio;
mod output;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tugmath::Config;

/// Output format for the `simulate` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<tugmath::ConfigError> for CliError {
    fn from(e: tugmath::ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<tugmath::SimError> for CliError {
    fn from(e: tugmath::SimError) -> Self {
        Self::new(e.to_string())
    }
}

/// Use the given seed, or derive one from the clock.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    })
}

/// Load a config file, or fall back to the defaults.
pub(crate) fn load_config(path: Option<&Path>) -> Result<Config, CliError> {
    match path {
        Some(path) => Config::load(path).map_err(|e| {
            CliError::new(format!("Invalid config {}: {e}", path.display()))
        }),
        None => Ok(Config::default()),
    }
}

/// Send log output to stderr, filtered by `RUST_LOG`.
pub(crate) fn init_stderr_logging() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| CliError::new(format!("Failed to initialise logging: {e}")))
}

/// Send log output to `path`, at `info` unless `RUST_LOG` says otherwise.
///
/// The TUI owns the terminal, so logs never go to stdout or stderr there.
pub(crate) fn init_file_logging(path: &Path) -> Result<(), CliError> {
    let file = File::create(path).map_err(|e| {
        CliError::new(format!("Failed to create log file {}: {e}", path.display()))
    })?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| CliError::new(format!("Failed to initialise logging: {e}")))
}
