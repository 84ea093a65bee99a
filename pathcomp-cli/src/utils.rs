//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, reading the value to work on, prompting,
//! and display formatting.

use crate::error::CliError;
use chrono::{DateTime, Utc};
use pathcomp::{Config, ConfigBuilder, EnvStore, ProcessEnv};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Additional configuration file.
    pub config: Option<PathBuf>,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Command flags in `overrides` (highest priority)
/// 2. Environment variables
/// 3. `--config` file
/// 4. User config in the data directory
/// 5. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions, overrides: Config) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new().with_config(overrides);

    if let Some(ref data_dir) = global.data_dir {
        builder = builder.with_data_dir(data_dir);
    }
    if let Some(ref file) = global.config {
        builder = builder.with_config_file(file);
    }

    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

/// The value to work on: `explicit` if given, else the variable from the
/// process environment (empty when unset).
pub fn read_value(variable: &str, explicit: Option<String>) -> Result<String, CliError> {
    match explicit {
        Some(value) => Ok(value),
        None => Ok(ProcessEnv::new().get(variable)?.unwrap_or_default()),
    }
}

/// Ask a yes/no question on stderr and read the answer from stdin.
///
/// Anything but an answer starting with `y` (including end of input)
/// counts as no.
pub fn confirm(question: &str) -> Result<bool, CliError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    Ok(confirm_with(question, &mut input, &mut io::stderr())?)
}

/// [`confirm`] over arbitrary streams.
pub fn confirm_with<R: BufRead, W: Write>(
    question: &str,
    input: &mut R,
    output: &mut W,
) -> io::Result<bool> {
    write!(output, "{question} (y/n) ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    Ok(answer.trim().to_lowercase().starts_with('y'))
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Shorten a path for display.
///
/// If the path is within the home directory, show it as ~/...
/// Otherwise, show the full path.
pub fn shorten_path(path: &Path) -> String {
    if let Some(home) = home::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}
