//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `PATHCOMP_*` environment variables that
//! override configuration file values.

use crate::alias::CleanupPolicy;
use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Overrides the variable name.
pub const ENV_VARIABLE: &str = "PATHCOMP_VARIABLE";
/// Overrides the savings threshold.
pub const ENV_THRESHOLD: &str = "PATHCOMP_THRESHOLD";
/// Overrides the working directory.
pub const ENV_WORK_DIR: &str = "PATHCOMP_WORK_DIR";
/// Overrides the list delimiter.
pub const ENV_LIST_DELIMITER: &str = "PATHCOMP_LIST_DELIMITER";
/// Overrides the directory separator.
pub const ENV_DIR_SEPARATOR: &str = "PATHCOMP_DIR_SEPARATOR";
/// Overrides the link roots (comma-separated).
pub const ENV_LINK_ROOTS: &str = "PATHCOMP_LINK_ROOTS";
/// Overrides the cleanup policy.
pub const ENV_CLEANUP: &str = "PATHCOMP_CLEANUP";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use pathcomp::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply `PATHCOMP_*` overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., a non-numeric threshold or a multi-character delimiter).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        Self::apply_from(config, |name| env::var(name).ok())
    }

    /// Apply overrides read through `lookup` instead of the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Same as [`apply_overrides`](Self::apply_overrides).
    pub fn apply_from<L>(config: &mut Config, lookup: L) -> Result<()>
    where
        L: Fn(&str) -> Option<String>,
    {
        if let Some(variable) = lookup(ENV_VARIABLE) {
            config.variable = Some(variable);
        }

        if let Some(threshold) = lookup(ENV_THRESHOLD) {
            config.threshold = Some(threshold.trim().parse().map_err(|_| Error::Validation {
                field: ENV_THRESHOLD.into(),
                message: "Must be a positive integer".into(),
            })?);
        }

        if let Some(dir) = lookup(ENV_WORK_DIR) {
            config.work_dir = Some(PathBuf::from(dir));
        }

        if let Some(val) = lookup(ENV_LIST_DELIMITER) {
            config.list_delimiter = Some(Self::parse_char(ENV_LIST_DELIMITER, &val)?);
        }

        if let Some(val) = lookup(ENV_DIR_SEPARATOR) {
            config.dir_separator = Some(Self::parse_char(ENV_DIR_SEPARATOR, &val)?);
        }

        if let Some(val) = lookup(ENV_LINK_ROOTS) {
            config.link_roots = Some(Self::parse_list(&val));
        }

        if let Some(val) = lookup(ENV_CLEANUP) {
            config.cleanup = Some(CleanupPolicy::parse(&val).map_err(|_| Error::Validation {
                field: ENV_CLEANUP.into(),
                message: format!("Invalid cleanup policy: '{val}' (expected upfront/unreferenced)"),
            })?);
        }

        Ok(())
    }

    /// Parse a single-character value.
    fn parse_char(field: &str, s: &str) -> Result<char> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!("Expected exactly one character, got '{s}'"),
            }),
        }
    }

    /// Parse a comma-separated list, dropping empty items.
    fn parse_list(s: &str) -> Vec<String> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    }
}
