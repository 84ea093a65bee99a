//! Configuration schema definitions.
//!
//! Every field is optional so that partial files and environment overrides
//! can be layered; the `*_or_default` accessors supply the built-in values.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::alias::CleanupPolicy;
use crate::engine::DEFAULT_THRESHOLD;
use crate::error::Result;
use crate::path::PathSyntax;

/// Variable compressed when none is configured.
pub const DEFAULT_VARIABLE: &str = "PATH";

/// Name of the alias directory inside the data directory.
pub const LINKS_DIR_NAME: &str = "links";

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use pathcomp::config::Config;
///
/// let config: Config = serde_yaml::from_str("threshold: 50\nvariable: MANPATH\n").unwrap();
/// assert_eq!(config.threshold_or_default(), 50);
/// assert_eq!(config.variable_or_default(), "MANPATH");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Name of the environment variable to compress.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,

    /// A round must save strictly more characters than this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<usize>,

    /// Directory holding aliases and backups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_dir: Option<PathBuf>,

    /// Character separating entries of the variable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_delimiter: Option<char>,

    /// Character separating directory components.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir_separator: Option<char>,

    /// Only directories under these roots may be aliased.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_roots: Option<Vec<String>>,

    /// What to do with aliases from earlier runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanup: Option<CleanupPolicy>,
}

impl Config {
    /// A configuration with every field set to its built-in default.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::with_defaults_in(&default_data_dir()?))
    }

    /// Built-in defaults with the working directory under `data_dir`.
    #[must_use]
    pub fn with_defaults_in(data_dir: &Path) -> Self {
        let native = PathSyntax::native();
        Self {
            variable: Some(DEFAULT_VARIABLE.to_string()),
            threshold: Some(DEFAULT_THRESHOLD),
            work_dir: Some(data_dir.join(LINKS_DIR_NAME)),
            list_delimiter: Some(native.list_delimiter),
            dir_separator: Some(native.dir_separator),
            link_roots: Some(Vec::new()),
            cleanup: Some(CleanupPolicy::default()),
        }
    }

    /// The configured variable name, or `PATH`.
    #[must_use]
    pub fn variable_or_default(&self) -> &str {
        self.variable.as_deref().unwrap_or(DEFAULT_VARIABLE)
    }

    /// The configured threshold, or the engine default.
    #[must_use]
    pub fn threshold_or_default(&self) -> usize {
        self.threshold.unwrap_or(DEFAULT_THRESHOLD)
    }

    /// The configured syntax, falling back to the host's characters.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the characters cannot work together.
    pub fn syntax(&self) -> Result<PathSyntax> {
        let native = PathSyntax::native();
        PathSyntax::new(
            self.list_delimiter.unwrap_or(native.list_delimiter),
            self.dir_separator.unwrap_or(native.dir_separator),
        )
    }

    /// The configured working directory, or `<data dir>/links`.
    ///
    /// # Errors
    ///
    /// Returns an error if no directory is configured and the home
    /// directory cannot be determined.
    pub fn work_dir_or_default(&self) -> Result<PathBuf> {
        match &self.work_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_work_dir(),
        }
    }

    /// The configured link roots; empty means "root of the working directory".
    #[must_use]
    pub fn link_roots_or_default(&self) -> Vec<String> {
        self.link_roots.clone().unwrap_or_default()
    }

    /// The configured cleanup policy, or [`CleanupPolicy::Upfront`].
    #[must_use]
    pub fn cleanup_or_default(&self) -> CleanupPolicy {
        self.cleanup.unwrap_or_default()
    }
}

/// The data directory: `$PATHCOMP_DATA_DIR` if set, else `~/.pathcomp`.
///
/// # Errors
///
/// Returns an error if neither the variable nor a home directory is
/// available.
pub fn default_data_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("PATHCOMP_DATA_DIR") {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    home::home_dir()
        .map(|home| home.join(".pathcomp"))
        .ok_or_else(|| crate::Error::Validation {
            field: "home_directory".into(),
            message: "Cannot determine home directory".into(),
        })
}

/// The default alias directory, `<data dir>/links`.
///
/// # Errors
///
/// Same as [`default_data_dir`].
pub fn default_work_dir() -> Result<PathBuf> {
    Ok(default_data_dir()?.join(LINKS_DIR_NAME))
}
