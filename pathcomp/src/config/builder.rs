//! Layered configuration assembly.

use std::path::PathBuf;

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;
use crate::path::normalize::absolutize;

/// Builds the effective [`Config`] from defaults, files, environment, and
/// programmatic overrides.
///
/// # Examples
///
/// ```
/// use pathcomp::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_data_dir("/tmp/pathcomp-data")
///     .with_config(Config { threshold: Some(12), ..Default::default() })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.threshold, Some(12));
/// assert_eq!(config.variable.as_deref(), Some("PATH"));
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    data_dir: Option<PathBuf>,
    config_file: Option<PathBuf>,
    overrides: Option<Config>,
    skip_files: bool,
    skip_env: bool,
}

impl ConfigBuilder {
    /// A builder that reads every source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `dir` instead of `~/.pathcomp` for the user config and the
    /// default working directory.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Also load `path`, above the user config. The file must exist.
    #[must_use]
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Apply `config` last, above every other source.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Ignore configuration files.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignore `PATHCOMP_*` environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Merge all sources, resolve the working directory, and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be loaded, an environment override
    /// is malformed, the home directory is needed but unknown, or the
    /// result fails validation.
    pub fn build(self) -> Result<Config> {
        let mut config = self.defaults()?;

        if !self.skip_files {
            let sources =
                ConfigLoader::load_all(self.data_dir.as_deref(), self.config_file.as_deref())?;
            ConfigMerger::merge_into(&mut config, &ConfigMerger::merge(sources));
        }

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(ref overrides) = self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        if let Some(dir) = config.work_dir.take() {
            config.work_dir = Some(absolutize(&dir)?);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    fn defaults(&self) -> Result<Config> {
        match &self.data_dir {
            Some(dir) => Ok(Config::with_defaults_in(dir)),
            None => Config::with_defaults(),
        }
    }
}
