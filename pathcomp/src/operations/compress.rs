//! The compression run: read, back up, compress, clean up.
//!
//! A run never writes the variable. It returns a [`CompressOutcome`] that
//! the caller applies once the user has confirmed.

use std::path::{Path, PathBuf};

use crate::alias::{AliasDir, CleanupPolicy};
use crate::backup::{BackupStage, BackupWriter};
use crate::config::schema::{Config, DEFAULT_VARIABLE};
use crate::engine::{CompressionReport, Compressor, EngineSettings, DEFAULT_THRESHOLD};
use crate::env::EnvStore;
use crate::error::{Error, Result};
use crate::fs::LinkFs;
use crate::path::PathSyntax;
use crate::pathset::{Normalized, Normalizer};

/// Options for a compression run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressOptions {
    /// Variable to read and, on apply, write.
    pub variable: String,
    /// A round must save strictly more characters than this.
    pub threshold: usize,
    /// Directory holding aliases and backups.
    pub work_dir: PathBuf,
    /// Delimiter and separator of the variable.
    pub syntax: PathSyntax,
    /// Roots under which aliasing is allowed; empty means the root of
    /// `work_dir`.
    pub link_roots: Vec<String>,
    /// What to do with aliases from earlier runs.
    pub cleanup: CleanupPolicy,
}

impl CompressOptions {
    /// Options for `PATH` with native syntax and default settings.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathcomp::operations::CompressOptions;
    ///
    /// let options = CompressOptions::new("/tmp/links").with_threshold(10);
    /// assert_eq!(options.variable, "PATH");
    /// assert_eq!(options.threshold, 10);
    /// ```
    #[must_use]
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            variable: DEFAULT_VARIABLE.to_string(),
            threshold: DEFAULT_THRESHOLD,
            work_dir: work_dir.into(),
            syntax: PathSyntax::native(),
            link_roots: Vec::new(),
            cleanup: CleanupPolicy::default(),
        }
    }

    /// Take every setting from `config`, using defaults for unset fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the syntax is invalid, or if no working
    /// directory is configured and the home directory is unknown.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            variable: config.variable_or_default().to_string(),
            threshold: config.threshold_or_default(),
            work_dir: config.work_dir_or_default()?,
            syntax: config.syntax()?,
            link_roots: config.link_roots_or_default(),
            cleanup: config.cleanup_or_default(),
        })
    }

    /// Sets the variable name.
    #[must_use]
    pub fn with_variable(mut self, variable: impl Into<String>) -> Self {
        self.variable = variable.into();
        self
    }

    /// Sets the threshold.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the syntax.
    #[must_use]
    pub const fn with_syntax(mut self, syntax: PathSyntax) -> Self {
        self.syntax = syntax;
        self
    }

    /// Sets the link roots.
    #[must_use]
    pub fn with_link_roots(mut self, roots: Vec<String>) -> Self {
        self.link_roots = roots;
        self
    }

    /// Sets the cleanup policy.
    #[must_use]
    pub const fn with_cleanup(mut self, cleanup: CleanupPolicy) -> Self {
        self.cleanup = cleanup;
        self
    }
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct CompressOutcome {
    /// Variable the value came from.
    pub variable: String,
    /// Engine output.
    pub report: CompressionReport,
    /// Backup of the raw value.
    pub before_backup: PathBuf,
    /// Slots of earlier aliases removed by the cleanup policy.
    pub removed_aliases: Vec<usize>,
    work_dir: PathBuf,
}

impl CompressOutcome {
    /// The value to write.
    #[must_use]
    pub fn compressed_value(&self) -> String {
        self.report.compressed_value()
    }

    /// The working directory used.
    #[must_use]
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Whether applying would change the variable.
    #[must_use]
    pub fn changes_value(&self) -> bool {
        self.report.original != self.compressed_value()
    }

    /// Back up the compressed value, then write it to `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backup cannot be written or the store
    /// rejects the value. The store is not touched when the backup fails.
    pub fn apply<S: EnvStore + ?Sized>(&self, store: &S) -> Result<PathBuf> {
        let value = self.compressed_value();
        let backup = BackupWriter::new(&self.work_dir).write(BackupStage::After, &value)?;
        store.set(&self.variable, &value)?;
        log::info!("updated {} ({} characters)", self.variable, self.report.compressed_len());
        Ok(backup)
    }
}

/// Runs compressions.
///
/// # Examples
///
/// ```no_run
/// use pathcomp::env::ProcessEnv;
/// use pathcomp::fs::OsLinkFs;
/// use pathcomp::operations::{CompressOperation, CompressOptions};
///
/// let options = CompressOptions::new("/tmp/pathcomp-links");
/// let outcome = CompressOperation::run(&OsLinkFs::new(), &ProcessEnv::new(), &options).unwrap();
/// println!("{}", outcome.compressed_value());
/// ```
pub struct CompressOperation;

impl CompressOperation {
    /// Read `options.variable` from `store` and compress it. An unset
    /// variable compresses like an empty one.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable cannot be read, or for any failure
    /// listed on [`run_on_value`](Self::run_on_value).
    pub fn run<F, S>(fs: &F, store: &S, options: &CompressOptions) -> Result<CompressOutcome>
    where
        F: LinkFs + ?Sized,
        S: EnvStore + ?Sized,
    {
        let raw = match store.get(&options.variable)? {
            Some(raw) => raw,
            None => {
                log::warn!("{} is not set, treating it as empty", options.variable);
                String::new()
            }
        };
        Self::run_on_value(fs, &raw, options)
    }

    /// Compress `raw` directly.
    ///
    /// The order is fixed: the working directory is created, the raw value
    /// is backed up, the value is normalized (resolving entries that go
    /// through old aliases), old aliases are handled per the cleanup
    /// policy, rounds run, and finally unreferenced aliases are pruned.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid options, if the working directory or
    /// backup cannot be written, if a chosen ancestor cannot be resolved,
    /// or if an alias cannot be created or removed. Aliases created before
    /// the failure stay on disk.
    pub fn run_on_value<F>(fs: &F, raw: &str, options: &CompressOptions) -> Result<CompressOutcome>
    where
        F: LinkFs + ?Sized,
    {
        if options.threshold == 0 {
            return Err(Error::Validation {
                field: "threshold".into(),
                message: "must be a positive number of characters".into(),
            });
        }
        options.syntax.validate()?;

        let aliases = AliasDir::new(&options.work_dir, options.syntax.dir_separator)?;
        aliases.ensure_exists(fs)?;

        let before_backup = BackupWriter::new(&options.work_dir).write(BackupStage::Before, raw)?;

        let normalized = Normalizer::new(fs, options.syntax).normalize(raw)?;
        let preparation = aliases.prepare(fs, options.cleanup)?;

        let settings = EngineSettings::new(aliases.clone(), options.syntax)
            .with_threshold(options.threshold)
            .with_link_roots(options.link_roots.clone())
            .with_first_slot(preparation.next_slot);
        let report = Compressor::new(fs, settings).compress_normalized(raw, normalized)?;

        let removed_aliases = match options.cleanup {
            CleanupPolicy::Upfront => preparation.removed,
            CleanupPolicy::Unreferenced => {
                aliases.prune_unreferenced(fs, &report.compressed, &preparation.retained)?
            }
        };

        log::info!(
            "{}: {} -> {} characters in {} round(s)",
            options.variable,
            report.original_len(),
            report.compressed_len(),
            report.rounds.len()
        );

        Ok(CompressOutcome {
            variable: options.variable.clone(),
            report,
            before_backup,
            removed_aliases,
            work_dir: options.work_dir.clone(),
        })
    }
}

/// Normalize `raw` without compressing it.
///
/// # Errors
///
/// Returns an error if `syntax` is invalid.
///
/// # Examples
///
/// ```
/// use pathcomp::fs::OsLinkFs;
/// use pathcomp::operations::clean_path;
/// use pathcomp::path::PathSyntax;
///
/// let cleaned = clean_path(&OsLinkFs::new(), PathSyntax::native(), "").unwrap();
/// assert!(cleaned.list.is_empty());
/// ```
pub fn clean_path<F: LinkFs + ?Sized>(fs: &F, syntax: PathSyntax, raw: &str) -> Result<Normalized> {
    Normalizer::new(fs, syntax).normalize(raw)
}
