//! Timestamped backups of the variable value.
//!
//! Backups are plain text files in the working directory named
//! `backup-<UTC timestamp>-<stage>.txt`. The `before` backup holds the raw
//! value and is written before any alias is created; the `after` backup
//! holds the compressed value and is written only when that value is
//! applied.

use std::cmp::Ordering;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use crate::error::Result;

const PREFIX: &str = "backup-";
const SUFFIX: &str = ".txt";
const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S%.3fZ";
const MAX_NAME_ATTEMPTS: usize = 1000;

/// Which side of a compression a backup records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BackupStage {
    /// The value as read, before compression.
    Before,
    /// The compressed value, as written.
    After,
}

impl BackupStage {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "before" => Some(Self::Before),
            "after" => Some(Self::After),
            _ => None,
        }
    }
}

impl fmt::Display for BackupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before => write!(f, "before"),
            Self::After => write!(f, "after"),
        }
    }
}

/// A backup found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupFile {
    /// Full path of the file.
    pub path: PathBuf,
    /// When it was written.
    pub created_at: DateTime<Utc>,
    /// What it records.
    pub stage: BackupStage,
}

impl BackupFile {
    /// Parse a backup file name; `None` for anything else.
    #[must_use]
    pub fn from_file_name(dir: &Path, name: &str) -> Option<Self> {
        let body = name.strip_prefix(PREFIX)?.strip_suffix(SUFFIX)?;
        let (stamp, stage) = body.rsplit_once('-')?;
        let created_at = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT)
            .ok()?
            .and_utc();
        Some(Self {
            path: dir.join(name),
            created_at,
            stage: BackupStage::parse(stage)?,
        })
    }

    /// Read the saved value.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn read(&self) -> Result<String> {
        Ok(fs::read_to_string(&self.path)?)
    }
}

/// Writes and lists backups in one directory.
///
/// # Examples
///
/// ```
/// use pathcomp::backup::{BackupStage, BackupWriter};
///
/// let dir = tempfile::tempdir().unwrap();
/// let writer = BackupWriter::new(dir.path());
/// let path = writer.write(BackupStage::Before, "/usr/bin:/bin").unwrap();
/// assert_eq!(std::fs::read_to_string(path).unwrap(), "/usr/bin:/bin");
/// assert_eq!(writer.list().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct BackupWriter {
    dir: PathBuf,
}

impl BackupWriter {
    /// Use `dir` for backups. The directory must already exist when writing.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The backup directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `value` as a backup stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write(&self, stage: BackupStage, value: &str) -> Result<PathBuf> {
        self.write_at(stage, value, Utc::now())
    }

    /// Write `value` as a backup stamped with `at`.
    ///
    /// An existing backup is never overwritten: the stamp moves forward one
    /// millisecond until the name is free.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_at(&self, stage: BackupStage, value: &str, at: DateTime<Utc>) -> Result<PathBuf> {
        let mut stamp = at;
        for _ in 0..MAX_NAME_ATTEMPTS {
            let name = format!("{PREFIX}{}-{stage}{SUFFIX}", stamp.format(TIMESTAMP_FORMAT));
            let path = self.dir.join(name);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    file.write_all(value.as_bytes())?;
                    log::info!("wrote {stage} backup to {}", path.display());
                    return Ok(path);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    log::debug!("{} exists, trying the next millisecond", path.display());
                    stamp += Duration::milliseconds(1);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("no free {stage} backup name in {}", self.dir.display()),
        )
        .into())
    }

    /// Backups in the directory, newest first. A missing directory has none.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists but cannot be read.
    pub fn list(&self) -> Result<Vec<BackupFile>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                if let Some(backup) = BackupFile::from_file_name(&self.dir, name) {
                    backups.push(backup);
                }
            }
        }

        backups.sort_by(|a, b| match b.created_at.cmp(&a.created_at) {
            Ordering::Equal => b.stage.cmp(&a.stage),
            other => other,
        });
        Ok(backups)
    }
}
