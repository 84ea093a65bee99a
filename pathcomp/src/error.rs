//! Error types for the pathcomp library.
//!
//! This module provides the error hierarchy for all operations in the
//! pathcomp library, using `thiserror` for ergonomic error handling.
//!
//! Missing directories are never surfaced as errors by the normalizer; they
//! are filtered out. Everything that reaches a caller through [`Error`] stops
//! the operation that produced it.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a pathcomp error.
///
/// # Examples
///
/// ```
/// use pathcomp::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(30)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the pathcomp library.
#[derive(Debug, Error)]
pub enum Error {
    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A path does not exist.
    #[error("path not found: {}", path.display())]
    PathNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// A symlink loop was detected.
    #[error("symlink loop detected: {}", path.display())]
    SymlinkLoop {
        /// The path where the loop was detected.
        path: PathBuf,
    },

    /// Link-target resolution failed for a reason other than nonexistence.
    #[error("cannot resolve {}: {source}", path.display())]
    ResolutionFailure {
        /// The path whose target could not be resolved.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// Creating an alias link failed.
    #[error("cannot create alias {} -> {}: {source}", link.display(), target.display())]
    AliasCreation {
        /// The link that was being created.
        link: PathBuf,
        /// The directory the link should point at.
        target: PathBuf,
        /// The underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// Removing a stale alias link failed.
    #[error("cannot remove stale alias {}: {source}", link.display())]
    AliasRemoval {
        /// The link that was being removed.
        link: PathBuf,
        /// The underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing the environment-variable store failed.
    #[error("environment variable '{name}': {reason}")]
    Environment {
        /// The variable name.
        name: String,
        /// What went wrong.
        reason: String,
    },

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

impl Error {
    /// Check if error indicates a path does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathcomp::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::PathNotFound { path: PathBuf::from("/nonexistent") };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::PathNotFound { .. } => true,
            Self::Io(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }

    /// Check if error is permission-related.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathcomp::Error;
    /// use std::io;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::ResolutionFailure {
    ///     path: PathBuf::from("/restricted"),
    ///     source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    /// };
    /// assert!(err.is_permission_denied());
    /// ```
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Self::ResolutionFailure { source, .. }
            | Self::AliasCreation { source, .. }
            | Self::AliasRemoval { source, .. } => {
                source.kind() == std::io::ErrorKind::PermissionDenied
            }
            Self::Io(e) => e.kind() == std::io::ErrorKind::PermissionDenied,
            _ => false,
        }
    }
}
