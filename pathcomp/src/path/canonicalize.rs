//! Path canonicalization functions.
//!
//! This module resolves paths to their final, link-free form:
//! - Full canonicalization of existing paths
//! - Bounded link following with loop detection
//! - Removal of the Windows verbatim (`\\?\`) prefix
//!
//! Nonexistence is reported as [`Error::PathNotFound`] so callers can filter
//! it silently; every other failure keeps the OS error as its source.

use std::collections::HashSet;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default bound on the number of links followed for one path.
pub const MAX_SYMLINK_DEPTH: usize = 40;

const VERBATIM_PREFIX: &str = r"\\?\";
const VERBATIM_UNC_PREFIX: &str = r"\\?\UNC\";

fn map_io_error(path: &Path, e: io::Error) -> Error {
    match e.kind() {
        ErrorKind::NotFound => Error::PathNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::ResolutionFailure {
            path: path.to_path_buf(),
            source: e,
        },
    }
}

/// Attempt to canonicalize a path by following symlinks.
///
/// The path must exist for canonicalization to succeed. The result never
/// carries a verbatim prefix.
///
/// # Errors
///
/// Returns an error if:
/// - The path does not exist (`PathNotFound`)
/// - Resolution fails for any other reason (`ResolutionFailure`)
///
/// # Examples
///
/// ```no_run
/// use pathcomp::path::canonicalize::canonicalize;
/// use std::path::Path;
///
/// let canonical = canonicalize(Path::new("/tmp")).unwrap();
/// assert!(canonical.is_absolute());
/// ```
pub fn canonicalize(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path)
        .map(|p| strip_verbatim(&p))
        .map_err(|e| map_io_error(path, e))
}

/// Canonicalize a path with symlink loop detection.
///
/// Links are followed one hop at a time up to `max_depth` hops; the final
/// non-link path is then canonicalized to resolve any links among its
/// parents.
///
/// # Errors
///
/// Returns an error if:
/// - A symlink loop is detected (`SymlinkLoop`)
/// - The maximum symlink depth is exceeded (`InvalidPath`)
/// - The path, or a link target, does not exist (`PathNotFound`)
/// - Any other I/O error occurs (`ResolutionFailure`)
///
/// # Examples
///
/// ```no_run
/// use pathcomp::path::canonicalize::canonicalize_safe;
/// use std::path::Path;
///
/// let canonical = canonicalize_safe(Path::new("/tmp"), 40).unwrap();
/// ```
pub fn canonicalize_safe(path: &Path, max_depth: usize) -> Result<PathBuf> {
    let mut visited = HashSet::new();
    let mut current = path.to_path_buf();
    let mut depth = 0;

    loop {
        if !visited.insert(current.clone()) {
            return Err(Error::SymlinkLoop { path: current });
        }

        if depth >= max_depth {
            return Err(Error::InvalidPath {
                path: path.to_path_buf(),
                reason: format!("Too many symlinks (max {max_depth})"),
            });
        }

        match fs::read_link(&current) {
            Ok(target) => {
                current = if target.is_absolute() {
                    target
                } else {
                    // Relative link targets are relative to the link's parent
                    current
                        .parent()
                        .ok_or_else(|| Error::InvalidPath {
                            path: current.clone(),
                            reason: "Symlink has no parent directory".to_string(),
                        })?
                        .join(target)
                };
                depth += 1;
            }
            // Not a link (EINVAL on Unix; Windows reports other kinds for plain dirs)
            Err(e) if e.kind() != ErrorKind::NotFound && current.exists() => {
                log::debug!("{} is not a link ({e})", current.display());
                return canonicalize(&current);
            }
            Err(e) => return Err(map_io_error(&current, e)),
        }
    }
}

/// Remove the Windows verbatim prefix (`\\?\C:\x` → `C:\x`,
/// `\\?\UNC\host\share` → `\\host\share`).
///
/// Paths without the prefix are returned unchanged.
///
/// # Examples
///
/// ```
/// use pathcomp::path::canonicalize::strip_verbatim;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(strip_verbatim(Path::new(r"\\?\C:\Tools")), PathBuf::from(r"C:\Tools"));
/// assert_eq!(strip_verbatim(Path::new("/usr/bin")), PathBuf::from("/usr/bin"));
/// ```
#[must_use]
pub fn strip_verbatim(path: &Path) -> PathBuf {
    let Some(text) = path.to_str() else {
        return path.to_path_buf();
    };
    if let Some(rest) = text.strip_prefix(VERBATIM_UNC_PREFIX) {
        PathBuf::from(format!(r"\\{rest}"))
    } else if let Some(rest) = text.strip_prefix(VERBATIM_PREFIX) {
        PathBuf::from(rest)
    } else {
        path.to_path_buf()
    }
}
