//! Lexical path normalization for configured locations.
//!
//! Configuration values such as the working directory may be written as
//! `~/.pathcomp/links` or relative to the current directory. These helpers
//! turn them into absolute paths without touching the filesystem, so a
//! working directory that does not exist yet can still be named.

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Expand a leading `~` to the home directory.
///
/// Handles `~` and `~/path`; `~user` is rejected.
///
/// # Errors
///
/// Returns an error if the path is not valid UTF-8, the home directory is
/// unknown, or `~user` syntax is used.
///
/// # Examples
///
/// ```
/// use pathcomp::path::normalize::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/.pathcomp")).unwrap();
/// assert!(expanded.is_absolute());
/// assert!(expanded.ends_with(".pathcomp"));
///
/// assert_eq!(expand_tilde(Path::new("/opt")).unwrap(), Path::new("/opt"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let text = path.to_str().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Path contains invalid UTF-8".to_string(),
    })?;

    let Some(rest) = text.strip_prefix('~') else {
        return Ok(path.to_path_buf());
    };

    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Cannot determine home directory".to_string(),
    })?;

    if rest.is_empty() {
        Ok(home)
    } else if let Some(sub) = rest.strip_prefix('/').or_else(|| rest.strip_prefix('\\')) {
        Ok(home.join(sub))
    } else {
        Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        })
    }
}

/// Remove `.` and `..` components from an absolute path.
///
/// # Errors
///
/// Returns an error if `..` would climb above the root.
///
/// # Examples
///
/// ```
/// use pathcomp::path::normalize::resolve_components;
/// use std::path::PathBuf;
///
/// let resolved = resolve_components("/a/./b/../c".as_ref()).unwrap();
/// assert_eq!(resolved, PathBuf::from("/a/c"));
/// ```
pub fn resolve_components(path: &Path) -> Result<PathBuf> {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                result.push(component);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                let at_root = result.parent().is_none();
                if at_root || !result.pop() {
                    return Err(Error::InvalidPath {
                        path: path.to_path_buf(),
                        reason: "Path contains too many '..' components (escapes root)"
                            .to_string(),
                    });
                }
            }
        }
    }

    Ok(result)
}

/// Expand `~`, anchor relative paths at the current directory, and resolve
/// `.`/`..` components.
///
/// # Errors
///
/// Returns an error if tilde expansion fails, the current directory is
/// unavailable, or the path escapes the root.
///
/// # Examples
///
/// ```no_run
/// use pathcomp::path::normalize::absolutize;
/// use std::path::Path;
///
/// let links = absolutize(Path::new("~/.pathcomp/links")).unwrap();
/// assert!(links.is_absolute());
/// ```
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path)?;

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        let cwd = env::current_dir().map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Cannot get current directory: {e}"),
        })?;
        cwd.join(expanded)
    };

    resolve_components(&absolute)
}
