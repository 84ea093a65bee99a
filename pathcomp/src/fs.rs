//! Filesystem capability used by the normalizer, engine, and alias directory.
//!
//! Everything that asks the operating system about directories or links goes
//! through [`LinkFs`]. [`OsLinkFs`] is the real implementation; tests swap in
//! a mock to simulate failures the host cannot easily produce (a filesystem
//! without symlink support, a permission error halfway through a run).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::path::canonicalize::{canonicalize_safe, MAX_SYMLINK_DEPTH};

/// What a link points at. Windows distinguishes the two when creating links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// A link to a regular file.
    File,
    /// A link to a directory.
    Directory,
}

/// Directory and link operations needed to compress a path list.
#[cfg_attr(test, mockall::automock)]
pub trait LinkFs {
    /// Whether `path` is a directory, following links.
    ///
    /// # Errors
    ///
    /// Returns the raw OS error when `path` cannot be inspected, with
    /// `NotFound` for a path that does not exist.
    fn is_dir(&self, path: &Path) -> io::Result<bool>;

    /// Whether `path` itself is a symbolic link (not followed).
    fn is_symlink(&self, path: &Path) -> bool;

    /// Fully resolve `path` to its absolute, link-free form.
    ///
    /// # Errors
    ///
    /// `PathNotFound` when the path does not exist; `ResolutionFailure`,
    /// `SymlinkLoop`, or `InvalidPath` for everything else.
    fn resolve_link_target(&self, path: &Path) -> Result<PathBuf>;

    /// Create a link at `link` pointing at `target`.
    ///
    /// # Errors
    ///
    /// Returns the raw OS error so the caller can attach context.
    fn create_symlink(&self, target: &Path, link: &Path, kind: LinkKind) -> io::Result<()>;

    /// Remove the link at `link` without touching its target.
    ///
    /// # Errors
    ///
    /// Returns the raw OS error.
    fn remove_link(&self, link: &Path) -> io::Result<()>;

    /// Create `dir` and any missing parents.
    ///
    /// # Errors
    ///
    /// Returns the raw OS error.
    fn create_dir_all(&self, dir: &Path) -> io::Result<()>;

    /// Names of the entries directly inside `dir`.
    ///
    /// # Errors
    ///
    /// Returns the raw OS error.
    fn read_dir_names(&self, dir: &Path) -> io::Result<Vec<String>>;
}

/// [`LinkFs`] backed by the host operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsLinkFs;

impl OsLinkFs {
    /// Create the OS-backed filesystem.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl LinkFs for OsLinkFs {
    fn is_dir(&self, path: &Path) -> io::Result<bool> {
        fs::metadata(path).map(|m| m.is_dir())
    }

    fn is_symlink(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink())
    }

    fn resolve_link_target(&self, path: &Path) -> Result<PathBuf> {
        canonicalize_safe(path, MAX_SYMLINK_DEPTH)
    }

    #[cfg(unix)]
    fn create_symlink(&self, target: &Path, link: &Path, _kind: LinkKind) -> io::Result<()> {
        std::os::unix::fs::symlink(target, link)
    }

    #[cfg(windows)]
    fn create_symlink(&self, target: &Path, link: &Path, kind: LinkKind) -> io::Result<()> {
        match kind {
            LinkKind::Directory => std::os::windows::fs::symlink_dir(target, link),
            LinkKind::File => std::os::windows::fs::symlink_file(target, link),
        }
    }

    #[cfg(not(any(unix, windows)))]
    fn create_symlink(&self, _target: &Path, _link: &Path, _kind: LinkKind) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "symbolic links are not supported on this platform",
        ))
    }

    fn remove_link(&self, link: &Path) -> io::Result<()> {
        // Windows directory links are removed like directories
        if cfg!(windows) && link.is_dir() {
            fs::remove_dir(link)
        } else {
            fs::remove_file(link)
        }
    }

    fn create_dir_all(&self, dir: &Path) -> io::Result<()> {
        fs::create_dir_all(dir)
    }

    fn read_dir_names(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            if let Some(name) = entry?.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_is_dir() {
        let dir = tempdir().unwrap();
        let fs = OsLinkFs::new();
        assert!(fs.is_dir(dir.path()).unwrap());

        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        assert!(!fs.is_dir(&file).unwrap());

        let err = fs.is_dir(&dir.path().join("missing")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_read_dir_names_sorted() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("2")).unwrap();
        std::fs::create_dir(dir.path().join("1")).unwrap();
        std::fs::write(dir.path().join("backup.txt"), "x").unwrap();

        let names = OsLinkFs::new().read_dir_names(dir.path()).unwrap();
        assert_eq!(names, vec!["1", "2", "backup.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_create_resolve_and_remove_link() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("target");
        std::fs::create_dir(&target).unwrap();
        let link = dir.path().join("1");

        let fs = OsLinkFs::new();
        fs.create_symlink(&target, &link, LinkKind::Directory).unwrap();
        assert!(fs.is_symlink(&link));
        assert!(fs.is_dir(&link).unwrap());
        assert_eq!(
            fs.resolve_link_target(&link).unwrap(),
            std::fs::canonicalize(&target).unwrap()
        );

        fs.remove_link(&link).unwrap();
        assert!(!fs.is_symlink(&link));
        assert!(target.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_create_symlink_collision_fails() {
        let dir = tempdir().unwrap();
        let link = dir.path().join("1");
        std::fs::create_dir(&link).unwrap();

        let err = OsLinkFs::new()
            .create_symlink(dir.path(), &link, LinkKind::Directory)
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    }
}
