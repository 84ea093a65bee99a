//! Common test utilities for integration tests.
//!
//! Fixtures here build real directory trees in a temporary directory so the
//! normalizer and engine run against the host filesystem.

use std::fs;
use std::path::{Path, PathBuf};

use pathcomp::{CompressOptions, PathSyntax};
use tempfile::TempDir;

/// A long install directory name, long enough that aliasing it always pays
/// off regardless of where the temporary directory lives.
pub const VENDOR_DIR: &str = "a-very-long-vendor-installation-directory-name-for-testing";

/// A temporary tree holding a vendor install with several leaf directories
/// and an alias directory next to it.
pub struct PathFixture {
    temp: TempDir,
    leaves: Vec<PathBuf>,
}

#[allow(dead_code)]
impl PathFixture {
    /// Create `leaf_count` directories under `<tmp>/tools/<VENDOR_DIR>/`.
    pub fn new(leaf_count: usize) -> Self {
        let temp = tempfile::tempdir().unwrap();
        let vendor = temp.path().join("tools").join(VENDOR_DIR);
        let leaves = (0..leaf_count)
            .map(|i| {
                let leaf = vendor.join(format!("component{i}"));
                fs::create_dir_all(&leaf).unwrap();
                leaf
            })
            .collect();
        Self { temp, leaves }
    }

    /// Root of the temporary tree.
    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// The vendor install directory.
    pub fn vendor(&self) -> PathBuf {
        self.root().join("tools").join(VENDOR_DIR)
    }

    /// Alias and backup directory.
    pub fn work_dir(&self) -> PathBuf {
        self.root().join("links")
    }

    /// Leaf directories in creation order.
    pub fn leaves(&self) -> &[PathBuf] {
        &self.leaves
    }

    /// The leaves joined into a unix-style variable value.
    pub fn value(&self) -> String {
        let entries: Vec<String> = self
            .leaves
            .iter()
            .map(|p| p.to_str().unwrap().to_string())
            .collect();
        PathSyntax::unix().join(&entries)
    }

    /// Compression options pointed at this fixture's work directory.
    pub fn options(&self) -> CompressOptions {
        CompressOptions::new(self.work_dir()).with_syntax(PathSyntax::unix())
    }
}

/// Canonical forms of every entry in a unix-style value, sorted.
#[allow(dead_code)]
pub fn canonical_entries(value: &str) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = PathSyntax::unix()
        .split(value)
        .map(|e| fs::canonicalize(e).unwrap())
        .collect();
    entries.sort();
    entries
}
