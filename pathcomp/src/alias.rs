//! The alias working directory.
//!
//! Aliases are symbolic links named `1`, `2`, `3`, … inside one working
//! directory. Only the engine creates them; this module names slots, finds
//! leftovers from earlier runs, and removes the ones a policy says to drop.
//! Anything in the directory whose name is not a number (backups, notes) is
//! never touched.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fs::LinkFs;
use crate::path::ancestors::is_path_prefix;
use crate::pathset::PathList;

/// What to do with numeric aliases left behind by a previous run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CleanupPolicy {
    /// Delete every numeric alias before compressing; numbering restarts at 1.
    #[default]
    Upfront,
    /// Keep them while compressing; afterwards delete only those the final
    /// value no longer references. New aliases are numbered after them.
    Unreferenced,
}

impl CleanupPolicy {
    /// Parse a policy name (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns a validation error for unknown names.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "upfront" => Ok(Self::Upfront),
            "unreferenced" => Ok(Self::Unreferenced),
            _ => Err(Error::Validation {
                field: "cleanup".into(),
                message: format!("unknown cleanup policy '{s}' (expected upfront or unreferenced)"),
            }),
        }
    }
}

impl fmt::Display for CleanupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upfront => write!(f, "upfront"),
            Self::Unreferenced => write!(f, "unreferenced"),
        }
    }
}

/// Outcome of [`AliasDir::prepare`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preparation {
    /// First slot the engine may use.
    pub next_slot: usize,
    /// Slots removed up front.
    pub removed: Vec<usize>,
    /// Slots left in place for later pruning.
    pub retained: Vec<usize>,
}

/// The directory holding numbered aliases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasDir {
    root: PathBuf,
    root_text: String,
    separator: char,
}

impl AliasDir {
    /// Describe the alias directory at `root`, joining slots with
    /// `separator`.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is not valid UTF-8, since alias paths are
    /// spliced into the variable text.
    pub fn new(root: impl Into<PathBuf>, separator: char) -> Result<Self> {
        let root = root.into();
        let root_text = root
            .to_str()
            .ok_or_else(|| Error::InvalidPath {
                path: root.clone(),
                reason: "working directory is not valid UTF-8".to_string(),
            })?
            .to_string();
        Ok(Self {
            root,
            root_text,
            separator,
        })
    }

    /// The working directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Text of the alias for `slot`, e.g. `C:\l\3`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathcomp::alias::AliasDir;
    ///
    /// let dir = AliasDir::new(r"C:\l", '\\').unwrap();
    /// assert_eq!(dir.slot_path(3), r"C:\l\3");
    /// ```
    #[must_use]
    pub fn slot_path(&self, slot: usize) -> String {
        if self.root_text.ends_with(self.separator) {
            format!("{}{slot}", self.root_text)
        } else {
            format!("{}{}{slot}", self.root_text, self.separator)
        }
    }

    /// Create the directory if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn ensure_exists<F: LinkFs + ?Sized>(&self, fs: &F) -> Result<()> {
        if !fs.is_dir(&self.root).unwrap_or(false) {
            log::info!("creating working directory {}", self.root.display());
            fs.create_dir_all(&self.root)?;
        }
        Ok(())
    }

    /// Numeric names in the directory, ascending, links or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed.
    pub fn numeric_entries<F: LinkFs + ?Sized>(&self, fs: &F) -> Result<Vec<usize>> {
        let mut slots: Vec<usize> = fs
            .read_dir_names(&self.root)?
            .iter()
            .filter(|name| !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit()))
            .filter_map(|name| name.parse().ok())
            .collect();
        slots.sort_unstable();
        Ok(slots)
    }

    /// Numeric entries that are symbolic links, i.e. aliases.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed.
    pub fn existing_slots<F: LinkFs + ?Sized>(&self, fs: &F) -> Result<Vec<usize>> {
        Ok(self
            .numeric_entries(fs)?
            .into_iter()
            .filter(|slot| fs.is_symlink(Path::new(&self.slot_path(*slot))))
            .collect())
    }

    /// The slot [`prepare`](Self::prepare) would hand out, without touching
    /// the directory.
    ///
    /// Under `Upfront` the aliases it would delete do not count; plain
    /// numeric entries always do. A missing directory starts at 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists but cannot be listed.
    pub fn next_slot<F: LinkFs + ?Sized>(&self, fs: &F, policy: CleanupPolicy) -> Result<usize> {
        if !fs.is_dir(&self.root).unwrap_or(false) {
            return Ok(1);
        }

        let aliases = match policy {
            CleanupPolicy::Upfront => self.existing_slots(fs)?,
            CleanupPolicy::Unreferenced => Vec::new(),
        };
        Ok(self
            .numeric_entries(fs)?
            .into_iter()
            .filter(|slot| !aliases.contains(slot))
            .max()
            .map_or(1, |max| max + 1))
    }

    /// Create the directory and apply the up-front half of `policy`.
    ///
    /// The returned `next_slot` is one past the highest numeric name still
    /// present, so a new alias never collides with a leftover.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or listed, or a
    /// stale alias cannot be removed.
    pub fn prepare<F: LinkFs + ?Sized>(&self, fs: &F, policy: CleanupPolicy) -> Result<Preparation> {
        self.ensure_exists(fs)?;

        let aliases = self.existing_slots(fs)?;
        let (removed, retained) = match policy {
            CleanupPolicy::Upfront => {
                for slot in &aliases {
                    self.remove_slot(fs, *slot)?;
                }
                (aliases, Vec::new())
            }
            CleanupPolicy::Unreferenced => (Vec::new(), aliases),
        };

        let next_slot = self.numeric_entries(fs)?.last().map_or(1, |max| max + 1);
        log::debug!(
            "prepared {} (policy {policy}, removed {}, next slot {next_slot})",
            self.root.display(),
            removed.len()
        );

        Ok(Preparation {
            next_slot,
            removed,
            retained,
        })
    }

    /// Whether any entry of `list` goes through the alias at `slot`.
    #[must_use]
    pub fn is_referenced(&self, slot: usize, list: &PathList) -> bool {
        let alias = self.slot_path(slot);
        list.entries()
            .iter()
            .any(|entry| is_path_prefix(&alias, entry, self.separator))
    }

    /// Remove those of `candidates` that no entry of `list` references.
    ///
    /// # Errors
    ///
    /// Returns an error if a link cannot be removed; links removed before
    /// the failure stay removed.
    pub fn prune_unreferenced<F: LinkFs + ?Sized>(
        &self,
        fs: &F,
        list: &PathList,
        candidates: &[usize],
    ) -> Result<Vec<usize>> {
        let mut removed = Vec::new();
        for &slot in candidates {
            if self.is_referenced(slot, list) {
                log::debug!("keeping alias {} (still referenced)", self.slot_path(slot));
                continue;
            }
            self.remove_slot(fs, slot)?;
            removed.push(slot);
        }
        Ok(removed)
    }

    fn remove_slot<F: LinkFs + ?Sized>(&self, fs: &F, slot: usize) -> Result<()> {
        let link = self.slot_path(slot);
        fs.remove_link(Path::new(&link))
            .map_err(|source| Error::AliasRemoval {
                link: PathBuf::from(&link),
                source,
            })?;
        log::info!("removed alias {link}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::OsLinkFs;
    use tempfile::tempdir;

    #[test]
    fn test_slot_path_joins_separator() {
        let dir = AliasDir::new("/links", '/').unwrap();
        assert_eq!(dir.slot_path(1), "/links/1");
        assert_eq!(dir.slot_path(12), "/links/12");
    }

    #[test]
    fn test_slot_path_at_root() {
        let dir = AliasDir::new("/", '/').unwrap();
        assert_eq!(dir.slot_path(1), "/1");
    }

    #[test]
    fn test_cleanup_policy_parse() {
        assert_eq!(CleanupPolicy::parse("Upfront").unwrap(), CleanupPolicy::Upfront);
        assert_eq!(
            CleanupPolicy::parse("unreferenced").unwrap(),
            CleanupPolicy::Unreferenced
        );
        assert!(CleanupPolicy::parse("never").is_err());
    }

    #[test]
    fn test_is_referenced() {
        let dir = AliasDir::new("/l", '/').unwrap();
        let list = PathList::new(vec!["/l/1/bin".into(), "/l/10".into()]);
        assert!(dir.is_referenced(1, &list));
        assert!(dir.is_referenced(10, &list));
        assert!(!dir.is_referenced(2, &list));
    }

    #[test]
    fn test_prepare_creates_directory() {
        let tmp = tempdir().unwrap();
        let root = tmp.path().join("links");
        let dir = AliasDir::new(&root, std::path::MAIN_SEPARATOR).unwrap();

        let prep = dir.prepare(&OsLinkFs::new(), CleanupPolicy::Upfront).unwrap();
        assert!(root.is_dir());
        assert_eq!(prep.next_slot, 1);
        assert!(prep.removed.is_empty());
    }

    #[test]
    fn test_numbering_skips_plain_numeric_directories() {
        let tmp = tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("4")).unwrap();
        std::fs::write(tmp.path().join("backup-1.txt"), "x").unwrap();
        let dir = AliasDir::new(tmp.path(), std::path::MAIN_SEPARATOR).unwrap();

        let prep = dir.prepare(&OsLinkFs::new(), CleanupPolicy::Upfront).unwrap();
        assert_eq!(prep.next_slot, 5);
        assert!(tmp.path().join("4").is_dir());
        assert!(tmp.path().join("backup-1.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_prepare_upfront_removes_aliases() {
        use std::os::unix::fs::symlink;

        let tmp = tempdir().unwrap();
        let target = tmp.path().join("target");
        std::fs::create_dir(&target).unwrap();
        let root = tmp.path().join("links");
        std::fs::create_dir(&root).unwrap();
        symlink(&target, root.join("1")).unwrap();
        symlink(&target, root.join("2")).unwrap();

        let dir = AliasDir::new(&root, '/').unwrap();
        let prep = dir.prepare(&OsLinkFs::new(), CleanupPolicy::Upfront).unwrap();

        assert_eq!(prep.removed, vec![1, 2]);
        assert_eq!(prep.next_slot, 1);
        assert!(!root.join("1").exists());
        assert!(target.is_dir());
    }

    #[test]
    fn test_next_slot_of_missing_directory() {
        let tmp = tempdir().unwrap();
        let dir = AliasDir::new(tmp.path().join("links"), std::path::MAIN_SEPARATOR).unwrap();
        let fs = OsLinkFs::new();

        assert_eq!(dir.next_slot(&fs, CleanupPolicy::Upfront).unwrap(), 1);
        assert!(!tmp.path().join("links").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_next_slot_matches_prepare() {
        use std::os::unix::fs::symlink;

        for policy in [CleanupPolicy::Upfront, CleanupPolicy::Unreferenced] {
            let tmp = tempdir().unwrap();
            let target = tmp.path().join("target");
            std::fs::create_dir(&target).unwrap();
            let root = tmp.path().join("links");
            std::fs::create_dir(&root).unwrap();
            std::fs::create_dir(root.join("3")).unwrap();
            for slot in [1, 9] {
                symlink(&target, root.join(slot.to_string())).unwrap();
            }

            let fs = OsLinkFs::new();
            let dir = AliasDir::new(&root, '/').unwrap();
            let planned = dir.next_slot(&fs, policy).unwrap();
            assert!(fs.is_symlink(&root.join("9")));

            let prep = dir.prepare(&fs, policy).unwrap();
            assert_eq!(planned, prep.next_slot);
            let expected = match policy {
                CleanupPolicy::Upfront => 4,
                CleanupPolicy::Unreferenced => 10,
            };
            assert_eq!(planned, expected);
        }
    }

    #[test]
    fn test_failed_removal_keeps_os_error() {
        use crate::fs::MockLinkFs;
        use std::io;

        let mut fs = MockLinkFs::new();
        fs.expect_is_dir().returning(|_| Ok(true));
        fs.expect_read_dir_names()
            .returning(|_| Ok(vec!["1".to_string()]));
        fs.expect_is_symlink().returning(|_| true);
        fs.expect_remove_link()
            .returning(|_| Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")));

        let dir = AliasDir::new("/links", '/').unwrap();
        let err = dir.prepare(&fs, CleanupPolicy::Upfront).unwrap_err();

        assert!(matches!(err, Error::AliasRemoval { .. }));
        assert!(err.is_permission_denied());
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("/links/1"));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreferenced_policy_prunes_after() {
        use std::os::unix::fs::symlink;

        let tmp = tempdir().unwrap();
        let target = tmp.path().join("target");
        std::fs::create_dir(&target).unwrap();
        let root = tmp.path().join("links");
        std::fs::create_dir(&root).unwrap();
        symlink(&target, root.join("1")).unwrap();
        symlink(&target, root.join("2")).unwrap();

        let fs = OsLinkFs::new();
        let dir = AliasDir::new(&root, '/').unwrap();
        let prep = dir.prepare(&fs, CleanupPolicy::Unreferenced).unwrap();
        assert_eq!(prep.retained, vec![1, 2]);
        assert_eq!(prep.next_slot, 3);

        let final_list = PathList::new(vec![format!("{}/x", dir.slot_path(2))]);
        let removed = dir.prune_unreferenced(&fs, &final_list, &prep.retained).unwrap();
        assert_eq!(removed, vec![1]);
        assert!(fs.is_symlink(&root.join("2")));
        assert!(!fs.is_symlink(&root.join("1")));
    }
}
