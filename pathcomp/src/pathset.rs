//! Path lists and their normalization.
//!
//! A raw variable value is split into segments, segments that are not
//! existing directories are dropped, survivors are resolved to their
//! canonical form, duplicates collapse, and the result is sorted once.
//! Later rewrites preserve that order.

use std::collections::BTreeSet;
use std::fmt;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};
use crate::fs::LinkFs;
use crate::path::PathSyntax;

/// An ordered list of directory entries, the in-memory form of a variable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathList {
    entries: Vec<String>,
}

impl PathList {
    /// Wrap entries as-is; callers are responsible for their invariants.
    #[must_use]
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    /// The entries in order.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Consume the list, returning its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<String> {
        self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `entry` is present verbatim.
    #[must_use]
    pub fn contains(&self, entry: &str) -> bool {
        self.entries.iter().any(|e| e == entry)
    }

    /// Join the entries into a variable value.
    #[must_use]
    pub fn serialize(&self, syntax: &PathSyntax) -> String {
        syntax.join(&self.entries)
    }

    /// Character length of [`serialize`](Self::serialize).
    #[must_use]
    pub fn serialized_len(&self, syntax: &PathSyntax) -> usize {
        syntax.serialized_len(&self.entries)
    }
}

/// Why a segment did not make it into the normalized list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The segment is not an existing directory.
    Missing,
    /// The directory exists but could not be resolved.
    Unresolvable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "not an existing directory"),
            Self::Unresolvable(reason) => write!(f, "cannot be resolved: {reason}"),
        }
    }
}

/// A segment dropped during normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// The segment as it appeared in the raw value.
    pub segment: String,
    /// Why it was dropped.
    pub reason: SkipReason,
}

/// Result of normalizing a raw value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalized {
    /// Deduplicated, resolved, sorted entries.
    pub list: PathList,
    /// Segments dropped along the way, in input order.
    pub skipped: Vec<SkippedEntry>,
}

/// Turns raw variable values into normalized [`PathList`]s.
///
/// # Examples
///
/// ```no_run
/// use pathcomp::fs::OsLinkFs;
/// use pathcomp::path::PathSyntax;
/// use pathcomp::pathset::Normalizer;
///
/// let fs = OsLinkFs::new();
/// let normalizer = Normalizer::new(&fs, PathSyntax::unix());
/// let normalized = normalizer.normalize("/:/./.::/:/somepaththatdoesntexist/").unwrap();
/// assert_eq!(normalized.list.serialize(&PathSyntax::unix()), "/");
/// ```
pub struct Normalizer<'a, F: LinkFs + ?Sized> {
    fs: &'a F,
    syntax: PathSyntax,
}

impl<'a, F: LinkFs + ?Sized> Normalizer<'a, F> {
    /// Create a normalizer over `fs` using `syntax`.
    #[must_use]
    pub fn new(fs: &'a F, syntax: PathSyntax) -> Self {
        Self { fs, syntax }
    }

    /// Normalize `raw`.
    ///
    /// Missing directories and segments that fail to resolve are skipped
    /// and recorded; neither aborts the operation. An empty input yields an
    /// empty list.
    ///
    /// # Errors
    ///
    /// Never fails for filesystem reasons today; the `Result` leaves room
    /// for syntax validation.
    pub fn normalize(&self, raw: &str) -> Result<Normalized> {
        self.syntax.validate()?;

        let mut canonical = BTreeSet::new();
        let mut skipped = Vec::new();

        for segment in self.syntax.split(raw) {
            match self.resolve_segment(segment) {
                Ok(resolved) => {
                    canonical.insert(resolved);
                }
                Err(reason) => {
                    if reason == SkipReason::Missing {
                        log::debug!("dropping '{segment}': {reason}");
                    } else {
                        log::warn!("dropping '{segment}': {reason}");
                    }
                    skipped.push(SkippedEntry {
                        segment: segment.to_string(),
                        reason,
                    });
                }
            }
        }

        let list = PathList::new(canonical.into_iter().collect());
        log::debug!(
            "normalized {} segment(s) into {} entries",
            self.syntax.split(raw).count(),
            list.len()
        );
        Ok(Normalized { list, skipped })
    }

    fn resolve_segment(&self, segment: &str) -> std::result::Result<String, SkipReason> {
        let path = Path::new(segment);
        match self.fs.is_dir(path) {
            Ok(true) => {}
            Ok(false) => return Err(SkipReason::Missing),
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(SkipReason::Missing),
            Err(e) => {
                return Err(SkipReason::Unresolvable(
                    Error::ResolutionFailure {
                        path: path.to_path_buf(),
                        source: e,
                    }
                    .to_string(),
                ))
            }
        }

        match self.fs.resolve_link_target(path) {
            Ok(resolved) => resolved.to_str().map(str::to_string).ok_or_else(|| {
                SkipReason::Unresolvable(
                    Error::InvalidPath {
                        path: resolved.clone(),
                        reason: "resolved path is not valid UTF-8".to_string(),
                    }
                    .to_string(),
                )
            }),
            Err(e) if e.is_not_found() => Err(SkipReason::Missing),
            Err(e) => Err(SkipReason::Unresolvable(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{MockLinkFs, OsLinkFs};
    use std::io;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn canonical(path: &Path) -> String {
        crate::path::canonicalize::canonicalize(path)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_path_list_serialize() {
        let list = PathList::new(vec!["/a".into(), "/b/c".into()]);
        let syntax = PathSyntax::unix();
        assert_eq!(list.serialize(&syntax), "/a:/b/c");
        assert_eq!(list.serialized_len(&syntax), 7);
        assert!(list.contains("/a"));
        assert!(!list.contains("/b"));
    }

    #[test]
    fn test_normalize_empty_input() {
        let fs = OsLinkFs::new();
        let normalized = Normalizer::new(&fs, PathSyntax::native())
            .normalize("")
            .unwrap();
        assert!(normalized.list.is_empty());
        assert!(normalized.skipped.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_clean_path_collapses_root_forms() {
        let fs = OsLinkFs::new();
        let syntax = PathSyntax::unix();
        let normalized = Normalizer::new(&fs, syntax)
            .normalize("/:/./.::/:/somepaththatdoesntexist/")
            .unwrap();

        assert_eq!(normalized.list.serialize(&syntax), "/");
        assert_eq!(normalized.skipped.len(), 1);
        assert_eq!(normalized.skipped[0].reason, SkipReason::Missing);
    }

    #[test]
    fn test_normalize_sorts_and_dedups() {
        let dir = tempdir().unwrap();
        let b = dir.path().join("b");
        let a = dir.path().join("a");
        std::fs::create_dir(&b).unwrap();
        std::fs::create_dir(&a).unwrap();

        let syntax = PathSyntax::native();
        let dotted = a.join(".");
        let raw = syntax.join(&[
            b.to_str().unwrap(),
            a.to_str().unwrap(),
            dotted.to_str().unwrap(),
            b.to_str().unwrap(),
        ]);

        let fs = OsLinkFs::new();
        let normalized = Normalizer::new(&fs, syntax).normalize(&raw).unwrap();
        assert_eq!(
            normalized.list.entries(),
            &[canonical(&a), canonical(&b)]
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let dir = tempdir().unwrap();
        for name in ["x", "y", "z"] {
            std::fs::create_dir(dir.path().join(name)).unwrap();
        }
        let syntax = PathSyntax::native();
        let raw = syntax.join(&[
            dir.path().join("z").to_str().unwrap(),
            dir.path().join("x").to_str().unwrap(),
            dir.path().join("y").to_str().unwrap(),
        ]);

        let fs = OsLinkFs::new();
        let normalizer = Normalizer::new(&fs, syntax);
        let once = normalizer.normalize(&raw).unwrap().list;
        let twice = normalizer.normalize(&once.serialize(&syntax)).unwrap().list;
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_drops_files() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();

        let fs = OsLinkFs::new();
        let normalized = Normalizer::new(&fs, PathSyntax::native())
            .normalize(file.to_str().unwrap())
            .unwrap();
        assert!(normalized.list.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_normalize_resolves_links() {
        let dir = tempdir().unwrap();
        let real = dir.path().join("real");
        std::fs::create_dir(&real).unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let syntax = PathSyntax::unix();
        let raw = syntax.join(&[link.to_str().unwrap(), real.to_str().unwrap()]);
        let fs = OsLinkFs::new();
        let normalized = Normalizer::new(&fs, syntax).normalize(&raw).unwrap();
        assert_eq!(normalized.list.entries(), &[canonical(&real)]);
    }

    #[test]
    fn test_resolution_failure_skips_only_that_segment() {
        let mut fs = MockLinkFs::new();
        fs.expect_is_dir().returning(|_| Ok(true));
        fs.expect_resolve_link_target().returning(|p: &Path| {
            if p == Path::new("/locked") {
                Err(Error::ResolutionFailure {
                    path: p.to_path_buf(),
                    source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
                })
            } else {
                Ok(PathBuf::from(p))
            }
        });

        let normalized = Normalizer::new(&fs, PathSyntax::unix())
            .normalize("/usr/bin:/locked:/bin")
            .unwrap();

        assert_eq!(normalized.list.entries(), &["/bin", "/usr/bin"]);
        assert_eq!(normalized.skipped.len(), 1);
        assert_eq!(normalized.skipped[0].segment, "/locked");
        assert!(matches!(
            normalized.skipped[0].reason,
            SkipReason::Unresolvable(_)
        ));
    }

    #[test]
    fn test_uninspectable_directory_is_unresolvable() {
        let mut fs = MockLinkFs::new();
        fs.expect_is_dir().returning(|p: &Path| {
            if p == Path::new("/locked/sub") {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
            } else if p == Path::new("/gone") {
                Err(io::Error::new(io::ErrorKind::NotFound, "no such directory"))
            } else {
                Ok(true)
            }
        });
        fs.expect_resolve_link_target()
            .returning(|p: &Path| Ok(PathBuf::from(p)));

        let normalized = Normalizer::new(&fs, PathSyntax::unix())
            .normalize("/locked/sub:/gone:/bin")
            .unwrap();

        assert_eq!(normalized.list.entries(), &["/bin"]);
        assert_eq!(normalized.skipped.len(), 2);
        assert_eq!(normalized.skipped[0].segment, "/locked/sub");
        match &normalized.skipped[0].reason {
            SkipReason::Unresolvable(message) => assert!(message.contains("denied")),
            other => panic!("expected an unresolvable entry, got {other:?}"),
        }
        assert_eq!(normalized.skipped[1].reason, SkipReason::Missing);
    }

    #[test]
    fn test_vanishing_directory_is_missing() {
        let mut fs = MockLinkFs::new();
        fs.expect_is_dir().returning(|_| Ok(true));
        fs.expect_resolve_link_target().returning(|p: &Path| {
            Err(Error::PathNotFound {
                path: p.to_path_buf(),
            })
        });

        let normalized = Normalizer::new(&fs, PathSyntax::unix())
            .normalize("/gone")
            .unwrap();
        assert!(normalized.list.is_empty());
        assert_eq!(normalized.skipped[0].reason, SkipReason::Missing);
    }
}
