//! Ancestor enumeration and prefix frequency counting.
//!
//! Every entry of a path list contributes one count to each directory on its
//! chain up to the filesystem root, inclusive of the entry itself. The
//! resulting table lets the compression engine score every grouping
//! granularity (root, intermediate, leaf) in one pass whose cost is the
//! number of entries times their average depth.
//!
//! All functions here are purely textual and take the directory separator
//! as a parameter; nothing touches the filesystem.

use std::collections::BTreeMap;

/// List every ancestor of `entry`, starting with the entry and ending with
/// its root.
///
/// Trailing separators are ignored except where they are part of a root
/// (`/`, `C:\`). An entry without any separator is its own only ancestor.
///
/// # Examples
///
/// ```
/// use pathcomp::path::ancestors::ancestors;
///
/// assert_eq!(ancestors("/a/b/c", '/'), vec!["/a/b/c", "/a/b", "/a", "/"]);
/// assert_eq!(
///     ancestors(r"C:\a\b\c", '\\'),
///     vec![r"C:\a\b\c", r"C:\a\b", r"C:\a", r"C:\"]
/// );
/// ```
#[must_use]
pub fn ancestors(entry: &str, separator: char) -> Vec<String> {
    let mut chain = Vec::with_capacity(entry.matches(separator).count() + 1);
    let mut current = strip_trailing(entry, separator);

    loop {
        let body = current.trim_end_matches(separator);
        let is_root = body.len() != current.len();
        chain.push(current.clone());

        if is_root {
            break;
        }

        match body.rfind(separator) {
            Some(idx) => {
                let head = &body[..idx];
                current = if head.contains(separator) {
                    head.to_string()
                } else {
                    format!("{head}{separator}")
                };
            }
            None => break,
        }
    }

    chain
}

/// Drop trailing separators unless they form the root.
fn strip_trailing(entry: &str, separator: char) -> String {
    let trimmed = entry.trim_end_matches(separator);
    if trimmed.len() == entry.len() {
        entry.to_string()
    } else if trimmed.contains(separator) {
        trimmed.to_string()
    } else {
        format!("{trimmed}{separator}")
    }
}

/// Whether `ancestor` is `entry` itself or one of its directories.
///
/// The comparison respects component boundaries: `/a` is a prefix of `/a`
/// and `/a/b` but not of `/ab`.
///
/// # Examples
///
/// ```
/// use pathcomp::path::ancestors::is_path_prefix;
///
/// assert!(is_path_prefix("/a", "/a/b", '/'));
/// assert!(is_path_prefix("/", "/a", '/'));
/// assert!(!is_path_prefix("/a", "/ab", '/'));
/// ```
#[must_use]
pub fn is_path_prefix(ancestor: &str, entry: &str, separator: char) -> bool {
    match entry.strip_prefix(ancestor) {
        Some("") => true,
        Some(rest) => ancestor.ends_with(separator) || rest.starts_with(separator),
        None => false,
    }
}

/// How many path entries each ancestor directory prefixes.
///
/// Keys iterate in ascending lexicographic order, which also fixes the
/// enumeration order the engine uses for tie-breaking.
///
/// # Examples
///
/// ```
/// use pathcomp::path::PrefixCount;
///
/// let counts = PrefixCount::from_entries(&["/a/b/c", "/a/b/d", "/a/d/c"], '/');
/// assert_eq!(counts.get("/"), 3);
/// assert_eq!(counts.get("/a/b"), 2);
/// assert_eq!(counts.get("/missing"), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixCount {
    table: BTreeMap<String, usize>,
}

impl PrefixCount {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the ancestors of every entry.
    #[must_use]
    pub fn from_entries<S: AsRef<str>>(entries: &[S], separator: char) -> Self {
        let mut counts = Self::new();
        for entry in entries {
            for dir in ancestors(entry.as_ref(), separator) {
                counts.increment(dir);
            }
        }
        counts
    }

    /// Add one to the count for `dir`, starting from zero if absent.
    pub fn increment(&mut self, dir: impl Into<String>) {
        *self.table.entry(dir.into()).or_insert(0) += 1;
    }

    /// Count for `dir`, zero when it never occurred.
    #[must_use]
    pub fn get(&self, dir: &str) -> usize {
        self.table.get(dir).copied().unwrap_or(0)
    }

    /// Number of distinct ancestors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether no entry was counted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Iterate over `(ancestor, count)` in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.table.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// The `n` most frequent ancestors; ties keep lexicographic order.
    #[must_use]
    pub fn top(&self, n: usize) -> Vec<(&str, usize)> {
        let mut all: Vec<(&str, usize)> = self.iter().collect();
        all.sort_by(|a, b| b.1.cmp(&a.1));
        all.truncate(n);
        all
    }
}
