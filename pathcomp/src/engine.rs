//! The compression engine.
//!
//! Each round counts ancestors over the current list, picks the ancestor
//! whose replacement by the next alias saves the most characters, and
//! rewrites every entry below it. Rounds continue while a round saves more
//! than the threshold.
//!
//! The rewrite and its savings are computed before the alias is created, so
//! a round that falls under the threshold leaves nothing on disk. A failure
//! while creating an alias aborts the run; aliases from earlier rounds stay
//! where they are.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::alias::AliasDir;
use crate::error::{Error, Result};
use crate::fs::{LinkFs, LinkKind};
use crate::path::ancestors::{ancestors, is_path_prefix};
use crate::path::{char_len, PathSyntax, PrefixCount};
use crate::pathset::{Normalized, Normalizer, PathList};

/// Threshold used when none is configured.
pub const DEFAULT_THRESHOLD: usize = 30;

/// Where a [`Compressor`] is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Nothing requested yet.
    Idle,
    /// Parsing and resolving the raw value.
    Normalizing,
    /// Inside round `round` (1-based).
    RoundActive {
        /// Round number.
        round: usize,
    },
    /// The run finished.
    Done,
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Normalizing => write!(f, "normalizing"),
            Self::RoundActive { round } => write!(f, "round {round}"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// Engine parameters.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Where aliases are created.
    pub aliases: AliasDir,
    /// A round must save strictly more characters than this.
    pub threshold: usize,
    /// Delimiter and separator of the variable.
    pub syntax: PathSyntax,
    /// Only ancestors under one of these may be aliased. Empty means the
    /// root of the alias directory.
    pub link_roots: Vec<String>,
    /// Slot number of the first alias created.
    pub first_slot: usize,
}

impl EngineSettings {
    /// Settings with the default threshold, no explicit link roots, and
    /// numbering from 1.
    #[must_use]
    pub fn new(aliases: AliasDir, syntax: PathSyntax) -> Self {
        Self {
            aliases,
            threshold: DEFAULT_THRESHOLD,
            syntax,
            link_roots: Vec::new(),
            first_slot: 1,
        }
    }

    /// Set the savings threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// Restrict aliasing to ancestors under `roots`.
    #[must_use]
    pub fn with_link_roots(mut self, roots: Vec<String>) -> Self {
        self.link_roots = roots;
        self
    }

    /// Number aliases starting at `slot`.
    #[must_use]
    pub fn with_first_slot(mut self, slot: usize) -> Self {
        self.first_slot = slot;
        self
    }

    /// Check the settings before a run.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a zero threshold or slot, or an
    /// unusable syntax.
    pub fn validate(&self) -> Result<()> {
        if self.threshold == 0 {
            return Err(Error::Validation {
                field: "threshold".into(),
                message: "must be a positive number of characters".into(),
            });
        }
        if self.first_slot == 0 {
            return Err(Error::Validation {
                field: "first_slot".into(),
                message: "alias numbering starts at 1".into(),
            });
        }
        self.syntax.validate()
    }

    /// The roots candidates must lie under: the configured ones, or the
    /// root of the alias directory.
    #[must_use]
    pub fn effective_roots(&self) -> Vec<String> {
        if !self.link_roots.is_empty() {
            return self.link_roots.clone();
        }
        let root = self.aliases.slot_path(0);
        ancestors(&root, self.syntax.dir_separator)
            .pop()
            .into_iter()
            .collect()
    }
}

/// One accepted round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    /// Alias slot number.
    pub slot: usize,
    /// Text of the alias path that replaced `ancestor`.
    pub alias: String,
    /// The ancestor replaced in the list.
    pub ancestor: String,
    /// Where the alias points (the ancestor with links resolved).
    pub target: String,
    /// How many entries the ancestor prefixed.
    pub count: usize,
    /// Characters removed from the serialized value.
    pub savings: usize,
}

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct CompressionReport {
    /// The raw input.
    pub original: String,
    /// The input after normalization.
    pub normalized: Normalized,
    /// The final list.
    pub compressed: PathList,
    /// Accepted rounds in order.
    pub rounds: Vec<Round>,
    syntax: PathSyntax,
}

impl CompressionReport {
    /// Character length of the raw input.
    #[must_use]
    pub fn original_len(&self) -> usize {
        char_len(&self.original)
    }

    /// Character length of the normalized value.
    #[must_use]
    pub fn normalized_len(&self) -> usize {
        self.normalized.list.serialized_len(&self.syntax)
    }

    /// Character length of the compressed value.
    #[must_use]
    pub fn compressed_len(&self) -> usize {
        self.compressed.serialized_len(&self.syntax)
    }

    /// The compressed value as a delimited string.
    #[must_use]
    pub fn compressed_value(&self) -> String {
        self.compressed.serialize(&self.syntax)
    }

    /// The normalized value as a delimited string.
    #[must_use]
    pub fn normalized_value(&self) -> String {
        self.normalized.list.serialize(&self.syntax)
    }

    /// `(alias, target)` for every alias created.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rounds
            .iter()
            .map(|r| (r.alias.as_str(), r.target.as_str()))
    }

    /// Syntax the value was parsed with.
    #[must_use]
    pub fn syntax(&self) -> PathSyntax {
        self.syntax
    }
}

/// The best ancestor to alias in one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// The ancestor directory.
    pub ancestor: String,
    /// Entries it prefixes.
    pub count: usize,
    /// `count × (len(ancestor) − len(alias))`.
    pub score: usize,
}

/// Pick the ancestor with the highest positive score.
///
/// Only ancestors under one of `roots` are eligible (all are when `roots`
/// is empty). Equal scores go to the lexicographically smallest ancestor.
/// Returns `None` when nothing scores above zero.
///
/// # Examples
///
/// ```
/// use pathcomp::engine::select_candidate;
/// use pathcomp::path::PrefixCount;
///
/// let counts = PrefixCount::from_entries(&["/opt/vendor/a", "/opt/vendor/b"], '/');
/// let best = select_candidate(&counts, "/l/1", &["/".to_string()], '/').unwrap();
/// assert_eq!(best.ancestor, "/opt/vendor");
/// assert_eq!(best.score, 2 * (11 - 4));
/// ```
#[must_use]
pub fn select_candidate(
    counts: &PrefixCount,
    alias: &str,
    roots: &[String],
    separator: char,
) -> Option<Candidate> {
    let alias_len = char_len(alias);
    let mut best: Option<Candidate> = None;

    for (ancestor, count) in counts.iter() {
        if !roots.is_empty() && !roots.iter().any(|r| is_path_prefix(r, ancestor, separator)) {
            continue;
        }
        let len = char_len(ancestor);
        if len <= alias_len {
            continue;
        }
        let score = count * (len - alias_len);
        if best.as_ref().map_or(true, |b| score > b.score) {
            best = Some(Candidate {
                ancestor: ancestor.to_string(),
                count,
                score,
            });
        }
    }

    best
}

/// Replace `ancestor` with `alias` in every entry it prefixes.
///
/// Matching is component-aware: `/opt/a` rewrites `/opt/a/bin` but leaves
/// `/opt/ab` alone. Order is preserved.
///
/// # Examples
///
/// ```
/// use pathcomp::engine::rewrite;
/// use pathcomp::pathset::PathList;
///
/// let list = PathList::new(vec!["/opt/a/bin".into(), "/opt/ab".into()]);
/// let out = rewrite(&list, "/opt/a", "/l/1", '/');
/// assert_eq!(out.entries(), &["/l/1/bin", "/opt/ab"]);
/// ```
#[must_use]
pub fn rewrite(list: &PathList, ancestor: &str, alias: &str, separator: char) -> PathList {
    let entries = list
        .entries()
        .iter()
        .map(|entry| match entry.strip_prefix(ancestor) {
            Some(rest) if is_path_prefix(ancestor, entry, separator) => {
                let rest = rest.trim_start_matches(separator);
                if rest.is_empty() {
                    alias.to_string()
                } else {
                    format!("{alias}{separator}{rest}")
                }
            }
            _ => entry.clone(),
        })
        .collect();
    PathList::new(entries)
}

/// Runs compression rounds against a filesystem.
///
/// # Examples
///
/// ```no_run
/// use pathcomp::alias::AliasDir;
/// use pathcomp::engine::{Compressor, EngineSettings};
/// use pathcomp::fs::OsLinkFs;
/// use pathcomp::path::PathSyntax;
///
/// let fs = OsLinkFs::new();
/// let aliases = AliasDir::new("/tmp/links", '/').unwrap();
/// let settings = EngineSettings::new(aliases, PathSyntax::unix()).with_threshold(10);
/// let mut compressor = Compressor::new(&fs, settings);
/// let report = compressor.compress("/usr/bin:/usr/local/bin").unwrap();
/// println!("{}", report.compressed_value());
/// ```
pub struct Compressor<'a, F: LinkFs + ?Sized> {
    fs: &'a F,
    settings: EngineSettings,
    state: EngineState,
}

impl<'a, F: LinkFs + ?Sized> Compressor<'a, F> {
    /// Create an idle compressor.
    #[must_use]
    pub fn new(fs: &'a F, settings: EngineSettings) -> Self {
        Self {
            fs,
            settings,
            state: EngineState::Idle,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// The settings in use.
    #[must_use]
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Normalize `raw` and compress it.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid settings, if a chosen ancestor cannot be
    /// resolved, or if an alias cannot be created.
    pub fn compress(&mut self, raw: &str) -> Result<CompressionReport> {
        self.settings.validate()?;
        self.transition(EngineState::Normalizing);
        let normalized = Normalizer::new(self.fs, self.settings.syntax).normalize(raw)?;
        self.compress_normalized(raw, normalized)
    }

    /// Compress an already normalized list. `raw` is kept for the report.
    ///
    /// # Errors
    ///
    /// Same as [`compress`](Self::compress).
    pub fn compress_normalized(
        &mut self,
        raw: &str,
        normalized: Normalized,
    ) -> Result<CompressionReport> {
        self.settings.validate()?;

        let separator = self.settings.syntax.dir_separator;
        let roots = self.settings.effective_roots();
        let mut current = normalized.list.clone();
        let mut rounds = Vec::new();
        let mut slot = self.settings.first_slot;

        loop {
            self.transition(EngineState::RoundActive {
                round: rounds.len() + 1,
            });

            let alias = self.settings.aliases.slot_path(slot);
            let counts = PrefixCount::from_entries(current.entries(), separator);
            let Some(candidate) = select_candidate(&counts, &alias, &roots, separator) else {
                log::debug!("no ancestor shortens the list by aliasing");
                break;
            };

            let rewritten = rewrite(&current, &candidate.ancestor, &alias, separator);
            let before = current.serialized_len(&self.settings.syntax);
            let after = rewritten.serialized_len(&self.settings.syntax);
            let savings = before.saturating_sub(after);
            if savings <= self.settings.threshold {
                log::debug!(
                    "best candidate {} saves {savings} (threshold {}), stopping",
                    candidate.ancestor,
                    self.settings.threshold
                );
                break;
            }

            let target = self.materialize(&candidate.ancestor, &alias)?;
            log::info!(
                "{alias} -> {target} ({} entries, {savings} characters saved)",
                candidate.count
            );

            rounds.push(Round {
                slot,
                alias,
                ancestor: candidate.ancestor,
                target,
                count: candidate.count,
                savings,
            });
            current = rewritten;
            slot += 1;
        }

        self.transition(EngineState::Done);
        Ok(CompressionReport {
            original: raw.to_string(),
            normalized,
            compressed: current,
            rounds,
            syntax: self.settings.syntax,
        })
    }

    fn materialize(&self, ancestor: &str, alias: &str) -> Result<String> {
        let resolved = self.fs.resolve_link_target(Path::new(ancestor))?;
        let target = resolved
            .to_str()
            .ok_or_else(|| Error::InvalidPath {
                path: resolved.clone(),
                reason: "link target is not valid UTF-8".to_string(),
            })?
            .to_string();

        self.fs
            .create_symlink(&resolved, Path::new(alias), LinkKind::Directory)
            .map_err(|source| Error::AliasCreation {
                link: PathBuf::from(alias),
                target: resolved.clone(),
                source,
            })?;
        Ok(target)
    }

    fn transition(&mut self, next: EngineState) {
        log::debug!("engine: {} -> {next}", self.state);
        self.state = next;
    }
}
