//! Configuration merging and precedence handling.
//!
//! Every field is replaced wholesale by a higher-precedence source that sets
//! it. `link_roots` is replaced too, not accumulated: a narrower list from a
//! later source has to be able to drop roots allowed earlier.

use crate::config::loader::ConfigSource;
use crate::config::schema::Config;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use pathcomp::config::{Config, ConfigMerger};
///
/// let low = Config { threshold: Some(10), ..Default::default() };
/// let high = Config { threshold: Some(50), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.threshold, Some(50));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();

        for source in sources {
            log::debug!("merging configuration from {}", source.path.display());
            Self::merge_into(&mut result, &source.config);
        }

        result
    }

    /// Merge source config into target (source overwrites target where set).
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.variable.is_some() {
            target.variable.clone_from(&source.variable);
        }

        if source.threshold.is_some() {
            target.threshold = source.threshold;
        }

        if source.work_dir.is_some() {
            target.work_dir.clone_from(&source.work_dir);
        }

        if source.list_delimiter.is_some() {
            target.list_delimiter = source.list_delimiter;
        }

        if source.dir_separator.is_some() {
            target.dir_separator = source.dir_separator;
        }

        if source.link_roots.is_some() {
            target.link_roots.clone_from(&source.link_roots);
        }

        if source.cleanup.is_some() {
            target.cleanup = source.cleanup;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::CleanupPolicy;
    use std::path::PathBuf;

    fn make_source(precedence: u8, config: Config) -> ConfigSource {
        ConfigSource {
            path: PathBuf::from(format!("test-{precedence}.yaml")),
            precedence,
            config,
        }
    }

    #[test]
    fn test_merge_simple_fields() {
        let mut target = Config::default();
        let source = Config {
            variable: Some("MANPATH".to_string()),
            cleanup: Some(CleanupPolicy::Unreferenced),
            ..Default::default()
        };

        ConfigMerger::merge_into(&mut target, &source);
        assert_eq!(target.variable, Some("MANPATH".to_string()));
        assert_eq!(target.cleanup, Some(CleanupPolicy::Unreferenced));
    }

    #[test]
    fn test_merge_overwrites() {
        let mut target = Config {
            work_dir: Some(PathBuf::from("/old")),
            ..Default::default()
        };
        let source = Config {
            work_dir: Some(PathBuf::from("/new")),
            ..Default::default()
        };

        ConfigMerger::merge_into(&mut target, &source);
        assert_eq!(target.work_dir, Some(PathBuf::from("/new")));
    }

    #[test]
    fn test_merge_link_roots_replaced() {
        let mut target = Config {
            link_roots: Some(vec![r"C:\".to_string(), r"D:\".to_string()]),
            ..Default::default()
        };
        let source = Config {
            link_roots: Some(vec![r"D:\".to_string()]),
            ..Default::default()
        };

        ConfigMerger::merge_into(&mut target, &source);
        assert_eq!(target.link_roots, Some(vec![r"D:\".to_string()]));
    }

    #[test]
    fn test_merge_multiple_sources() {
        let sources = vec![
            make_source(
                1,
                Config {
                    threshold: Some(10),
                    list_delimiter: Some(';'),
                    ..Default::default()
                },
            ),
            make_source(
                2,
                Config {
                    threshold: Some(40),
                    ..Default::default()
                },
            ),
        ];

        let merged = ConfigMerger::merge(sources);
        assert_eq!(merged.threshold, Some(40));
        assert_eq!(merged.list_delimiter, Some(';'));
    }

    #[test]
    fn test_merge_none_values_dont_overwrite() {
        let mut target = Config {
            variable: Some("PATH".to_string()),
            dir_separator: Some('/'),
            ..Default::default()
        };

        ConfigMerger::merge_into(&mut target, &Config::default());
        assert_eq!(target.variable, Some("PATH".to_string()));
        assert_eq!(target.dir_separator, Some('/'));
    }
}
