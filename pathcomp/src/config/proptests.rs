//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::Config;
use crate::alias::CleanupPolicy;
use proptest::prelude::*;
use std::path::PathBuf;

fn cleanup_strategy() -> impl Strategy<Value = CleanupPolicy> {
    prop_oneof![Just(CleanupPolicy::Upfront), Just(CleanupPolicy::Unreferenced)]
}

// Strategy for generating configs
fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of("[A-Z_]{1,12}"),
        prop::option::of(1usize..500),
        prop::option::of("/[a-z]{1,10}/[a-z]{1,10}"),
        prop::option::of(prop::collection::vec("/[a-z]{1,6}", 0..3)),
        prop::option::of(cleanup_strategy()),
    )
        .prop_map(|(variable, threshold, work_dir, link_roots, cleanup)| Config {
            variable,
            threshold,
            work_dir: work_dir.map(PathBuf::from),
            link_roots,
            cleanup,
            ..Default::default()
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Set fields of the higher-precedence config always win
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        prop_assert_eq!(result.variable, high.variable.or(low.variable));
        prop_assert_eq!(result.threshold, high.threshold.or(low.threshold));
        prop_assert_eq!(result.work_dir, high.work_dir.or(low.work_dir));
        prop_assert_eq!(result.link_roots, high.link_roots.or(low.link_roots));
        prop_assert_eq!(result.cleanup, high.cleanup.or(low.cleanup));
    }

    // Merging an empty config changes nothing
    #[test]
    fn config_merge_empty_is_identity(config in config_strategy()) {
        let mut result = config.clone();
        ConfigMerger::merge_into(&mut result, &Config::default());
        prop_assert_eq!(result, config);
    }

    // Merging a config into itself changes nothing
    #[test]
    fn config_merge_idempotent(config in config_strategy()) {
        let mut result = config.clone();
        ConfigMerger::merge_into(&mut result, &config);
        prop_assert_eq!(result, config);
    }

    // YAML output parses back to the same config
    #[test]
    fn config_yaml_roundtrip(config in config_strategy()) {
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(parsed, config);
    }
}
