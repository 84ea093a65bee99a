//! Property-based tests for ancestor enumeration and prefix counting.

use super::ancestors::{ancestors, is_path_prefix};
use super::{PathSyntax, PrefixCount};
use proptest::prelude::*;

fn component_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,12}"
}

fn unix_entry_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(component_strategy(), 1..8)
        .prop_map(|parts| format!("/{}", parts.join("/")))
}

fn windows_entry_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(component_strategy(), 1..8)
        .prop_map(|parts| format!(r"C:\{}", parts.join(r"\")))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // The chain starts at the entry, ends at the root, one step per component
    #[test]
    fn ancestors_span_entry_to_root(entry in unix_entry_strategy()) {
        let chain = ancestors(&entry, '/');
        prop_assert_eq!(chain.first().map(String::as_str), Some(entry.as_str()));
        prop_assert_eq!(chain.last().map(String::as_str), Some("/"));
        prop_assert_eq!(chain.len(), entry.matches('/').count() + 1);
    }

    #[test]
    fn windows_ancestors_end_at_drive_root(entry in windows_entry_strategy()) {
        let chain = ancestors(&entry, '\\');
        prop_assert_eq!(chain.last().map(String::as_str), Some(r"C:\"));
    }

    // Every ancestor is a component-aware prefix of the entry
    #[test]
    fn ancestors_are_prefixes(entry in unix_entry_strategy()) {
        for dir in ancestors(&entry, '/') {
            prop_assert!(is_path_prefix(&dir, &entry, '/'));
        }
    }

    // The root prefixes every entry, and no directory outnumbers its parent
    #[test]
    fn counts_shrink_toward_leaves(entries in prop::collection::vec(unix_entry_strategy(), 0..20)) {
        let counts = PrefixCount::from_entries(&entries, '/');
        if entries.is_empty() {
            prop_assert!(counts.is_empty());
        } else {
            prop_assert_eq!(counts.get("/"), entries.len());
        }
        for entry in &entries {
            let chain = ancestors(entry, '/');
            for pair in chain.windows(2) {
                prop_assert!(counts.get(&pair[0]) <= counts.get(&pair[1]));
            }
        }
    }

    #[test]
    fn serialized_len_matches_join(entries in prop::collection::vec(unix_entry_strategy(), 0..20)) {
        let syntax = PathSyntax::unix();
        prop_assert_eq!(syntax.serialized_len(&entries), syntax.join(&entries).chars().count());
    }
}
