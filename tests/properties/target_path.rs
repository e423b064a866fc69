//! Property tests for target path resolution.

use std::path::PathBuf;

use proptest::prelude::*;

use uploadfiles::domain::services::resolve_target_path;

fn file_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9_-][A-Za-z0-9._-]{0,15}")
        .unwrap()
        .prop_filter("not a dot segment", |s| s != "." && s != "..")
}

fn directory() -> impl Strategy<Value = String> {
    let segment = proptest::string::string_regex("[a-z0-9_-]{1,8}").unwrap();
    proptest::collection::vec(segment, 0..=3).prop_map(|segments| segments.join("/"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the resolved target is never empty.
    #[test]
    fn property_target_never_empty(
        target in proptest::option::of("[a-z./]{0,12}"),
        dir in directory(),
        name in file_name(),
    ) {
        let source = PathBuf::from(dir).join(&name);
        prop_assert!(!resolve_target_path(target.as_deref(), &source).is_empty());
    }

    /// PROPERTY: directory-like targets end with the source's file name.
    #[test]
    fn property_directory_target_gets_name(
        prefix in directory(),
        dir in directory(),
        name in file_name(),
    ) {
        let target = if prefix.is_empty() { String::new() } else { format!("{}/", prefix) };
        let source = PathBuf::from(dir).join(&name);
        let resolved = resolve_target_path(Some(&target), &source);
        prop_assert_eq!(resolved, format!("{}{}", target, name));
    }

    /// PROPERTY: a target not ending in `/` is used verbatim.
    #[test]
    fn property_explicit_target_unchanged(
        target in "[a-z0-9._-]{1,16}",
        name in file_name(),
    ) {
        let resolved = resolve_target_path(Some(&target), &PathBuf::from(name));
        prop_assert_eq!(resolved, target);
    }
}
