//! Property tests for repository URL normalisation.

use proptest::prelude::*;

use uploadfiles::domain::value_objects::{append_slash, Repository};

fn path_segments() -> impl Strategy<Value = String> {
    let segment = proptest::string::string_regex("[a-z0-9._-]{1,12}").unwrap();
    proptest::collection::vec(segment, 0..=4).prop_map(|segments| segments.join("/"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: `append_slash` always ends in `/` and is idempotent.
    #[test]
    fn property_append_slash_idempotent(s in "(?s).{0,128}") {
        let once = append_slash(&s);
        prop_assert!(once.ends_with('/'));
        prop_assert_eq!(append_slash(&once), once.clone());
        prop_assert!(once.starts_with(&s));
    }

    /// PROPERTY: repository URLs keep their scheme and always end in `/`.
    #[test]
    fn property_repository_url_normalised(
        scheme in prop::sample::select(vec!["file", "scp", "scpexe", "http"]),
        path in path_segments(),
    ) {
        let url = if scheme == "file" {
            format!("file:///srv/{}", path)
        } else {
            format!("{}://example.org/{}", scheme, path)
        };
        let repository = Repository::new("repo", &url).unwrap();
        prop_assert_eq!(repository.protocol(), scheme);
        prop_assert!(repository.url().ends_with('/'));
        prop_assert!(repository.basedir().ends_with('/'));
    }
}
