//! Property tests for remote command parsing.

use proptest::prelude::*;

use uploadfiles::domain::value_objects::RemoteCommand;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: exactly one leading `@` is stripped and marks the command.
    #[test]
    fn property_marker_stripped_once(body in "[^@](?s).{0,64}") {
        let marked = RemoteCommand::parse(&format!("@{}", body));
        prop_assert!(marked.ignores_failure());
        prop_assert_eq!(marked.command(), body.as_str());

        let plain = RemoteCommand::parse(&body);
        prop_assert!(!plain.ignores_failure());
        prop_assert_eq!(plain.command(), body.as_str());
    }

    /// PROPERTY: parsing never panics.
    #[test]
    fn property_parse_never_panics(s in "(?s).{0,128}") {
        let _ = RemoteCommand::parse(&s);
    }
}
