//! Template substitution, including the append/substitute property

use std::collections::HashMap;

use proptest::prelude::*;
use pyver_core::template::{Template, expand};
use pyver_core::Error;
use rstest::rstest;

fn env() -> HashMap<String, String> {
    HashMap::from([
        ("IID".to_string(), "123".to_string()),
        ("SHA".to_string(), "deadbeefcafe".to_string()),
        ("EMPTY".to_string(), String::new()),
    ])
}

#[rstest]
#[case("${IID}", "123")]
#[case("$IID", "123")]
#[case(".dev$IID.x", ".dev123.x")]
#[case("${SHA:0:8}", "deadbeef")]
#[case("${SHA:4}", "beefcafe")]
#[case("${SHA:4:100}", "beefcafe")]
#[case("${SHA:100}", "")]
#[case("${SHA:2:0}", "")]
#[case("${EMPTY}", "")]
#[case("${EMPTY:-fallback}", "fallback")]
#[case("${UNSET:-fallback}", "fallback")]
#[case("${UNSET:-}", "")]
#[case("100$", "100$")]
fn test_expand(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(expand(source, &env()).unwrap(), expected);
}

#[rstest]
#[case("${UNSET}")]
#[case("$UNSET")]
#[case("${UNSET:0:3}")]
fn test_unbound_reports_single_error_kind(#[case] source: &str) {
    let err = expand(source, &env()).unwrap_err();
    match err {
        Error::UnboundVariable { name } => assert_eq!(name, "UNSET"),
        other => panic!("unexpected error for {source}: {other}"),
    }
}

#[test]
fn test_display_round_trips_source() {
    let template = Template::parse(".dev${IID}").unwrap();
    assert_eq!(template.to_string(), ".dev${IID}");
}

fn template_piece() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z0-9.+]{0,4}",
        Just("${IID}".to_string()),
        Just("${SHA:1:3}".to_string()),
        Just("${EMPTY:-x}".to_string()),
    ]
}

proptest! {
    #[test]
    fn test_append_then_substitute_equals_substitute_then_append(
        base in "[0-9]{1,3}(\\.[0-9]{1,3}){0,2}",
        pieces in prop::collection::vec(template_piece(), 0..5),
    ) {
        let extra = pieces.concat();
        let env = env();

        let substituted_first = format!("{base}{}", expand(&extra, &env).unwrap());
        let appended_first = expand(&format!("{base}{extra}"), &env).unwrap();

        prop_assert_eq!(substituted_first, appended_first);
    }
}
