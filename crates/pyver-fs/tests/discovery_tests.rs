//! Tests for manifest discovery

use assert_fs::prelude::*;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use pyver_fs::{Error, MANIFEST_NAME, find_upwards};
use rstest::rstest;

#[rstest]
#[case("")]
#[case("src")]
#[case("src/pkg/inner")]
fn test_finds_manifest_from_nested_dirs(#[case] relative: &str) {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child(MANIFEST_NAME)
        .write_str("[tool.poetry]\nversion = \"1.0.0\"\n")
        .unwrap();
    let start = temp.child(relative);
    start.create_dir_all().unwrap();

    let found = find_upwards(start.path(), MANIFEST_NAME).unwrap();

    let expected = dunce::canonicalize(temp.child(MANIFEST_NAME).path()).unwrap();
    assert_eq!(found, expected);
}

#[test]
fn test_closest_manifest_wins() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child(MANIFEST_NAME).write_str("outer = true\n").unwrap();
    temp.child("sub").child(MANIFEST_NAME).write_str("inner = true\n").unwrap();

    let found = find_upwards(temp.child("sub").path(), MANIFEST_NAME).unwrap();

    let content = std::fs::read_to_string(found).unwrap();
    assert!(predicate::str::contains("inner").eval(&content));
}

#[test]
fn test_directory_with_manifest_name_is_skipped() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("custom.toml").write_str("root = true\n").unwrap();
    temp.child("a").child("custom.toml").create_dir_all().unwrap();

    let found = find_upwards(temp.child("a").path(), "custom.toml").unwrap();

    let expected = dunce::canonicalize(temp.child("custom.toml").path()).unwrap();
    assert_eq!(found, expected);
}

#[test]
fn test_not_found_lists_search_path() {
    let temp = assert_fs::TempDir::new().unwrap();
    let err = find_upwards(temp.path(), "definitely-missing-manifest.toml").unwrap_err();

    match err {
        Error::NotFound { name, searched } => {
            assert_eq!(name, "definitely-missing-manifest.toml");
            assert_eq!(searched[0], dunce::canonicalize(temp.path()).unwrap());
            assert!(searched.len() > 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}
