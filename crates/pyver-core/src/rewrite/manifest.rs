//! Format-preserving update of the manifest version field

use toml_edit::{DocumentMut, Item, Value};

use super::split_line_ending;
use crate::config::VersionSource;
use crate::error::{Error, Result};

/// Replace the version named by `source` in manifest `content`.
///
/// The value keeps its surrounding whitespace and trailing comment, and the
/// lines `toml_edit` did not touch are copied from `content` with their
/// original endings, so only the line holding the version changes.
pub fn set_version(content: &str, source: VersionSource, version: &str) -> Result<String> {
    let mut doc: DocumentMut = content
        .parse()
        .map_err(|e: toml_edit::TomlError| Error::config(format!("failed to parse TOML: {e}")))?;
    let untouched = doc.to_string();

    let mut item: &mut Item = doc.as_item_mut();
    for key in source.table_path() {
        item = item
            .get_mut(*key)
            .ok_or_else(|| missing_field(source))?;
    }

    let value = item
        .get_mut("version")
        .and_then(Item::as_value_mut)
        .filter(|value| value.is_str())
        .ok_or_else(|| missing_field(source))?;

    let decor = value.decor().clone();
    *value = Value::from(version);
    *value.decor_mut() = decor;

    Ok(restore_layout(content, &untouched, &doc.to_string()))
}

/// Carry the edit from `rendered` back onto `content`.
///
/// `toml_edit` renders every line ending as `\n`. When the re-rendered input
/// lines up with `content` line for line, only the lines that differ between
/// `untouched` and `rendered` are taken from `rendered`, keeping the ending of
/// the line they replace. Otherwise the whole rendering is used, converted to
/// CRLF if `content` uses it.
fn restore_layout(content: &str, untouched: &str, rendered: &str) -> String {
    let source: Vec<_> = content.split_inclusive('\n').collect();
    let before: Vec<_> = untouched.split_inclusive('\n').collect();
    let after: Vec<_> = rendered.split_inclusive('\n').collect();

    let aligned = source.len() == before.len()
        && before.len() == after.len()
        && source
            .iter()
            .zip(&before)
            .all(|(src, norm)| split_line_ending(src).0 == split_line_ending(norm).0);

    if !aligned {
        return if content.contains("\r\n") {
            rendered.replace("\r\n", "\n").replace('\n', "\r\n")
        } else {
            rendered.to_string()
        };
    }

    let mut out = String::with_capacity(rendered.len() + source.len());
    for ((src, norm), new) in source.iter().zip(&before).zip(&after) {
        if norm == new {
            out.push_str(src);
        } else {
            let (_, ending) = split_line_ending(src);
            out.push_str(split_line_ending(new).0);
            out.push_str(ending);
        }
    }
    out
}

fn missing_field(source: VersionSource) -> Error {
    Error::config(format!(
        "manifest has no string `{}.version` to update",
        source.table_path().join(".")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_poetry_version_keeps_comment() {
        let content = "[tool.poetry]\nname = \"demo\"\nversion   =   \"1.0.0\"  # bumped by CI\n";
        let updated = set_version(content, VersionSource::Poetry, "1.0.0.dev3").unwrap();
        assert_eq!(
            updated,
            "[tool.poetry]\nname = \"demo\"\nversion   =   \"1.0.0.dev3\"  # bumped by CI\n"
        );
    }

    #[test]
    fn test_set_project_version() {
        let content = "[project]\nversion = \"0.1\"\n";
        let updated = set_version(content, VersionSource::Project, "0.2").unwrap();
        assert_eq!(updated, "[project]\nversion = \"0.2\"\n");
    }

    #[test]
    fn test_set_version_keeps_crlf() {
        let content = "[tool.poetry]\r\nname = \"demo\"\r\nversion = \"1.0\"\r\n\r\n[tool.version]\r\nversion_path = \"x.py\"\r\n";
        let updated = set_version(content, VersionSource::Poetry, "2.0").unwrap();
        assert_eq!(
            updated,
            "[tool.poetry]\r\nname = \"demo\"\r\nversion = \"2.0\"\r\n\r\n[tool.version]\r\nversion_path = \"x.py\"\r\n"
        );
    }

    #[test]
    fn test_set_version_keeps_mixed_endings() {
        let content = "[project]\r\nname = \"demo\"\nversion = \"1.0\"\r\nrequires-python = \">=3.10\"";
        let updated = set_version(content, VersionSource::Project, "1.1").unwrap();
        assert_eq!(
            updated,
            "[project]\r\nname = \"demo\"\nversion = \"1.1\"\r\nrequires-python = \">=3.10\""
        );
    }

    #[test]
    fn test_missing_table() {
        let err = set_version("[project]\nversion = \"0.1\"\n", VersionSource::Poetry, "1")
            .unwrap_err();
        assert!(err.to_string().contains("tool.poetry.version"), "{err}");
    }

    #[test]
    fn test_non_string_version_rejected() {
        let err = set_version("[project]\nversion = 1\n", VersionSource::Project, "2").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
