//! Rewrite of the `__version__ = "..."` line in the stamp file

use std::sync::LazyLock;

use regex::Regex;

use super::split_line_ending;

static VERSION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^__version__ = "[^"]*".*$"#).expect("version line pattern is valid")
});

/// Stamp file content after rewriting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamped {
    pub content: String,
    /// Number of lines that matched and were rewritten
    pub replaced: usize,
}

/// The line written in place of every matching version line.
pub fn stamp_line(version: &str) -> String {
    format!("__version__ = \"{version}\"  # Auto-generated")
}

const BOM: char = '\u{feff}';

/// Replace every `__version__ = "..."` line of `content` with
/// [`stamp_line`]. Other lines, all line endings and a leading byte order
/// mark are kept as-is.
pub fn stamp_version(content: &str, version: &str) -> Stamped {
    let replacement = stamp_line(version);
    let mut out = String::with_capacity(content.len() + replacement.len());
    let mut replaced = 0;

    let text = match content.strip_prefix(BOM) {
        Some(rest) => {
            out.push(BOM);
            rest
        }
        None => content,
    };

    for line in text.split_inclusive('\n') {
        let (body, ending) = split_line_ending(line);
        if VERSION_LINE.is_match(body) {
            out.push_str(&replacement);
            out.push_str(ending);
            replaced += 1;
        } else {
            out.push_str(line);
        }
    }

    Stamped {
        content: out,
        replaced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stamp_replaces_only_version_line() {
        let content = "\"\"\"Demo.\"\"\"\n__version__ = \"0.0.0\"\n__all__ = []\n";
        let stamped = stamp_version(content, "1.2.3");
        assert_eq!(
            stamped.content,
            "\"\"\"Demo.\"\"\"\n__version__ = \"1.2.3\"  # Auto-generated\n__all__ = []\n"
        );
        assert_eq!(stamped.replaced, 1);
    }

    #[test]
    fn test_stamp_replaces_trailing_comment() {
        let stamped = stamp_version("__version__ = \"1\"  # Auto-generated", "2");
        assert_eq!(stamped.content, "__version__ = \"2\"  # Auto-generated");
    }

    #[test]
    fn test_stamp_keeps_crlf() {
        let stamped = stamp_version("a\r\n__version__ = \"1\"\r\nb\r\n", "2");
        assert_eq!(
            stamped.content,
            "a\r\n__version__ = \"2\"  # Auto-generated\r\nb\r\n"
        );
    }

    #[test]
    fn test_stamp_keeps_byte_order_mark() {
        let stamped = stamp_version("\u{feff}__version__ = \"1\"\nx = 1\n", "2");
        assert_eq!(
            stamped.content,
            "\u{feff}__version__ = \"2\"  # Auto-generated\nx = 1\n"
        );
        assert_eq!(stamped.replaced, 1);
    }

    #[test]
    fn test_indented_or_spaced_lines_do_not_match() {
        let content = "    __version__ = \"1\"\n__version__=\"1\"\n";
        let stamped = stamp_version(content, "2");
        assert_eq!(stamped.content, content);
        assert_eq!(stamped.replaced, 0);
    }

    #[test]
    fn test_every_duplicate_is_rewritten() {
        let stamped = stamp_version("__version__ = \"1\"\n__version__ = \"1\"\n", "2");
        assert_eq!(stamped.replaced, 2);
    }
}
