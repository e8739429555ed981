//! Planned rewrites of the manifest and the stamp file
//!
//! Rewrites are computed in memory first so a dry run can show the diff and
//! a real run only touches files whose content changes.

pub mod manifest;
pub mod stamp;

use std::path::PathBuf;

use pyver_fs::io;
use similar::{ChangeTag, TextDiff};

use crate::config::Project;
use crate::error::Result;

/// New content for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRewrite {
    pub path: PathBuf,
    pub original: String,
    pub updated: String,
}

impl FileRewrite {
    pub fn is_changed(&self) -> bool {
        self.original != self.updated
    }

    /// Number of lines in `updated` that differ from `original`.
    pub fn changed_lines(&self) -> usize {
        TextDiff::from_lines(self.original.as_str(), self.updated.as_str())
            .iter_all_changes()
            .filter(|change| change.tag() == ChangeTag::Insert)
            .count()
    }

    /// Unified diff from `original` to `updated`.
    pub fn unified_diff(&self) -> String {
        let name = self.path.display().to_string();
        let diff = TextDiff::from_lines(self.original.as_str(), self.updated.as_str());
        let mut unified = diff.unified_diff();
        unified.context_radius(2).header(&name, &name);
        unified.to_string()
    }

    /// Write `updated` to disk. Returns `false` without writing when the
    /// content is unchanged.
    pub fn apply(&self) -> Result<bool> {
        if !self.is_changed() {
            tracing::debug!(path = %self.path.display(), "content unchanged, not writing");
            return Ok(false);
        }
        io::write_text(&self.path, &self.updated)?;
        tracing::info!(path = %self.path.display(), "rewrote file");
        Ok(true)
    }
}

/// Split a line from `split_inclusive('\n')` into its body and its ending.
pub(crate) fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

/// Compute the manifest and stamp file rewrites for `version`.
pub fn plan(project: &Project, version: &str) -> Result<Vec<FileRewrite>> {
    let mut rewrites = Vec::with_capacity(2);

    let original = io::read_text(&project.manifest_path)?;
    let updated = manifest::set_version(&original, project.source, version)?;
    rewrites.push(FileRewrite {
        path: project.manifest_path.clone(),
        original,
        updated,
    });

    if let Some(path) = project.version_file() {
        let original = io::read_text(&path)?;
        let stamped = stamp::stamp_version(&original, version);
        match stamped.replaced {
            0 => tracing::warn!(
                path = %path.display(),
                "no `__version__ = \"...\"` line found, stamp file left unchanged"
            ),
            1 => {}
            n => tracing::warn!(
                path = %path.display(),
                lines = n,
                "several `__version__` lines found, rewriting all of them"
            ),
        }
        rewrites.push(FileRewrite {
            path,
            original,
            updated: stamped.content,
        });
    }

    Ok(rewrites)
}
