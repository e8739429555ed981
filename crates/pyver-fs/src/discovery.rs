//! Manifest discovery

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// File name of the project manifest.
pub const MANIFEST_NAME: &str = "pyproject.toml";

/// Find `name` in `start` or the closest ancestor that contains it.
///
/// `start` is canonicalized first so relative paths and symlinks resolve the
/// same way the shell does. Only regular files count as a match.
pub fn find_upwards(start: &Path, name: &str) -> Result<PathBuf> {
    let start = dunce::canonicalize(start).map_err(|e| Error::io(start, e))?;
    let mut searched = Vec::new();

    for dir in start.ancestors() {
        let candidate = dir.join(name);
        tracing::trace!(path = %candidate.display(), "looking for manifest");
        if candidate.is_file() {
            return Ok(candidate);
        }
        searched.push(dir.to_path_buf());
    }

    Err(Error::NotFound {
        name: name.to_string(),
        searched,
    })
}
