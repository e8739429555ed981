//! Whole-file reads and locked atomic writes

use std::fs;
use std::io::Write;
use std::path::Path;

use fs2::FileExt;
use tempfile::NamedTempFile;

use crate::{Error, Result};

/// Replace `path` with `content` so readers see either the old or the new
/// file, never a partial one.
///
/// The content goes to a locked temporary file in the target's directory,
/// which is then persisted over `path`. The temporary file is removed on
/// every failure path.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
            parent
        }
        None => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    let lock_failed = || Error::LockFailed {
        path: path.to_path_buf(),
    };

    FileExt::lock_exclusive(temp.as_file()).map_err(|_| lock_failed())?;
    temp.write_all(content)
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|e| Error::io(temp.path(), e))?;
    FileExt::unlock(temp.as_file()).map_err(|_| lock_failed())?;

    temp.persist(path).map_err(|e| Error::io(path, e.error))?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}

/// Read a whole file as UTF-8 text.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}
