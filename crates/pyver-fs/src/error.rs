//! Error types for pyver-fs

use std::path::PathBuf;

/// Result type for pyver-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in pyver-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not find {name} in {} or any parent directory", display_first(.searched))]
    NotFound { name: String, searched: Vec<PathBuf> },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn display_first(paths: &[PathBuf]) -> String {
    paths
        .first()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<none>".to_string())
}
