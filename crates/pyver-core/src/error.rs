//! Error types for pyver-core

/// Result type for pyver-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading rules, resolving or rewriting
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed or contradictory configuration
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// None of the handlers matched the environment
    #[error("No applicable version rule for this build")]
    NoMatchingHandler,

    /// A template referenced a variable that is not set
    #[error("Unbound variable: {name}")]
    UnboundVariable { name: String },

    /// The computed version failed validation
    #[error("Invalid version {version}: {reason}")]
    InvalidVersion { version: String, reason: String },

    /// A repository was requested but the selected handler has none
    #[error("The matching version rule (handler #{handler}) does not declare a repo")]
    MissingRepository { handler: usize },

    /// Filesystem error from pyver-fs
    #[error(transparent)]
    Fs(#[from] pyver_fs::Error),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn invalid_version(version: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.into(),
            reason: reason.into(),
        }
    }
}
