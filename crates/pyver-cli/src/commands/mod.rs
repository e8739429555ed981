//! Command implementations for pyver-cli

pub mod version;

pub use version::run_version;
