//! Filesystem helpers for pyver
//!
//! Locates the project manifest and performs whole-file reads and atomic
//! writes.

pub mod discovery;
pub mod error;
pub mod io;

pub use discovery::{MANIFEST_NAME, find_upwards};
pub use error::{Error, Result};
