//! Shared test utilities for the pyver workspace.
//!
//! Dev-dependency only. Provides [`TestProject`], a temporary copy of a
//! project under `test-fixtures/projects/` or one built from scratch.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Path to the workspace `test-fixtures/projects` directory.
pub fn fixtures_dir() -> PathBuf {
    // crates/pyver-test-utils -> ../../test-fixtures
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures/projects")
}

/// A temporary project directory with helpers for setup and assertions.
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Copy `test-fixtures/projects/<name>` into a fresh temporary directory.
    pub fn from_fixture(name: &str) -> Self {
        let project = Self::new();
        let source = fixtures_dir().join(name);
        assert!(
            source.is_dir(),
            "fixture {} does not exist",
            source.display()
        );
        copy_dir(&source, project.root());
        project
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root().join("pyproject.toml")
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> &Self {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
        self
    }

    pub fn read(&self, relative: &str) -> String {
        let path = self.root().join(relative);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }

    /// Lines of `after` that differ from `before`, compared position by
    /// position. Both texts must have the same number of lines.
    pub fn differing_lines<'a>(before: &str, after: &'a str) -> Vec<&'a str> {
        let before: Vec<_> = before.split_inclusive('\n').collect();
        let after: Vec<_> = after.split_inclusive('\n').collect();
        assert_eq!(before.len(), after.len(), "line count changed");
        before
            .iter()
            .zip(after)
            .filter(|(old, new)| *old != new)
            .map(|(_, new)| new)
            .collect()
    }
}

fn copy_dir(source: &Path, target: &Path) {
    fs::create_dir_all(target).unwrap();
    for entry in fs::read_dir(source).unwrap() {
        let entry = entry.unwrap();
        let destination = target.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &destination);
        } else {
            fs::copy(entry.path(), destination).unwrap();
        }
    }
}
