//! Project configuration loaded from `pyproject.toml`
//!
//! [`manifest`] holds the raw serde view of the file, [`rules`] the compiled
//! handlers the resolver runs. [`Project`] ties both to a manifest location.

pub mod manifest;
pub mod rules;

use std::path::{Path, PathBuf};

use pyver_fs::{MANIFEST_NAME, find_upwards, io};

use crate::error::{Error, Result};
use manifest::PyProject;
use rules::VersionConfig;

/// Which manifest field holds the project version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSource {
    /// `[tool.poetry] version`
    Poetry,
    /// `[project] version`
    Project,
}

impl VersionSource {
    /// Tables leading to the `version` key
    pub fn table_path(self) -> &'static [&'static str] {
        match self {
            Self::Poetry => &["tool", "poetry"],
            Self::Project => &["project"],
        }
    }

    /// Name used when reporting the new version
    pub fn tool_name(self) -> &'static str {
        match self {
            Self::Poetry => "poetry",
            Self::Project => "project",
        }
    }
}

/// A loaded project: where the manifest lives and what it configures
#[derive(Debug, Clone)]
pub struct Project {
    pub manifest_path: PathBuf,
    /// Directory of the manifest; relative config paths start here
    pub root: PathBuf,
    pub source: VersionSource,
    pub config: VersionConfig,
}

impl Project {
    /// Find `pyproject.toml` in `start` or its ancestors and load it.
    pub fn discover(start: &Path) -> Result<Self> {
        let path = find_upwards(start, MANIFEST_NAME)?;
        Self::load(&path)
    }

    /// Load the manifest at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = io::read_text(path)?;
        Self::parse(path, &content).map_err(|e| match e {
            Error::Config { message } => {
                Error::config(format!("{}: {message}", path.display()))
            }
            other => other,
        })
    }

    /// Build a project from manifest content read from `manifest_path`.
    pub fn parse(manifest_path: &Path, content: &str) -> Result<Self> {
        let pyproject = PyProject::parse(content)?;

        let (source, base_version) = match (
            pyproject.tool.poetry.and_then(|t| t.version),
            pyproject.project.and_then(|t| t.version),
        ) {
            (Some(version), _) => (VersionSource::Poetry, version),
            (None, Some(version)) => (VersionSource::Project, version),
            (None, None) => {
                return Err(Error::config(
                    "no version found in [tool.poetry] or [project]",
                ));
            }
        };

        let section = pyproject.tool.version.unwrap_or_default();
        let config = VersionConfig::from_section(base_version, &section)?;
        tracing::debug!(
            manifest = %manifest_path.display(),
            base_version = %config.base_version,
            handlers = config.handlers.len(),
            "loaded version configuration"
        );

        let root = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Ok(Self {
            manifest_path: manifest_path.to_path_buf(),
            root,
            source,
            config,
        })
    }

    /// Absolute location of the stamp file, if one is configured.
    pub fn version_file(&self) -> Option<PathBuf> {
        self.config
            .version_path
            .as_ref()
            .map(|path| self.root.join(path))
    }
}
