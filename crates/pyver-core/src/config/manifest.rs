//! Raw `pyproject.toml` sections as written on disk
//!
//! These types only mirror the TOML layout. Regexes and templates are
//! compiled later by [`super::rules`].

use serde::Deserialize;

use crate::error::{Error, Result};

fn default_pep440_check() -> bool {
    true
}

/// The parts of `pyproject.toml` that pyver reads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PyProject {
    #[serde(default)]
    pub tool: ToolTable,

    /// PEP 621 metadata, used when `[tool.poetry]` has no version
    pub project: Option<VersionedTable>,
}

/// `[tool]`, other tools' tables are ignored
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolTable {
    pub poetry: Option<VersionedTable>,

    pub version: Option<VersionSection>,
}

/// Any table carrying a `version` string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VersionedTable {
    pub version: Option<String>,
}

/// `[tool.version]`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionSection {
    /// File whose `__version__ = "..."` line gets stamped
    pub version_path: Option<String>,

    /// Require the final version to be canonical PEP 440
    #[serde(default = "default_pep440_check")]
    pub pep440_check: bool,

    /// Rules in the order they are tried
    #[serde(default)]
    pub handlers: Vec<HandlerSection>,
}

impl Default for VersionSection {
    fn default() -> Self {
        Self {
            version_path: None,
            pep440_check: default_pep440_check(),
            handlers: Vec::new(),
        }
    }
}

/// One `[[tool.version.handlers]]` entry
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HandlerSection {
    pub repo: Option<String>,

    #[serde(default)]
    pub extra: String,

    #[serde(default)]
    pub matchers: Vec<MatcherSection>,
}

/// One entry of a handler's `matchers` list
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatcherSection {
    pub env: String,

    #[serde(default)]
    pub pattern: String,

    #[serde(default)]
    pub validate: bool,

    #[serde(default, rename = "override")]
    pub override_version: bool,
}

impl PyProject {
    /// Parse manifest content
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("failed to parse TOML: {e}")))
    }
}
