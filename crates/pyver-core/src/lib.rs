//! Version resolution engine for pyver
//!
//! Reads the `[tool.version]` rules of a `pyproject.toml`, selects the first
//! handler whose environment matchers all succeed, computes the build
//! version and plans the rewrites of the manifest and the stamp file.
//!
//! ```
//! use std::collections::HashMap;
//! use std::path::Path;
//! use pyver_core::{Project, resolve};
//!
//! let project = Project::parse(
//!     Path::new("pyproject.toml"),
//!     r#"
//! [tool.poetry]
//! version = "1.1.3"
//!
//! [[tool.version.handlers]]
//! repo = "testpypi"
//! extra = ".dev${CI_PIPELINE_IID}"
//! matchers = [{ env = "CI_COMMIT_BRANCH", pattern = "main" }]
//! "#,
//! )
//! .unwrap();
//!
//! let env = HashMap::from([
//!     ("CI_COMMIT_BRANCH".to_string(), "main".to_string()),
//!     ("CI_PIPELINE_IID".to_string(), "42".to_string()),
//! ]);
//! let resolution = resolve(&project.config, &env).unwrap();
//! assert_eq!(resolution.version, "1.1.3.dev42");
//! assert_eq!(resolution.repository.as_deref(), Some("testpypi"));
//! ```

pub mod config;
pub mod env;
pub mod error;
pub mod pep440;
pub mod resolver;
pub mod rewrite;
pub mod template;

pub use config::{Project, VersionSource};
pub use config::rules::{Handler, Matcher, VersionConfig};
pub use env::{Environment, ProcessEnvironment};
pub use error::{Error, Result};
pub use resolver::{Resolution, resolve};
pub use rewrite::FileRewrite;
pub use template::Template;
