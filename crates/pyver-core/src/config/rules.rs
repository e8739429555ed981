//! Compiled version rules

use std::path::PathBuf;

use regex::Regex;

use super::manifest::{HandlerSection, MatcherSection, VersionSection};
use crate::env::Environment;
use crate::error::{Error, Result};
use crate::template::Template;

/// Result of checking one matcher against the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The handler owning this matcher does not apply
    Miss,
    /// The matcher succeeded; `override_version` is set only for a
    /// non-empty capture of an `override` matcher
    Hit { override_version: Option<String> },
}

/// A single environment-variable-to-regex check
#[derive(Debug, Clone)]
pub struct Matcher {
    env: String,
    pattern: String,
    regex: Regex,
    validate: bool,
    override_version: bool,
}

impl Matcher {
    /// Compile a matcher. The pattern must match the whole variable value.
    pub fn new(
        env: impl Into<String>,
        pattern: &str,
        validate: bool,
        override_version: bool,
    ) -> Result<Self> {
        let env = env.into();
        if env.is_empty() {
            return Err(Error::config("matcher `env` must not be empty"));
        }
        if validate && override_version {
            return Err(Error::config(format!(
                "matcher on {env} cannot both validate and override the version"
            )));
        }

        let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|e| {
            Error::config(format!("invalid pattern {pattern:?} for {env}: {e}"))
        })?;

        if (validate || override_version) && regex.captures_len() < 2 {
            return Err(Error::config(format!(
                "pattern {pattern:?} for {env} needs a capture group"
            )));
        }

        Ok(Self {
            env,
            pattern: pattern.to_string(),
            regex,
            validate,
            override_version,
        })
    }

    pub fn validates(&self) -> bool {
        self.validate
    }

    pub fn overrides(&self) -> bool {
        self.override_version
    }

    /// Match the current value of the variable, unset counting as empty.
    pub fn evaluate<E: Environment + ?Sized>(&self, env: &E, base_version: &str) -> MatchOutcome {
        let value = env.var_or_empty(&self.env);
        let Some(captures) = self.regex.captures(&value) else {
            tracing::debug!(env = %self.env, pattern = %self.pattern, "matcher missed");
            return MatchOutcome::Miss;
        };
        let group = captures.get(1).map(|m| m.as_str());

        if self.validate && group != Some(base_version) {
            tracing::debug!(
                env = %self.env,
                captured = ?group,
                base_version,
                "captured version does not match the project version"
            );
            return MatchOutcome::Miss;
        }

        let override_version = if self.override_version {
            group.filter(|g| !g.is_empty()).map(str::to_string)
        } else {
            None
        };
        MatchOutcome::Hit { override_version }
    }
}

impl TryFrom<&MatcherSection> for Matcher {
    type Error = Error;

    fn try_from(section: &MatcherSection) -> Result<Self> {
        Self::new(
            section.env.as_str(),
            &section.pattern,
            section.validate,
            section.override_version,
        )
    }
}

/// A rule pairing environment matchers with a repository and version suffix
#[derive(Debug, Clone)]
pub struct Handler {
    matchers: Vec<Matcher>,
    repo: Option<Template>,
    extra: Template,
}

impl Handler {
    /// Build a handler, rejecting more than one validating or overriding
    /// matcher.
    pub fn new(matchers: Vec<Matcher>, repo: Option<Template>, extra: Template) -> Result<Self> {
        if matchers.iter().filter(|m| m.validates()).count() > 1 {
            return Err(Error::config(
                "a handler may validate the version with at most one matcher",
            ));
        }
        if matchers.iter().filter(|m| m.overrides()).count() > 1 {
            return Err(Error::config(
                "a handler may override the version with at most one matcher",
            ));
        }
        Ok(Self {
            matchers,
            repo,
            extra,
        })
    }

    pub fn matchers(&self) -> &[Matcher] {
        &self.matchers
    }

    pub fn repo(&self) -> Option<&Template> {
        self.repo.as_ref()
    }

    pub fn extra(&self) -> &Template {
        &self.extra
    }
}

impl TryFrom<&HandlerSection> for Handler {
    type Error = Error;

    fn try_from(section: &HandlerSection) -> Result<Self> {
        let matchers = section
            .matchers
            .iter()
            .map(Matcher::try_from)
            .collect::<Result<Vec<_>>>()?;
        let repo = section.repo.as_deref().map(Template::parse).transpose()?;
        Self::new(matchers, repo, Template::parse(&section.extra)?)
    }
}

/// Configuration for one resolver run
#[derive(Debug, Clone)]
pub struct VersionConfig {
    /// Version checked into the manifest
    pub base_version: String,
    /// Stamp file, relative to the manifest directory
    pub version_path: Option<PathBuf>,
    pub enforce_pep440: bool,
    /// Handlers in the order they are tried
    pub handlers: Vec<Handler>,
}

impl VersionConfig {
    pub fn from_section(base_version: impl Into<String>, section: &VersionSection) -> Result<Self> {
        let handlers = section
            .handlers
            .iter()
            .enumerate()
            .map(|(index, handler)| {
                Handler::try_from(handler).map_err(|e| match e {
                    Error::Config { message } => {
                        Error::config(format!("handler #{index}: {message}"))
                    }
                    other => other,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            base_version: base_version.into(),
            version_path: section
                .version_path
                .as_deref()
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            enforce_pep440: section.pep440_check,
            handlers,
        })
    }
}
