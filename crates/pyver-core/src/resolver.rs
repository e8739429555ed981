//! First-match resolution of the build version

use crate::config::rules::{MatchOutcome, VersionConfig};
use crate::env::Environment;
use crate::error::{Error, Result};
use crate::pep440;

/// Outcome of a resolver run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Version to stamp into the project files
    pub version: String,
    /// Substituted `repo` of the selected handler
    pub repository: Option<String>,
    /// Index of the selected handler
    pub handler: usize,
}

impl Resolution {
    /// The repository, or an error when the selected handler has none.
    pub fn require_repository(&self) -> Result<&str> {
        self.repository
            .as_deref()
            .ok_or(Error::MissingRepository {
                handler: self.handler,
            })
    }
}

/// Select the first handler whose matchers all succeed and compute the
/// version it produces.
pub fn resolve<E: Environment + ?Sized>(config: &VersionConfig, env: &E) -> Result<Resolution> {
    for (index, handler) in config.handlers.iter().enumerate() {
        let mut override_version = None;
        let mut matched = true;

        for matcher in handler.matchers() {
            match matcher.evaluate(env, &config.base_version) {
                MatchOutcome::Miss => {
                    matched = false;
                    break;
                }
                MatchOutcome::Hit {
                    override_version: Some(version),
                } => override_version = Some(version),
                MatchOutcome::Hit { .. } => {}
            }
        }

        if !matched {
            tracing::debug!(handler = index, "handler skipped");
            continue;
        }
        tracing::info!(handler = index, "selected version handler");

        let mut version = override_version.unwrap_or_else(|| config.base_version.clone());
        version.push_str(&handler.extra().render(env)?);

        if config.enforce_pep440 {
            pep440::validate(&version)?;
        }

        let repository = handler.repo().map(|repo| repo.render(env)).transpose()?;

        return Ok(Resolution {
            version,
            repository,
            handler: index,
        });
    }

    Err(Error::NoMatchingHandler)
}
