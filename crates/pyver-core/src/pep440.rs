//! PEP 440 validation of computed versions

use std::str::FromStr;
use std::sync::LazyLock;

use pep508_rs::pep440_rs::Version;
use regex::Regex;

use crate::error::{Error, Result};

/// Canonical public version form from PEP 440, Appendix B.
static CANONICAL_PUBLIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^([1-9][0-9]*!)?(0|[1-9][0-9]*)(\.(0|[1-9][0-9]*))*((a|b|rc)(0|[1-9][0-9]*))?",
        r"(\.post(0|[1-9][0-9]*))?(\.dev(0|[1-9][0-9]*))?$",
    ))
    .expect("canonical PEP 440 pattern is valid")
});

/// The public part of a version, everything before the local label.
pub fn public_part(version: &str) -> &str {
    version.split_once('+').map_or(version, |(public, _)| public)
}

/// Whether the public part of `version` is written in canonical form.
pub fn is_canonical(version: &str) -> bool {
    CANONICAL_PUBLIC.is_match(public_part(version))
}

/// Check that `version` is a PEP 440 version with a canonical public part.
pub fn validate(version: &str) -> Result<Version> {
    let parsed = Version::from_str(version)
        .map_err(|e| Error::invalid_version(version, e.to_string()))?;

    if !is_canonical(version) {
        return Err(Error::invalid_version(
            version,
            format!(
                "public version {:?} does not conform to canonical PEP 440",
                public_part(version)
            ),
        ));
    }

    Ok(parsed)
}
