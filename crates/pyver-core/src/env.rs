//! Read-only access to environment variables

use std::collections::{BTreeMap, HashMap};

/// Source of environment variables.
///
/// The resolver only ever reads variables, so tests can substitute an
/// in-memory map for the process environment.
pub trait Environment {
    /// Value of `name`, or `None` when unset.
    fn var(&self, name: &str) -> Option<String>;

    /// Value of `name`, treating unset as the empty string.
    fn var_or_empty(&self, name: &str) -> String {
        self.var(name).unwrap_or_default()
    }
}

/// The environment of the current process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl Environment for BTreeMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}
