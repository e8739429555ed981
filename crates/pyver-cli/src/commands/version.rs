//! The version command: resolve, report, rewrite

use std::io::Write;

use colored::Colorize;
use pyver_core::{Environment, Project, resolve, rewrite};

use crate::cli::Mode;
use crate::error::Result;

/// Resolve the version of `project` from `env` and act according to `mode`.
///
/// Results go to `out`; the dry-run notice goes to stderr so `out` stays
/// machine-readable.
pub fn run_version<E, W>(project: &Project, mode: Mode, env: &E, out: &mut W) -> Result<()>
where
    E: Environment + ?Sized,
    W: Write,
{
    let resolution = resolve(&project.config, env)?;

    if mode == Mode::Repo {
        writeln!(out, "{}", resolution.require_repository()?)?;
        return Ok(());
    }

    writeln!(
        out,
        "{} version {}",
        project.source.tool_name(),
        resolution.version
    )?;

    let rewrites = rewrite::plan(project, &resolution.version)?;

    if mode == Mode::Check {
        eprintln!("{}", "Note: this run will not apply any changes.".yellow());
        for planned in rewrites.iter().filter(|r| r.is_changed()) {
            write!(out, "{}", planned.unified_diff())?;
        }
        return Ok(());
    }

    for planned in &rewrites {
        planned.apply()?;
    }
    Ok(())
}
