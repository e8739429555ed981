//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;

/// Set the package version and publish repository from CI environment
/// variables, following the rules in `[tool.version]` of pyproject.toml.
#[derive(Parser, Debug)]
#[command(name = "pyver")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Print the repository to publish to instead of applying the version
    #[arg(long, overrides_with = "no_repo")]
    pub repo: bool,

    /// Apply the version to the project files (default)
    #[arg(long = "no-repo", overrides_with = "repo")]
    pub no_repo: bool,

    /// Show the changes that would be made without writing them
    #[arg(long, conflicts_with = "repo")]
    pub check: bool,

    /// Path to pyproject.toml; searched upwards from the current directory
    /// when omitted
    #[arg(long, env = "PYVER_MANIFEST", value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// What a run does with the resolved version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Print the version and rewrite the project files
    Apply,
    /// Print the version and the diff of each file, write nothing
    Check,
    /// Print only the publish repository
    Repo,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.repo {
            Mode::Repo
        } else if self.check {
            Mode::Check
        } else {
            Mode::Apply
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("pyver").chain(args.iter().copied()))
    }

    #[test]
    fn test_default_mode_applies() {
        assert_eq!(parse(&[]).unwrap().mode(), Mode::Apply);
        assert_eq!(parse(&["--no-repo"]).unwrap().mode(), Mode::Apply);
    }

    #[test]
    fn test_repo_mode() {
        assert_eq!(parse(&["--repo"]).unwrap().mode(), Mode::Repo);
    }

    #[test]
    fn test_last_repo_flag_wins() {
        assert_eq!(parse(&["--repo", "--no-repo"]).unwrap().mode(), Mode::Apply);
        assert_eq!(parse(&["--no-repo", "--repo"]).unwrap().mode(), Mode::Repo);
    }

    #[test]
    fn test_check_mode() {
        assert_eq!(parse(&["--check"]).unwrap().mode(), Mode::Check);
        assert_eq!(parse(&["--check", "--no-repo"]).unwrap().mode(), Mode::Check);
    }

    #[test]
    fn test_check_conflicts_with_repo() {
        let err = parse(&["--check", "--repo"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_manifest_path() {
        let cli = parse(&["--manifest", "sub/pyproject.toml"]).unwrap();
        assert_eq!(cli.manifest, Some(PathBuf::from("sub/pyproject.toml")));
    }
}
