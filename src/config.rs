//! Invocation configuration: CLI flags plus resolved tool paths.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::error::ToolError;

/// Immutable configuration for one generator run.
///
/// Built once from the parsed CLI arguments; tool paths are resolved
/// up front so a missing executable fails the run before any network
/// or filesystem work happens.
#[derive(Debug, Clone)]
pub struct Config {
    /// LLVM version string, e.g. `8.0.0`.
    pub version: String,
    /// Redo every stage even when its output exists.
    pub clean: bool,
    /// Stop after HTML generation; no `.docset` bundle.
    pub skip_docset: bool,
    /// Suppress all output except errors.
    pub quiet: bool,
    /// Pass tool output through instead of suppressing it.
    pub verbose: bool,
    /// Resolved doxygen executable.
    pub doxygen: PathBuf,
    /// Resolved dot executable (referenced from the doxygen config).
    pub dot: PathBuf,
    /// Resolved docsetutil executable; `None` when docset generation
    /// is skipped and the tool is therefore not needed.
    pub docsetutil: Option<PathBuf>,
}

impl Config {
    /// Resolve the full configuration from parsed arguments.
    ///
    /// # Errors
    ///
    /// [`ToolError::NotFound`] when a required tool is neither given
    /// explicitly nor discoverable on `PATH`.
    pub fn resolve(cli: &Cli) -> Result<Self, ToolError> {
        let doxygen = resolve_tool(
            "doxygen",
            cli.doxygen_path.as_deref(),
            " or install doxygen via 'brew install doxygen'",
        )?;
        let dot = resolve_tool(
            "dot",
            cli.dot_path.as_deref(),
            " or install dot via 'brew install graphviz'",
        )?;
        let docsetutil = if cli.skip_docset_generation {
            None
        } else {
            Some(resolve_tool(
                "docsetutil",
                cli.docsetutil_path.as_deref(),
                "",
            )?)
        };

        Ok(Self {
            version: cli.llvm_version.clone(),
            clean: cli.clean,
            skip_docset: cli.skip_docset_generation,
            quiet: cli.quiet,
            verbose: cli.verbose,
            doxygen,
            dot,
            docsetutil,
        })
    }
}

/// Resolve one tool: an explicit path must exist; otherwise discover
/// the tool on `PATH`.
fn resolve_tool(
    name: &str,
    explicit: Option<&Path>,
    hint: &str,
) -> Result<PathBuf, ToolError> {
    let not_found = || ToolError::NotFound {
        tool: name.to_string(),
        hint: hint.to_string(),
    };

    match explicit {
        Some(path) => {
            if path.exists() {
                Ok(path.to_path_buf())
            } else {
                Err(not_found())
            }
        }
        None => which::which(name).map_err(|_| not_found()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser as _;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(args)
    }

    #[cfg(unix)]
    #[test]
    fn explicit_paths_are_used_verbatim() {
        // /bin/sh stands in for every tool; resolution only checks existence.
        let cli = parse(&[
            "llvm-docset",
            "--doxygen-path",
            "/bin/sh",
            "--dot-path",
            "/bin/sh",
            "--docsetutil-path",
            "/bin/sh",
            "8.0.0",
        ]);
        let config = Config::resolve(&cli).unwrap();
        assert_eq!(config.doxygen, PathBuf::from("/bin/sh"));
        assert_eq!(config.dot, PathBuf::from("/bin/sh"));
        assert_eq!(config.docsetutil, Some(PathBuf::from("/bin/sh")));
        assert_eq!(config.version, "8.0.0");
    }

    #[test]
    fn explicit_path_must_exist() {
        let cli = parse(&[
            "llvm-docset",
            "--doxygen-path",
            "/no/such/doxygen",
            "8.0.0",
        ]);
        let err = Config::resolve(&cli).unwrap_err();
        assert!(matches!(err, ToolError::NotFound { .. }));
        assert!(err.to_string().contains("doxygen"));
    }

    #[cfg(unix)]
    #[test]
    fn docsetutil_not_required_when_skipping_docset() {
        let cli = parse(&[
            "llvm-docset",
            "--doxygen-path",
            "/bin/sh",
            "--dot-path",
            "/bin/sh",
            "--skip-docset-generation",
            "8.0.0",
        ]);
        let config = Config::resolve(&cli).unwrap();
        assert!(config.skip_docset);
        assert!(config.docsetutil.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn docsetutil_required_otherwise() {
        let cli = parse(&[
            "llvm-docset",
            "--doxygen-path",
            "/bin/sh",
            "--dot-path",
            "/bin/sh",
            "--docsetutil-path",
            "/no/such/docsetutil",
            "8.0.0",
        ]);
        let err = Config::resolve(&cli).unwrap_err();
        assert!(err.to_string().contains("docsetutil"));
    }

    #[test]
    fn not_found_message_carries_brew_hint() {
        let err = resolve_tool(
            "doxygen",
            Some(Path::new("/no/such/doxygen")),
            " or install doxygen via 'brew install doxygen'",
        )
        .unwrap_err();
        assert!(err.to_string().contains("brew install doxygen"));
    }
}
