//! Domain-specific error types for the docset generator.
//!
//! Modules that produce errors return typed variants ([`ToolError`],
//! [`TemplateError`], [`BundleError`]); stage and command code at the
//! pipeline boundary converts them to [`anyhow::Error`] via `?`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise from locating and running external tools.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The tool could not be found on `PATH` or at the given path.
    #[error("Could not find {tool}. Provide a path via the --{tool}-path command line option{hint}")]
    NotFound {
        /// Tool name (`doxygen`, `dot`, `docsetutil`).
        tool: String,
        /// Install suggestion appended to the message, e.g.
        /// `" or install doxygen via 'brew install doxygen'"`.
        hint: String,
    },

    /// The tool could not be spawned at all.
    #[error("failed to execute {tool}: {source}")]
    Spawn {
        /// Tool name.
        tool: String,
        /// Underlying OS error.
        source: std::io::Error,
    },

    /// The tool ran but exited with a non-zero status.
    #[error("{tool} failed (exit {code}){detail}")]
    NonZeroExit {
        /// Tool name.
        tool: String,
        /// Exit code, `-1` when terminated by a signal.
        code: i32,
        /// Trimmed stderr, prefixed with `": "`, or empty when nothing
        /// was captured.
        detail: String,
    },
}

impl ToolError {
    /// Build a [`ToolError::NonZeroExit`] from captured process output.
    #[must_use]
    pub fn non_zero(tool: &str, code: Option<i32>, stderr: &str) -> Self {
        let trimmed = stderr.trim();
        Self::NonZeroExit {
            tool: tool.to_string(),
            code: code.unwrap_or(-1),
            detail: if trimmed.is_empty() {
                String::new()
            } else {
                format!(": {trimmed}")
            },
        }
    }
}

/// Errors from filling the doxygen configuration template.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// The template references a placeholder the replacement table does
    /// not know.
    #[error("doxygen config template contains unknown placeholder @{name}@")]
    UnknownPlaceholder {
        /// Placeholder name without the surrounding `@`.
        name: String,
    },

    /// The template file could not be read.
    #[error("failed to read doxygen config template {path}: {source}")]
    Io {
        /// Template path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors from docset bundle assembly and Info.plist patching.
#[derive(Error, Debug)]
pub enum BundleError {
    /// A file doxygen should have generated is absent.
    #[error("doxygen output is missing {path} (was docset generation enabled in the config?)")]
    MissingArtifact {
        /// The absent file.
        path: PathBuf,
    },

    /// An I/O error while copying or rewriting bundle files.
    #[error("bundle operation failed on {path}: {source}")]
    Io {
        /// File or directory the operation touched.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl BundleError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
