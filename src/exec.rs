//! Structured runner for the external tools the pipeline drives.
//!
//! Every invocation blocks until the tool exits and returns an
//! [`ExecResult`]; a non-zero exit becomes a [`ToolError`] carrying the
//! exit status, so callers never inspect `std::process` types directly.

use std::ffi::OsStr;
use std::io::{BufRead as _, BufReader};
use std::path::Path;
use std::process::{Command, Output, Stdio};

use crate::error::ToolError;

/// Result of a command execution.
#[derive(Debug)]
pub struct ExecResult {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Short display name for a tool path, used in log and error messages.
fn label(program: &Path) -> String {
    program
        .file_name()
        .map_or_else(|| program.display().to_string(), |n| n.to_string_lossy().to_string())
}

/// Run a tool to completion in `dir`.
///
/// When `verbose` the tool inherits this process's stdout/stderr and
/// nothing is captured; otherwise both streams are captured and
/// suppressed, and the captured stderr is included in the error on
/// failure.
///
/// # Errors
///
/// [`ToolError::Spawn`] if the tool cannot be started,
/// [`ToolError::NonZeroExit`] if it exits with a non-zero status.
pub fn run_tool(
    program: &Path,
    args: &[&OsStr],
    dir: &Path,
    verbose: bool,
) -> Result<ExecResult, ToolError> {
    let tool = label(program);
    let mut cmd = Command::new(program);
    cmd.args(args).current_dir(dir);

    let result = if verbose {
        let status = cmd.status().map_err(|source| ToolError::Spawn {
            tool: tool.clone(),
            source,
        })?;
        ExecResult {
            stdout: String::new(),
            stderr: String::new(),
            success: status.success(),
            code: status.code(),
        }
    } else {
        let output = cmd.output().map_err(|source| ToolError::Spawn {
            tool: tool.clone(),
            source,
        })?;
        ExecResult::from(output)
    };

    if result.success {
        Ok(result)
    } else {
        Err(ToolError::non_zero(&tool, result.code, &result.stderr))
    }
}

/// Run a tool in `dir`, feeding each line of its stdout to `on_line` as
/// it is produced. Stderr is discarded.
///
/// Used to track docsetutil's indexing progress without interleaving the
/// tool's raw output with our own.
///
/// # Errors
///
/// Same taxonomy as [`run_tool`].
pub fn run_streaming<F>(
    program: &Path,
    args: &[&OsStr],
    dir: &Path,
    mut on_line: F,
) -> Result<ExecResult, ToolError>
where
    F: FnMut(&str),
{
    let tool = label(program);
    let mut child = Command::new(program)
        .args(args)
        .current_dir(dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| ToolError::Spawn {
            tool: tool.clone(),
            source,
        })?;

    let mut captured = String::new();
    if let Some(stdout) = child.stdout.take() {
        for line in BufReader::new(stdout).lines() {
            let line = line.unwrap_or_default();
            on_line(&line);
            captured.push_str(&line);
            captured.push('\n');
        }
    }

    let status = child.wait().map_err(|source| ToolError::Spawn {
        tool: tool.clone(),
        source,
    })?;

    if status.success() {
        Ok(ExecResult {
            stdout: captured,
            stderr: String::new(),
            success: true,
            code: status.code(),
        })
    } else {
        Err(ToolError::non_zero(&tool, status.code(), ""))
    }
}
