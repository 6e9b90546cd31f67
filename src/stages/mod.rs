//! The generation pipeline: ordered stages with explicit skip-if-exists
//! preconditions.
//!
//! Each stage declares the on-disk artifacts it produces. The executor
//! skips a stage whose outputs all exist, deletes them first under
//! `--clean`, and aborts the whole run on the first stage error.

pub mod configure;
pub mod docset;
pub mod download;
pub mod extract;
pub mod finish;
pub mod generate;

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::config::Config;
use crate::interrupt::InFlightGuard;
use crate::logging::Logger;
use crate::workspace::Workspace;

/// Shared state threaded through every stage.
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub workspace: Workspace,
    pub log: Logger,
}

/// Outcome of executing one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageResult {
    /// The stage ran its side effect.
    Completed,
    /// The stage's outputs already existed and `--clean` was not given.
    Skipped,
}

/// One step of the pipeline.
pub trait Stage {
    /// Human-readable stage name, used for headers and error context.
    fn name(&self) -> &str;

    /// The on-disk artifacts this stage produces. Empty for stages that
    /// are cheap enough to always run.
    fn outputs(&self, ctx: &Context) -> Vec<PathBuf>;

    /// Whether the stage's work is already on disk.
    ///
    /// The default checks that every declared output exists; stages with
    /// no outputs are never satisfied.
    fn is_satisfied(&self, ctx: &Context) -> bool {
        let outputs = self.outputs(ctx);
        !outputs.is_empty() && outputs.iter().all(|p| p.exists())
    }

    /// Perform the stage's side effect.
    ///
    /// # Errors
    ///
    /// Any failure aborts the whole pipeline.
    fn run(&self, ctx: &Context) -> Result<()>;
}

/// Execute a single stage, honoring skip and clean semantics.
///
/// # Errors
///
/// Propagates the stage's error with its name attached.
pub fn execute(stage: &dyn Stage, ctx: &Context) -> Result<StageResult> {
    if stage.is_satisfied(ctx) {
        if ctx.config.clean {
            for path in stage.outputs(ctx) {
                ctx.log.info(&format!("Deleting {}...", path.display()));
                remove_output(&path)
                    .with_context(|| format!("failed to delete {}", path.display()))?;
            }
        } else {
            ctx.log
                .info(&format!("Using existing output of: {}", stage.name()));
            return Ok(StageResult::Skipped);
        }
    }

    ctx.log.stage(stage.name());
    let _guard = InFlightGuard::register(&stage.outputs(ctx));
    stage
        .run(ctx)
        .with_context(|| format!("{} failed", stage.name()))?;
    Ok(StageResult::Completed)
}

fn remove_output(path: &std::path::Path) -> std::io::Result<()> {
    if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    }
}

/// The pipeline for the given configuration, in execution order.
#[must_use]
pub fn pipeline(config: &Config) -> Vec<Box<dyn Stage>> {
    let mut stages: Vec<Box<dyn Stage>> = vec![
        Box::new(download::DownloadTarball),
        Box::new(extract::ExtractSources),
        Box::new(configure::ConfigureDoxygen),
        Box::new(generate::GenerateHtml),
    ];
    if !config.skip_docset {
        stages.push(Box::new(docset::PackageDocset));
        stages.push(Box::new(finish::FinishBundle));
    }
    stages
}

/// Run the whole pipeline, aborting on the first failing stage.
///
/// # Errors
///
/// The first stage error, with the stage name in the context chain.
pub fn run(ctx: &Context) -> Result<()> {
    for stage in pipeline(&ctx.config) {
        execute(stage.as_ref(), ctx)?;
    }
    Ok(())
}

/// Shared helpers for stage unit tests.
#[cfg(test)]
pub mod test_helpers {
    use std::path::{Path, PathBuf};

    use super::Context;
    use crate::config::Config;
    use crate::logging::Logger;
    use crate::workspace::Workspace;

    /// Build a [`Config`] whose tools all point at `tool` and whose
    /// flags are off.
    #[must_use]
    pub fn tool_config(version: &str, tool: &Path) -> Config {
        Config {
            version: version.to_string(),
            clean: false,
            skip_docset: false,
            quiet: true,
            verbose: false,
            doxygen: tool.to_path_buf(),
            dot: tool.to_path_buf(),
            docsetutil: Some(tool.to_path_buf()),
        }
    }

    /// Build a [`Context`] rooted at `root` for `version`.
    #[must_use]
    pub fn make_context(root: &Path, version: &str, tool: &Path) -> Context {
        Context {
            config: tool_config(version, tool),
            workspace: Workspace::new(root.to_path_buf(), version),
            log: Logger::new(),
        }
    }

    /// Write an executable shell script at `path` (unix only).
    #[cfg(unix)]
    pub fn write_script(path: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt as _;
        std::fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
        let mut perms = std::fs::metadata(path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(path, perms).unwrap();
        path.to_path_buf()
    }
}
