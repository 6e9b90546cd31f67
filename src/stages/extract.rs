use std::path::PathBuf;

use anyhow::{Result, bail};

use super::{Context, Stage};
use crate::archive;

/// Unpack the downloaded tarball into the working directory.
pub struct ExtractSources;

impl Stage for ExtractSources {
    fn name(&self) -> &str {
        "Extract LLVM sources"
    }

    fn outputs(&self, ctx: &Context) -> Vec<PathBuf> {
        vec![ctx.workspace.source_dir()]
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        let tarball = ctx.workspace.tarball();
        let source_dir = ctx.workspace.source_dir();
        ctx.log.info(&format!(
            "Extracting {} into {}...",
            tarball.display(),
            source_dir.display()
        ));

        archive::extract_tar_xz(&tarball, ctx.workspace.root())?;

        // The release tarball is expected to unpack to llvm-<v>.src; a
        // different top-level name would silently break every later stage.
        if !source_dir.exists() {
            bail!(
                "archive did not contain {}",
                source_dir
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default()
            );
        }
        Ok(())
    }
}
