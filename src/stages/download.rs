use std::path::PathBuf;

use anyhow::Result;

use super::{Context, Stage};
use crate::fetch;

/// Fetch the versioned LLVM source tarball from the release page.
pub struct DownloadTarball;

impl Stage for DownloadTarball {
    fn name(&self) -> &str {
        "Download LLVM tarball"
    }

    fn outputs(&self, ctx: &Context) -> Vec<PathBuf> {
        vec![ctx.workspace.tarball()]
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        let tarball = ctx.workspace.tarball();
        let url = fetch::release_url(&ctx.config.version);
        ctx.log.info(&format!(
            "Downloading {} from {url}...",
            tarball.display()
        ));
        fetch::download(&url, &tarball, ctx.config.quiet)
    }
}
