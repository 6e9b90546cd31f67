use std::path::PathBuf;

use anyhow::{Context as _, Result};

use super::{Context, Stage};
use crate::doxygen::{self, RenderOptions};

/// Render `doxygen.cfg` from the template shipped in the LLVM tree.
///
/// Rendering is cheap and depends on the current flags, so this stage
/// declares no outputs and always runs.
pub struct ConfigureDoxygen;

impl Stage for ConfigureDoxygen {
    fn name(&self) -> &str {
        "Configure doxygen"
    }

    fn outputs(&self, _ctx: &Context) -> Vec<PathBuf> {
        Vec::new()
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        let template = ctx.workspace.doxygen_template();
        let docs_dir = ctx.workspace.docs_dir();
        ctx.log
            .info(&format!("Configuring doxygen using {}...", template.display()));

        let options = RenderOptions {
            version: &ctx.config.version,
            dot: &ctx.config.dot,
            docs_dir: &docs_dir,
            verbose: ctx.config.verbose,
            docset: !ctx.config.skip_docset,
        };
        let config = doxygen::render_config_file(&template, &options)?;

        let target = ctx.workspace.doxygen_config();
        std::fs::write(&target, config)
            .with_context(|| format!("failed to write {}", target.display()))?;
        Ok(())
    }
}
