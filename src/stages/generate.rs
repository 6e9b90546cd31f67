use std::path::PathBuf;

use anyhow::Result;

use super::{Context, Stage};
use crate::exec;

/// Run doxygen over the rendered configuration.
pub struct GenerateHtml;

impl Stage for GenerateHtml {
    fn name(&self) -> &str {
        "Generate HTML documentation"
    }

    fn outputs(&self, ctx: &Context) -> Vec<PathBuf> {
        vec![ctx.workspace.html_dir()]
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        let config_file = ctx.workspace.doxygen_config();
        ctx.log
            .info("Generating HTML documentation (this may take some time)...");
        ctx.log.debug(&format!(
            "Running {} {}",
            ctx.config.doxygen.display(),
            config_file.display()
        ));

        exec::run_tool(
            &ctx.config.doxygen,
            &[config_file.as_os_str()],
            ctx.workspace.root(),
            ctx.config.verbose,
        )?;
        Ok(())
    }
}
