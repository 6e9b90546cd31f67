use std::path::PathBuf;

use anyhow::Result;

use super::{Context, Stage};
use crate::bundle::DocsetBundle;

/// Icon shipped with the generator, copied into every bundle.
const ICON: &[u8] = include_bytes!("../../assets/icon.png");

/// Install the icon and patch the bundle's Info.plist for Dash.
///
/// Patching is idempotent and cheap, so this stage always runs — a
/// docset kept from an earlier run still gets its metadata refreshed.
pub struct FinishBundle;

impl Stage for FinishBundle {
    fn name(&self) -> &str {
        "Finish docset bundle"
    }

    fn outputs(&self, _ctx: &Context) -> Vec<PathBuf> {
        Vec::new()
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        let bundle = DocsetBundle::new(ctx.workspace.docset_dir());

        ctx.log.info("Adding the nice dragon icon...");
        bundle.install_icon(ICON)?;

        ctx.log.info("Patching Info.plist file...");
        bundle.patch_info_plist(&ctx.config.version)?;
        Ok(())
    }
}
