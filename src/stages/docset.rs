use std::path::PathBuf;

use anyhow::{Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;

use super::{Context, Stage};
use crate::bundle::DocsetBundle;
use crate::exec;

/// Assemble `LLVM.docset` from the doxygen output and index it with
/// `docsetutil`.
pub struct PackageDocset;

impl Stage for PackageDocset {
    fn name(&self) -> &str {
        "Package docset"
    }

    fn outputs(&self, ctx: &Context) -> Vec<PathBuf> {
        vec![ctx.workspace.docset_dir()]
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        let docset_dir = ctx.workspace.docset_dir();
        ctx.log.info(&format!(
            "Creating {} (this may take some time)...",
            docset_dir.display()
        ));

        let bundle = DocsetBundle::assemble(&ctx.workspace.html_dir(), docset_dir)?;
        index_bundle(ctx, &bundle)?;
        bundle.remove_index_inputs()?;
        Ok(())
    }
}

/// Run `docsetutil index` over the assembled bundle.
fn index_bundle(ctx: &Context, bundle: &DocsetBundle) -> Result<()> {
    let Some(docsetutil) = ctx.config.docsetutil.as_deref() else {
        // Config::resolve only leaves this unset when docset generation
        // is skipped, in which case this stage is never scheduled.
        bail!("docsetutil is not configured");
    };

    ctx.log.debug(&format!(
        "Running {} index {}",
        docsetutil.display(),
        bundle.root().display()
    ));

    if ctx.config.verbose {
        exec::run_tool(
            docsetutil,
            &["index".as_ref(), bundle.root().as_os_str()],
            ctx.workspace.root(),
            true,
        )?;
    } else {
        let mut progress = IndexProgress::new(ctx.config.quiet);
        exec::run_streaming(
            docsetutil,
            &["index".as_ref(), bundle.root().as_os_str()],
            ctx.workspace.root(),
            |line| progress.observe(line),
        )?;
        progress.finish();
    }
    Ok(())
}

/// Progress tracking over docsetutil's output.
///
/// The tool announces the total as a `"(N nodes)"` line and then prints
/// one line per indexed node; the bar starts on the announcement and
/// advances on every following line.
struct IndexProgress {
    bar: ProgressBar,
    total: Regex,
    started: bool,
}

impl IndexProgress {
    fn new(quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new(0);
            if let Ok(style) = ProgressStyle::with_template("  {bar:32.magenta} {percent}%") {
                bar.set_style(style);
            }
            bar
        };
        Self {
            bar,
            total: Regex::new(r"\((\d+) nodes\)").expect("literal pattern"),
            started: false,
        }
    }

    fn observe(&mut self, line: &str) {
        if self.started {
            self.bar.inc(1);
        } else if let Some(captures) = self.total.captures(line)
            && let Ok(total) = captures[1].parse::<u64>()
        {
            self.bar.set_length(total);
            self.started = true;
        }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::test_helpers::{make_context, write_script};
    use std::path::Path;

    #[test]
    fn satisfied_when_docset_exists() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = make_context(dir.path(), "8.0.0", Path::new("/bin/true"));
        let stage = PackageDocset;

        assert!(!stage.is_satisfied(&ctx));
        std::fs::create_dir_all(ctx.workspace.docset_dir()).unwrap();
        assert!(stage.is_satisfied(&ctx));
    }

    #[test]
    fn index_progress_starts_on_nodes_line() {
        let mut progress = IndexProgress::new(true);
        progress.observe("preparing");
        assert!(!progress.started);
        progress.observe("Indexing documents (42 nodes)");
        assert!(progress.started);
        assert_eq!(progress.bar.length(), Some(42));

        progress.observe("node 1");
        progress.observe("node 2");
        assert_eq!(progress.bar.position(), 2);
        progress.finish();
    }

    #[test]
    fn index_progress_ignores_unparseable_lines() {
        let mut progress = IndexProgress::new(true);
        progress.observe("(not a count)");
        assert!(!progress.started);
    }

    fn seed_html(ctx: &Context) {
        let html = ctx.workspace.html_dir();
        std::fs::create_dir_all(&html).unwrap();
        std::fs::write(html.join("Nodes.xml"), "<nodes/>").unwrap();
        std::fs::write(html.join("Tokens.xml"), "<tokens/>").unwrap();
        std::fs::write(html.join("Info.plist"), "<plist><dict>\n</dict></plist>").unwrap();
        std::fs::write(html.join("index.html"), "<html/>").unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn packages_and_indexes_the_bundle() {
        let dir = tempfile::tempdir().unwrap();
        // Fake docsetutil: verify the subcommand and write the index file.
        let docsetutil = write_script(
            &dir.path().join("fake-docsetutil"),
            r#"[ "$1" = "index" ] || exit 9
mkdir -p "$2/Contents/Resources"
echo "(2 nodes)"
touch "$2/Contents/Resources/docSet.dsidx""#,
        );
        let mut ctx = make_context(dir.path(), "8.0.0", Path::new("/bin/true"));
        ctx.config.docsetutil = Some(docsetutil);
        seed_html(&ctx);

        PackageDocset.run(&ctx).unwrap();

        let docset = ctx.workspace.docset_dir();
        assert!(docset.join("Contents/Resources/docSet.dsidx").exists());
        assert!(docset.join("Contents/Info.plist").exists());
        // Index inputs are working copies only.
        assert!(!docset.join("Contents/Resources/Nodes.xml").exists());
        assert!(!docset.join("Contents/Resources/Tokens.xml").exists());
    }

    #[cfg(unix)]
    #[test]
    fn docsetutil_failure_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let docsetutil = write_script(&dir.path().join("fake-docsetutil"), "exit 4");
        let mut ctx = make_context(dir.path(), "8.0.0", Path::new("/bin/true"));
        ctx.config.docsetutil = Some(docsetutil);
        seed_html(&ctx);

        let err = PackageDocset.run(&ctx).unwrap_err();
        assert!(err.to_string().contains("exit 4"), "got: {err}");
    }
}
