//! Blocking HTTP download of the LLVM release tarball.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context as _, Result};
use indicatif::{ProgressBar, ProgressStyle};

/// Release URL for the versioned LLVM source tarball.
#[must_use]
pub fn release_url(version: &str) -> String {
    format!(
        "https://github.com/llvm/llvm-project/releases/download/llvmorg-{version}/llvm-{version}.src.tar.xz"
    )
}

/// Download `url` to `dest`, streaming the body to disk.
///
/// A progress bar is drawn on stderr when the response carries a content
/// length; `quiet` hides it. Redirects are followed; a non-2xx final
/// status or transport error aborts, and `dest` is removed so a later
/// run's skip check does not trust a partial file.
///
/// # Errors
///
/// Any HTTP or I/O failure, with the URL and destination in the context.
pub fn download(url: &str, dest: &Path, quiet: bool) -> Result<()> {
    let result = try_download(url, dest, quiet);
    if result.is_err() {
        let _ = fs::remove_file(dest);
    }
    result
}

fn try_download(url: &str, dest: &Path, quiet: bool) -> Result<()> {
    let mut response = ureq::get(url)
        .call()
        .with_context(|| format!("download failed: {url}"))?;

    let bar = progress_bar(response.body().content_length(), quiet);
    let mut reader = bar.wrap_read(response.body_mut().as_reader());

    let mut file = fs::File::create(dest)
        .with_context(|| format!("failed to create {}", dest.display()))?;
    io::copy(&mut reader, &mut file)
        .with_context(|| format!("failed to write {}", dest.display()))?;
    bar.finish_and_clear();

    Ok(())
}

fn progress_bar(content_length: Option<u64>, quiet: bool) -> ProgressBar {
    match (content_length, quiet) {
        (Some(len), false) => {
            let bar = ProgressBar::new(len);
            if let Ok(style) = ProgressStyle::with_template(
                "  {bar:32.magenta} {bytes}/{total_bytes} ({eta})",
            ) {
                bar.set_style(style);
            }
            bar
        }
        _ => ProgressBar::hidden(),
    }
}
