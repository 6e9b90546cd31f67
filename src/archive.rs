//! Extraction of the xz-compressed LLVM source tarball.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context as _, Result};
use tar::Archive;
use xz2::read::XzDecoder;

/// Unpack `tarball` (a `.tar.xz`) into `dest`.
///
/// Entry paths are resolved relative to `dest`; `tar` refuses entries
/// that would escape it.
///
/// # Errors
///
/// A corrupt archive, short read, or filesystem error (permissions,
/// disk full) aborts with the tarball path in the context.
pub fn extract_tar_xz(tarball: &Path, dest: &Path) -> Result<()> {
    let file = File::open(tarball)
        .with_context(|| format!("failed to open {}", tarball.display()))?;
    let decoder = XzDecoder::new(BufReader::new(file));
    let mut archive = Archive::new(decoder);
    archive
        .unpack(dest)
        .with_context(|| format!("failed to extract {}", tarball.display()))?;
    Ok(())
}
