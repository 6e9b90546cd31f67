//! Working-directory layout for one generator run.
//!
//! Every artifact path is derived here and threaded explicitly through
//! the stages; nothing consults the process working directory.

use std::path::{Path, PathBuf};

/// Path arithmetic over the working directory for a given LLVM version.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    version: String,
}

impl Workspace {
    /// Create a workspace rooted at `root` for `version`.
    #[must_use]
    pub fn new(root: PathBuf, version: &str) -> Self {
        Self {
            root,
            version: version.to_string(),
        }
    }

    /// The working directory itself.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `llvm-<version>.src.tar.xz`
    #[must_use]
    pub fn tarball(&self) -> PathBuf {
        self.root.join(format!("llvm-{}.src.tar.xz", self.version))
    }

    /// `llvm-<version>.src/`
    #[must_use]
    pub fn source_dir(&self) -> PathBuf {
        self.root.join(format!("llvm-{}.src", self.version))
    }

    /// `llvm-<version>.src/docs/doxygen.cfg.in` — the template shipped
    /// in the LLVM source tree.
    #[must_use]
    pub fn doxygen_template(&self) -> PathBuf {
        self.source_dir().join("docs").join("doxygen.cfg.in")
    }

    /// `llvm-<version>.src/docs/` — referenced from the rendered config.
    #[must_use]
    pub fn docs_dir(&self) -> PathBuf {
        self.source_dir().join("docs")
    }

    /// `doxygen.cfg` — the rendered configuration.
    #[must_use]
    pub fn doxygen_config(&self) -> PathBuf {
        self.root.join("doxygen.cfg")
    }

    /// `doxygen/html/` — where the rendered config points doxygen's
    /// HTML output.
    #[must_use]
    pub fn html_dir(&self) -> PathBuf {
        self.root.join("doxygen").join("html")
    }

    /// `LLVM.docset/`
    #[must_use]
    pub fn docset_dir(&self) -> PathBuf {
        self.root.join("LLVM.docset")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ws() -> Workspace {
        Workspace::new(PathBuf::from("/work"), "8.0.0")
    }

    #[test]
    fn tarball_name_embeds_version() {
        assert_eq!(
            ws().tarball(),
            PathBuf::from("/work/llvm-8.0.0.src.tar.xz")
        );
    }

    #[test]
    fn source_dir_matches_tarball_stem() {
        assert_eq!(ws().source_dir(), PathBuf::from("/work/llvm-8.0.0.src"));
    }

    #[test]
    fn template_lives_under_docs() {
        assert_eq!(
            ws().doxygen_template(),
            PathBuf::from("/work/llvm-8.0.0.src/docs/doxygen.cfg.in")
        );
    }

    #[test]
    fn html_output_under_doxygen_dir() {
        assert_eq!(ws().html_dir(), PathBuf::from("/work/doxygen/html"));
    }

    #[test]
    fn docset_at_root() {
        assert_eq!(ws().docset_dir(), PathBuf::from("/work/LLVM.docset"));
        assert_eq!(ws().doxygen_config(), PathBuf::from("/work/doxygen.cfg"));
    }
}
