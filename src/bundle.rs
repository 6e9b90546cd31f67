//! The `.docset` bundle: assembly from doxygen output, Info.plist
//! patching, and icon installation.
//!
//! Info.plist handling is deliberately textual. Doxygen emits the file
//! in a fixed format, and Dash only needs a handful of keys rewritten,
//! so a full plist round-trip buys nothing.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::BundleError;

/// Keys patched into the bundle's Info.plist.
const PLIST_KEYS: [(&str, &str); 4] = [
    ("CFBundleIdentifier", "org.doxygen.LLVM"),
    ("DocSetPlatformFamily", "llvm"),
    ("dashIndexFilePath", "index.html"),
    // Dash online redirection, https://kapeli.com/docsets#onlineRedirection
    ("DashDocSetFallbackURL", "https://llvm.org/doxygen/"),
];

/// Path helpers and operations over one `.docset` bundle.
#[derive(Debug, Clone)]
pub struct DocsetBundle {
    root: PathBuf,
}

impl DocsetBundle {
    /// Wrap an existing (or about to be created) bundle directory.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The bundle directory itself.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `Contents/`
    #[must_use]
    pub fn contents(&self) -> PathBuf {
        self.root.join("Contents")
    }

    /// `Contents/Resources/`
    #[must_use]
    pub fn resources(&self) -> PathBuf {
        self.contents().join("Resources")
    }

    /// `Contents/Resources/Documents/`
    #[must_use]
    pub fn documents(&self) -> PathBuf {
        self.resources().join("Documents")
    }

    /// `Contents/Info.plist`
    #[must_use]
    pub fn info_plist(&self) -> PathBuf {
        self.contents().join("Info.plist")
    }

    /// The `Nodes.xml`/`Tokens.xml` working copies docsetutil indexes
    /// from; deleted again after indexing.
    #[must_use]
    pub fn index_inputs(&self) -> [PathBuf; 2] {
        [
            self.resources().join("Nodes.xml"),
            self.resources().join("Tokens.xml"),
        ]
    }

    /// Assemble the bundle from a doxygen HTML output directory.
    ///
    /// Doxygen (with `GENERATE_DOCSET = YES`) leaves `Nodes.xml`,
    /// `Tokens.xml` and `Info.plist` next to the HTML. Those three move
    /// into their bundle locations; everything else is copied under
    /// `Contents/Resources/Documents`.
    ///
    /// # Errors
    ///
    /// [`BundleError::MissingArtifact`] when one of the three docset
    /// files is absent from `html_dir`, [`BundleError::Io`] on copy
    /// failures.
    pub fn assemble(html_dir: &Path, root: PathBuf) -> Result<Self, BundleError> {
        let bundle = Self::new(root);

        let nodes = html_dir.join("Nodes.xml");
        let tokens = html_dir.join("Tokens.xml");
        let plist = html_dir.join("Info.plist");
        for artifact in [&nodes, &tokens, &plist] {
            if !artifact.exists() {
                return Err(BundleError::MissingArtifact {
                    path: artifact.clone(),
                });
            }
        }

        let resources = bundle.resources();
        fs::create_dir_all(&resources).map_err(|e| BundleError::io(&resources, e))?;

        for (src, dst) in [
            (&nodes, resources.join("Nodes.xml")),
            (&tokens, resources.join("Tokens.xml")),
            (&plist, bundle.info_plist()),
        ] {
            fs::copy(src, &dst).map_err(|e| BundleError::io(&dst, e))?;
        }

        copy_tree(
            html_dir,
            &bundle.documents(),
            &["Nodes.xml", "Tokens.xml", "Info.plist"],
        )?;

        Ok(bundle)
    }

    /// Delete the `Nodes.xml`/`Tokens.xml` working copies.
    ///
    /// # Errors
    ///
    /// [`BundleError::Io`] when a copy exists but cannot be removed.
    pub fn remove_index_inputs(&self) -> Result<(), BundleError> {
        for path in self.index_inputs() {
            if path.exists() {
                fs::remove_file(&path).map_err(|e| BundleError::io(&path, e))?;
            }
        }
        Ok(())
    }

    /// Write the icon bytes to `icon.png` in the bundle root.
    ///
    /// # Errors
    ///
    /// [`BundleError::Io`] on write failure.
    pub fn install_icon(&self, bytes: &[u8]) -> Result<(), BundleError> {
        let path = self.root.join("icon.png");
        fs::write(&path, bytes).map_err(|e| BundleError::io(&path, e))
    }

    /// Patch the bundle's Info.plist for Dash.
    ///
    /// # Errors
    ///
    /// [`BundleError::Io`] when the plist cannot be read or written.
    pub fn patch_info_plist(&self, version: &str) -> Result<(), BundleError> {
        let path = self.info_plist();
        let text = fs::read_to_string(&path).map_err(|e| BundleError::io(&path, e))?;
        let patched = patch_plist_text(&text, version);
        fs::write(&path, patched).map_err(|e| BundleError::io(&path, e))
    }
}

/// Rewrite the Dash-relevant keys in plist `text`.
///
/// A key already present has its `<string>` value replaced in place; a
/// missing key is inserted before the closing `</dict>`. The bundle name
/// embeds the version so the docset is identifiable in Dash's list.
#[must_use]
pub fn patch_plist_text(text: &str, version: &str) -> String {
    let bundle_name = format!("LLVM {version}");
    let mut result = text.to_string();
    for (key, value) in PLIST_KEYS {
        result = upsert_key(&result, key, value);
    }
    result = upsert_key(&result, "CFBundleName", &bundle_name);
    result
}

fn upsert_key(text: &str, key: &str, value: &str) -> String {
    // Keys are plain identifiers; no regex escaping needed.
    let pattern = format!(r"<key>{key}</key>\s*<string>[^<]*</string>");
    let replacement = format!("<key>{key}</key>\n\t<string>{value}</string>");

    if let Ok(re) = Regex::new(&pattern)
        && re.is_match(text)
    {
        return re.replace(text, replacement.as_str()).into_owned();
    }

    match text.rfind("</dict>") {
        Some(pos) => {
            let mut patched = String::with_capacity(text.len() + replacement.len() + 2);
            patched.push_str(&text[..pos]);
            patched.push('\t');
            patched.push_str(&replacement);
            patched.push('\n');
            patched.push_str(&text[pos..]);
            patched
        }
        // Not a plist we recognise; leave it untouched rather than
        // corrupt it.
        None => text.to_string(),
    }
}

/// Recursively copy `src` into `dst`, skipping top-level entries named
/// in `exclude`.
fn copy_tree(src: &Path, dst: &Path, exclude: &[&str]) -> Result<(), BundleError> {
    fs::create_dir_all(dst).map_err(|e| BundleError::io(dst, e))?;
    let entries = fs::read_dir(src).map_err(|e| BundleError::io(src, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| BundleError::io(src, e))?;
        let name = entry.file_name();
        if exclude.iter().any(|x| name.to_string_lossy() == *x) {
            continue;
        }
        let from = entry.path();
        let to = dst.join(&name);
        let file_type = entry.file_type().map_err(|e| BundleError::io(&from, e))?;
        if file_type.is_dir() {
            copy_tree(&from, &to, &[])?;
        } else {
            fs::copy(&from, &to).map_err(|e| BundleError::io(&to, e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
	<key>CFBundleName</key>
	<string>LLVM</string>
	<key>DocSetPlatformFamily</key>
	<string>doxygen</string>
</dict>
</plist>
"#;

    #[test]
    fn patch_rewrites_existing_keys() {
        let patched = patch_plist_text(SAMPLE_PLIST, "8.0.0");
        assert!(patched.contains("<string>llvm</string>"));
        assert!(!patched.contains("<string>doxygen</string>"));
    }

    #[test]
    fn patch_embeds_version_in_bundle_name() {
        let patched = patch_plist_text(SAMPLE_PLIST, "8.0.0");
        assert!(patched.contains("<string>LLVM 8.0.0</string>"));
    }

    #[test]
    fn patch_inserts_missing_keys_inside_dict() {
        let patched = patch_plist_text(SAMPLE_PLIST, "8.0.0");
        assert!(patched.contains("<key>CFBundleIdentifier</key>"));
        assert!(patched.contains("<string>org.doxygen.LLVM</string>"));
        assert!(patched.contains("<key>DashDocSetFallbackURL</key>"));
        assert!(patched.contains("<string>https://llvm.org/doxygen/</string>"));
        assert!(patched.contains("<key>dashIndexFilePath</key>"));
        let dict_end = patched.rfind("</dict>").unwrap();
        let key_pos = patched.find("<key>DashDocSetFallbackURL</key>").unwrap();
        assert!(key_pos < dict_end, "inserted keys must precede </dict>");
    }

    #[test]
    fn patch_is_idempotent() {
        let once = patch_plist_text(SAMPLE_PLIST, "8.0.0");
        let twice = patch_plist_text(&once, "8.0.0");
        assert_eq!(once, twice);
    }

    #[test]
    fn patch_leaves_unrecognised_text_untouched() {
        assert_eq!(patch_plist_text("not a plist", "8.0.0"), "not a plist");
    }

    fn fake_html_dir(root: &Path) -> PathBuf {
        let html = root.join("html");
        fs::create_dir_all(html.join("search")).unwrap();
        fs::write(html.join("Nodes.xml"), "<nodes/>").unwrap();
        fs::write(html.join("Tokens.xml"), "<tokens/>").unwrap();
        fs::write(html.join("Info.plist"), SAMPLE_PLIST).unwrap();
        fs::write(html.join("index.html"), "<html/>").unwrap();
        fs::write(html.join("search/search.js"), "// js").unwrap();
        html
    }

    #[test]
    fn assemble_lays_out_the_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let html = fake_html_dir(dir.path());

        let bundle = DocsetBundle::assemble(&html, dir.path().join("LLVM.docset")).unwrap();

        assert!(bundle.info_plist().exists());
        assert!(bundle.resources().join("Nodes.xml").exists());
        assert!(bundle.resources().join("Tokens.xml").exists());
        assert!(bundle.documents().join("index.html").exists());
        assert!(bundle.documents().join("search/search.js").exists());
    }

    #[test]
    fn assemble_excludes_docset_files_from_documents() {
        let dir = tempfile::tempdir().unwrap();
        let html = fake_html_dir(dir.path());

        let bundle = DocsetBundle::assemble(&html, dir.path().join("LLVM.docset")).unwrap();

        assert!(!bundle.documents().join("Nodes.xml").exists());
        assert!(!bundle.documents().join("Tokens.xml").exists());
        assert!(!bundle.documents().join("Info.plist").exists());
    }

    #[test]
    fn assemble_requires_docset_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let html = dir.path().join("html");
        fs::create_dir_all(&html).unwrap();
        fs::write(html.join("index.html"), "<html/>").unwrap();

        let err =
            DocsetBundle::assemble(&html, dir.path().join("LLVM.docset")).unwrap_err();
        assert!(matches!(err, BundleError::MissingArtifact { .. }));
    }

    #[test]
    fn remove_index_inputs_deletes_working_copies() {
        let dir = tempfile::tempdir().unwrap();
        let html = fake_html_dir(dir.path());
        let bundle = DocsetBundle::assemble(&html, dir.path().join("LLVM.docset")).unwrap();

        bundle.remove_index_inputs().unwrap();
        assert!(!bundle.resources().join("Nodes.xml").exists());
        assert!(!bundle.resources().join("Tokens.xml").exists());
        // A second call is a no-op.
        bundle.remove_index_inputs().unwrap();
    }

    #[test]
    fn install_icon_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = DocsetBundle::new(dir.path().join("LLVM.docset"));
        fs::create_dir_all(bundle.root()).unwrap();

        bundle.install_icon(&[0x89, b'P', b'N', b'G']).unwrap();
        assert_eq!(
            fs::read(bundle.root().join("icon.png")).unwrap(),
            vec![0x89, b'P', b'N', b'G']
        );
    }

    #[test]
    fn patch_info_plist_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let html = fake_html_dir(dir.path());
        let bundle = DocsetBundle::assemble(&html, dir.path().join("LLVM.docset")).unwrap();

        bundle.patch_info_plist("9.0.1").unwrap();
        let text = fs::read_to_string(bundle.info_plist()).unwrap();
        assert!(text.contains("LLVM 9.0.1"));
        assert!(text.contains("<string>llvm</string>"));
    }
}
