//! Rendering of LLVM's `doxygen.cfg.in` template.
//!
//! The template uses autoconf-style `@PLACEHOLDER@` markers. Rendering
//! is plain text substitution from a fixed table — the same set of keys
//! the LLVM build system fills in — plus a handful of settings appended
//! for docset generation and output verbosity.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::TemplateError;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(\w+)@").expect("literal pattern"));

/// Inputs the replacement table is built from.
#[derive(Debug)]
pub struct RenderOptions<'a> {
    /// LLVM version string.
    pub version: &'a str,
    /// Resolved dot executable.
    pub dot: &'a Path,
    /// The LLVM source tree's `docs/` directory.
    pub docs_dir: &'a Path,
    /// Pass doxygen's own output through (`QUIET = NO`).
    pub verbose: bool,
    /// Emit the `GENERATE_DOCSET` block. When false, doxygen's built-in
    /// search engine is enabled instead, since there will be no Dash
    /// index to search with.
    pub docset: bool,
}

fn replacements(opts: &RenderOptions<'_>) -> HashMap<&'static str, String> {
    let yes_no = |b: bool| if b { "YES" } else { "NO" }.to_string();
    HashMap::from([
        ("PACKAGE_VERSION", opts.version.to_string()),
        ("abs_top_builddir", ".".to_string()),
        ("abs_top_srcdir", opts.docs_dir.display().to_string()),
        ("enable_searchengine", yes_no(!opts.docset)),
        ("searchengine_url", String::new()),
        ("enable_server_based_search", "NO".to_string()),
        ("enable_external_search", "NO".to_string()),
        ("extra_search_mappings", String::new()),
        ("llvm_doxygen_generate_qhp", "NO".to_string()),
        ("llvm_doxygen_qch_filename", String::new()),
        ("llvm_doxygen_qhp_namespace", String::new()),
        ("llvm_doxygen_qhelpgenerator_path", String::new()),
        ("llvm_doxygen_qhp_cust_filter_name", String::new()),
        ("llvm_doxygen_qhp_cust_filter_attrs", String::new()),
        ("DOT_IMAGE_FORMAT", "svg".to_string()),
        ("DOT", opts.dot.display().to_string()),
    ])
}

/// Fill `template` and append the verbosity and docset settings.
///
/// # Errors
///
/// [`TemplateError::UnknownPlaceholder`] when the template references a
/// key the table does not cover.
pub fn render_config(template: &str, opts: &RenderOptions<'_>) -> Result<String, TemplateError> {
    let table = replacements(opts);

    for captures in PLACEHOLDER.captures_iter(template) {
        let name = &captures[1];
        if !table.contains_key(name) {
            return Err(TemplateError::UnknownPlaceholder {
                name: name.to_string(),
            });
        }
    }

    let mut config = PLACEHOLDER
        .replace_all(template, |captures: &regex::Captures<'_>| {
            table.get(&captures[1]).cloned().unwrap_or_default()
        })
        .into_owned();

    config.push_str("DOT_TRANSPARENT = YES\n");
    config.push_str(&format!(
        "QUIET = {}\n",
        if opts.verbose { "NO" } else { "YES" }
    ));

    if opts.docset {
        config.push_str("GENERATE_DOCSET = YES\n");
        config.push_str("DOCSET_BUNDLE_ID = org.doxygen.LLVM\n");
        config.push_str("DOCSET_PUBLISHER_ID = org.doxygen.LLVM\n");
        config.push_str("DOCSET_PUBLISHER_NAME = LLVM\n");
        config.push_str("DISABLE_INDEX = YES\n");
    }

    Ok(config)
}

/// Read the template at `path` and render it.
///
/// # Errors
///
/// [`TemplateError::Io`] when the template cannot be read, plus the
/// rendering errors of [`render_config`].
pub fn render_config_file(
    path: &Path,
    opts: &RenderOptions<'_>,
) -> Result<String, TemplateError> {
    let template = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    render_config(&template, opts)
}
