//! Dash docset generator for LLVM doxygen documentation.
//!
//! A single forward pipeline: download the versioned LLVM source
//! tarball, extract it, render the tree's `doxygen.cfg.in` template,
//! run doxygen, assemble and index the `LLVM.docset` bundle with
//! `docsetutil`, then install the icon and patch `Info.plist` for Dash.
//!
//! The crate is organised into primitives and orchestration:
//!
//! - **[`exec`]**, **[`fetch`]**, **[`archive`]**, **[`doxygen`]**,
//!   **[`bundle`]** — single-purpose building blocks
//! - **[`workspace`]** — explicit working-directory layout
//! - **[`stages`]** — the ordered pipeline with skip-if-exists
//!   preconditions and first-failure abort

pub mod archive;
pub mod bundle;
pub mod cli;
pub mod config;
pub mod doxygen;
pub mod error;
pub mod exec;
pub mod fetch;
pub mod interrupt;
pub mod logging;
pub mod stages;
pub mod workspace;
