use std::path::PathBuf;

use clap::Parser;

/// Command-line surface for the docset generator.
#[derive(Parser, Debug)]
#[command(
    name = "llvm-docset",
    about = "Generate a Dash-compatible docset from LLVM doxygen documentation",
    version
)]
pub struct Cli {
    /// LLVM version string (e.g. 8.0.0)
    pub llvm_version: String,

    /// Download and regenerate everything from scratch
    #[arg(long)]
    pub clean: bool,

    /// The path to the doxygen executable
    #[arg(long, value_name = "PATH")]
    pub doxygen_path: Option<PathBuf>,

    /// The path to the dot (Graphviz) executable
    #[arg(long, value_name = "PATH")]
    pub dot_path: Option<PathBuf>,

    /// The path to the docsetutil executable
    #[arg(long, value_name = "PATH")]
    pub docsetutil_path: Option<PathBuf>,

    /// Only generate HTML documentation, without the Dash .docset bundle
    #[arg(long)]
    pub skip_docset_generation: bool,

    /// Directory where downloads and generated output are placed
    /// (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show the output of doxygen and other tools
    #[arg(short, long)]
    pub verbose: bool,
}
