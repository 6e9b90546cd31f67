use anyhow::Result;
use clap::Parser as _;

use llvm_docset_cli::cli::Cli;
use llvm_docset_cli::config::Config;
use llvm_docset_cli::logging::{self, Logger};
use llvm_docset_cli::stages::{self, Context};
use llvm_docset_cli::workspace::Workspace;
use llvm_docset_cli::interrupt;

fn main() {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();
    logging::init_subscriber(args.verbose, args.quiet);
    let log = Logger::new();

    let verbose = args.verbose;
    if let Err(e) = run(args, log) {
        log.error(&format!("{e:#}"));
        if !verbose {
            log.error("Try rerunning with --verbose to see what went wrong");
        }
        std::process::exit(1);
    }
}

fn run(args: Cli, log: Logger) -> Result<()> {
    interrupt::install_handler()?;

    let version = option_env!("LLVM_DOCSET_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.info(&format!("llvm-docset {version}"));

    let config = Config::resolve(&args)?;

    let root = match args.work_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            dir
        }
        None => std::env::current_dir()?,
    };
    let workspace = Workspace::new(root, &config.version);

    let ctx = Context {
        config,
        workspace,
        log,
    };
    stages::run(&ctx)?;

    log.info("Done!");
    Ok(())
}
