//! wasmpak - WebAssembly build output assembler
//!
//! Compiles a Rust crate to WebAssembly through an external toolchain, copies
//! static assets and assembles a deployable output directory whose generated
//! files carry content-hash names.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod assemble;
mod assets;
mod cli;
mod commands;
mod compiler;
mod config;
mod error;
mod hash;
mod output;
mod path_utils;
mod pipeline;
mod temp;
mod ui;

use cli::{Cli, Commands};

/// Environment variable holding the log filter
const LOG_ENV: &str = "WASMPAK_LOG";

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("wasmpak=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_file = cli.config.as_deref();
    let result = match cli.command {
        Commands::Build(args) => commands::build::run(cli.project, config_file, args),
        Commands::Clean => commands::clean::run(cli.project, config_file),
        Commands::Inspect(args) => commands::inspect::run(args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        tracing::debug!(kind = %e.kind(), "command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
