//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - build: Build command arguments
//! - inspect: Inspect command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod build;
pub mod completions;
pub mod inspect;

pub use build::BuildArgs;
pub use completions::CompletionsArgs;
pub use inspect::InspectArgs;

/// wasmpak - WebAssembly build output assembler
///
/// Compiles a crate to WebAssembly, copies static assets and assembles a
/// deployable output directory with content-hashed file names.
#[derive(Parser, Debug)]
#[command(
    name = "wasmpak",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Assemble WebAssembly crates and static assets into a deployable directory",
    long_about = "wasmpak compiles a Rust crate to WebAssembly with wasm-pack, copies static \
                  asset directories and writes entry scripts, the module and its binding shim \
                  into one output directory with content-hashed file names.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  wasmpak build                       \x1b[90m# Development build into dist/\x1b[0m\n   \
                  wasmpak build --mode production     \x1b[90m# Optimized build, hashed entries\x1b[0m\n   \
                  wasmpak -p ./web build -o public    \x1b[90m# Build another project elsewhere\x1b[0m\n   \
                  wasmpak inspect dist/*.module.wasm  \x1b[90m# Show the module interface\x1b[0m\n   \
                  wasmpak clean                       \x1b[90m# Remove the output directory\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Project directory (defaults to current directory)
    #[arg(long, short = 'p', global = true, env = "WASMPAK_PROJECT")]
    pub project: Option<PathBuf>,

    /// Configuration file (skips wasmpak.yaml discovery)
    #[arg(long, short = 'c', global = true, env = "WASMPAK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile, copy assets and assemble the output directory
    Build(BuildArgs),

    /// Remove the output directory
    Clean,

    /// Print the interface of a WebAssembly module
    Inspect(InspectArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
