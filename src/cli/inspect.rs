use clap::Parser;
use std::path::PathBuf;

/// Arguments for inspect command
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// WebAssembly module to inspect
    pub file: PathBuf,

    /// Print the interface as JSON
    #[arg(long)]
    pub json: bool,
}
