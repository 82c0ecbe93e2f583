use clap::Parser;
use std::path::PathBuf;

use crate::config::Mode;

/// Arguments for build command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Development build:\n    wasmpak build\n\n\
                  Production build with hashed entry names:\n    wasmpak build --mode production\n\n\
                  Build into another directory:\n    wasmpak build --out-dir public")]
pub struct BuildArgs {
    /// Build mode (overrides wasmpak.yaml)
    #[arg(long, short = 'm', value_enum, conflicts_with = "release")]
    pub mode: Option<Mode>,

    /// Shorthand for --mode production
    #[arg(long)]
    pub release: bool,

    /// Output directory, relative to the project root (overrides wasmpak.yaml)
    #[arg(long, short = 'o')]
    pub out_dir: Option<PathBuf>,
}

impl BuildArgs {
    /// Mode requested on the command line, if any
    pub fn mode(&self) -> Option<Mode> {
        if self.release {
            Some(Mode::Production)
        } else {
            self.mode
        }
    }
}
