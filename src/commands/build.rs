//! Build command CLI wrapper
//!
//! Loads the project configuration and hands it to the pipeline with the
//! wasm-pack toolchain.

use std::path::{Path, PathBuf};

use crate::cli::BuildArgs;
use crate::commands::helpers::load_config;
use crate::compiler::WasmPack;
use crate::config::ConfigOverrides;
use crate::error::Result;
use crate::pipeline;
use crate::ui;

/// Run build command
pub fn run(project: Option<PathBuf>, config_file: Option<&Path>, args: BuildArgs) -> Result<()> {
    let overrides = ConfigOverrides {
        mode: args.mode(),
        out_dir: args.out_dir,
    };
    let config = load_config(project, config_file, &overrides)?;
    tracing::debug!(root = %config.root.display(), mode = %config.mode, "building project");

    let toolchain = WasmPack::new(&config.compiler);
    let mut reporter = ui::reporter_for_terminal();
    let report = pipeline::run(&config, &toolchain, reporter.as_mut())?;

    ui::display::display_build_report(&report, &config.display_path(&report.out_dir));
    Ok(())
}
