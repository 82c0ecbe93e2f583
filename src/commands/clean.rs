//! Clean command implementation

use std::fs;
use std::path::{Path, PathBuf};

use crate::commands::helpers::load_config;
use crate::config::ConfigOverrides;
use crate::error::{Result, fs as fs_error, output as output_error};
use crate::output::{OutputGuard, remove_leftovers};

/// Run clean command
///
/// Refuses to wait for a running build: the output directory is locked while
/// a build commits into it.
pub fn run(project: Option<PathBuf>, config_file: Option<&Path>) -> Result<()> {
    let config = load_config(project, config_file, &ConfigOverrides::default())?;
    let out_dir = &config.out_dir;

    let guard =
        OutputGuard::try_acquire(out_dir)?.ok_or_else(|| output_error::locked(out_dir))?;
    tracing::debug!(lock = %guard.lock_path().display(), "acquired output lock");

    let had_leftovers = remove_leftovers(out_dir)?;
    if !out_dir.exists() {
        if had_leftovers {
            println!("Removed leftovers of an interrupted build");
        } else {
            println!("Nothing to clean");
        }
        return Ok(());
    }

    fs::remove_dir_all(out_dir).map_err(|e| fs_error::write_failed(out_dir, &e))?;
    tracing::debug!(out_dir = %out_dir.display(), "removed output directory");
    println!("Removed {}", config.display_path(out_dir));
    Ok(())
}
