//! Command helper utilities

use std::path::{Path, PathBuf};

use crate::config::{ConfigOverrides, ProjectConfig};
use crate::error::{Result, fs as fs_error};

/// Resolve project path from optional argument
///
/// If a project path is provided, use it. Otherwise,
/// resolve to the current directory.
pub fn resolve_project_path(project: Option<PathBuf>) -> Result<PathBuf> {
    match project {
        Some(path) => Ok(path),
        None => std::env::current_dir().map_err(|e| {
            fs_error::io_error(format!("Failed to get current directory: {}", e))
        }),
    }
}

/// Load the project configuration for a command
///
/// An explicit config file wins over discovery from the project directory.
pub fn load_config(
    project: Option<PathBuf>,
    config_file: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<ProjectConfig> {
    match config_file {
        Some(path) => ProjectConfig::from_file(path, overrides),
        None => {
            let start = resolve_project_path(project)?;
            ProjectConfig::discover(&start, overrides)
        }
    }
}
