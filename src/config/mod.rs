//! Project configuration
//!
//! A project is described by `wasmpak.yaml`, found by walking up from the
//! project directory. The file is read once, resolved against the project
//! root, validated, and turned into an immutable [`ProjectConfig`] that every
//! build stage borrows. Without a config file the defaults apply relative to
//! the start directory.
//!
//! ## Layout
//!
//! ```text
//! project/
//! ├── wasmpak.yaml
//! ├── Cargo.toml       # crate: .
//! ├── src/lib.rs
//! ├── static/          # static: [static]
//! │   ├── index.html
//! │   └── index.js     # entries: { index: static/index.js }
//! └── dist/            # out_dir: dist
//! ```

pub mod file;
pub mod template;
mod validate;

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, config as config_error};
use crate::path_utils;

pub use file::ConfigFile;
pub use template::FilenameTemplate;

/// Configuration file name
pub const CONFIG_FILE: &str = "wasmpak.yaml";

/// Build mode
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Unoptimized build with stable entry names
    #[default]
    Development,
    /// Optimized build with content-hashed entry names
    Production,
}

impl Mode {
    /// Default entry filename template for this mode
    pub fn default_entry_template(self) -> &'static str {
        match self {
            Mode::Development => "[name].js",
            Mode::Production => "[name].[contenthash].js",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Development => write!(f, "development"),
            Mode::Production => write!(f, "production"),
        }
    }
}

/// Command line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub mode: Option<Mode>,
    /// Absolute, or relative to the project root
    pub out_dir: Option<PathBuf>,
}

/// External toolchain settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerConfig {
    pub program: String,
    pub target: String,
    pub args: Vec<String>,
}

/// Resolved filename templates
#[derive(Debug, Clone)]
pub struct Filenames {
    pub entry: FilenameTemplate,
    pub shim: FilenameTemplate,
    pub module: FilenameTemplate,
    pub typings: FilenameTemplate,
}

/// Fully resolved, validated project configuration
///
/// All paths are absolute and normalized.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    /// Project root (directory of the config file, or the start directory)
    pub root: PathBuf,
    /// Config file the values came from, if any
    pub config_path: Option<PathBuf>,
    /// Crate compiled to WebAssembly
    pub crate_dir: PathBuf,
    /// Output directory
    pub out_dir: PathBuf,
    /// Module name used for the toolchain output and `[name]` of shim/module
    pub out_name: String,
    /// Asset sources in copy order
    pub static_sources: Vec<PathBuf>,
    /// Entry name -> entry source script
    pub entries: BTreeMap<String, PathBuf>,
    pub mode: Mode,
    pub binding_specifier: String,
    pub hash_length: usize,
    pub compiler: CompilerConfig,
    pub filenames: Filenames,
}

impl ProjectConfig {
    /// Find and load the configuration for a project directory
    pub fn discover(start: &Path, overrides: &ConfigOverrides) -> Result<Self> {
        let start = canonical_dir(start)?;

        match find_config(&start) {
            Some(path) => Self::from_file(&path, overrides),
            None => {
                tracing::debug!(
                    start = %start.display(),
                    "no {} found, using defaults",
                    CONFIG_FILE
                );
                Self::resolve(ConfigFile::default(), &start, None, overrides)
            }
        }
    }

    /// Load the configuration from an explicit file
    pub fn from_file(path: &Path, overrides: &ConfigOverrides) -> Result<Self> {
        if !path.is_file() {
            return Err(config_error::not_found(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            config_error::read_failed(path.display().to_string(), e.to_string())
        })?;
        let file = ConfigFile::from_yaml(&content).map_err(|e| {
            config_error::parse_failed(path.display().to_string(), e.to_string())
        })?;

        let path = dunce::canonicalize(path).map_err(|e| {
            config_error::read_failed(path.display().to_string(), e.to_string())
        })?;
        let root = path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| config_error::not_found(path.display().to_string()))?;

        tracing::debug!(config = %path.display(), "loaded configuration");
        Self::resolve(file, &root, Some(path), overrides)
    }

    /// Resolve a parsed config file against a project root
    pub fn resolve(
        file: ConfigFile,
        root: &Path,
        config_path: Option<PathBuf>,
        overrides: &ConfigOverrides,
    ) -> Result<Self> {
        let resolve_path = |p: &Path| path_utils::normalize_lexically(&root.join(p));

        let mode = overrides.mode.unwrap_or(file.mode);
        let crate_dir = resolve_path(&file.crate_dir);
        let out_dir = resolve_path(overrides.out_dir.as_deref().unwrap_or(&file.out_dir));

        let out_name = match file.out_name {
            Some(name) => name,
            None => {
                let dir_name = crate_dir
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                path_utils::module_name_from(&dir_name)
            }
        };

        let filenames = Filenames {
            entry: FilenameTemplate::parse(
                file.filenames
                    .entry
                    .as_deref()
                    .unwrap_or(mode.default_entry_template()),
            )?,
            shim: FilenameTemplate::parse(
                file.filenames
                    .shim
                    .as_deref()
                    .unwrap_or("[name].[contenthash].js"),
            )?,
            module: FilenameTemplate::parse(
                file.filenames
                    .module
                    .as_deref()
                    .unwrap_or("[contenthash].module.wasm"),
            )?,
            typings: FilenameTemplate::parse(
                file.filenames.typings.as_deref().unwrap_or("[name].d.ts"),
            )?,
        };

        let config = Self {
            root: root.to_path_buf(),
            config_path,
            crate_dir,
            out_dir,
            out_name,
            static_sources: file
                .static_sources
                .iter()
                .map(|p| resolve_path(p))
                .collect(),
            entries: file
                .entries
                .into_iter()
                .map(|(name, p)| (name, resolve_path(&p)))
                .collect(),
            mode,
            binding_specifier: file.binding_specifier,
            hash_length: file.hash_length,
            compiler: CompilerConfig {
                program: file.compiler.program,
                target: file.compiler.target,
                args: file.compiler.args,
            },
            filenames,
        };

        validate::validate(&config)?;
        Ok(config)
    }

    /// Path relative to the project root, for display
    pub fn display_path(&self, path: &Path) -> String {
        path_utils::to_forward_slashes(path.strip_prefix(&self.root).unwrap_or(path))
    }
}

/// Find `wasmpak.yaml` in `start` or one of its ancestors
pub fn find_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILE))
        .find(|candidate| candidate.is_file())
}

fn canonical_dir(path: &Path) -> Result<PathBuf> {
    if !path.is_dir() {
        return Err(config_error::not_found(path.display().to_string()));
    }
    dunce::canonicalize(path)
        .map_err(|e| config_error::read_failed(path.display().to_string(), e.to_string()))
}

#[cfg(test)]
mod tests;
