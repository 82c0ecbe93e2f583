//! On-disk layout of `wasmpak.yaml`
//!
//! Every field is optional; omitted fields take the defaults below, which
//! describe a crate at the project root with a `static/` directory and a
//! single `index` entry.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::Mode;

/// Raw configuration as read from YAML, before path resolution and validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Directory of the crate compiled to WebAssembly
    #[serde(rename = "crate")]
    pub crate_dir: PathBuf,

    /// Output directory
    pub out_dir: PathBuf,

    /// Module name passed to the toolchain (defaults to the crate directory name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_name: Option<String>,

    /// Static asset sources, copied in order
    #[serde(rename = "static")]
    pub static_sources: Vec<PathBuf>,

    /// Entry points: logical name -> source script
    pub entries: BTreeMap<String, PathBuf>,

    /// Build mode
    pub mode: Mode,

    /// Import specifier that entry sources use for the compiled module
    pub binding_specifier: String,

    /// Number of hex characters of the content hash used in file names
    pub hash_length: usize,

    /// External toolchain settings
    pub compiler: CompilerSection,

    /// Filename template overrides
    pub filenames: FilenameSection,
}

impl Default for ConfigFile {
    fn default() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert("index".to_string(), PathBuf::from("static/index.js"));

        Self {
            crate_dir: PathBuf::from("."),
            out_dir: PathBuf::from("dist"),
            out_name: None,
            static_sources: vec![PathBuf::from("static")],
            entries,
            mode: Mode::default(),
            binding_specifier: "../pkg".to_string(),
            hash_length: 20,
            compiler: CompilerSection::default(),
            filenames: FilenameSection::default(),
        }
    }
}

/// `compiler:` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerSection {
    /// Program to run
    pub program: String,
    /// wasm-pack `--target`
    pub target: String,
    /// Extra arguments appended to the command line
    pub args: Vec<String>,
}

impl Default for CompilerSection {
    fn default() -> Self {
        Self {
            program: "wasm-pack".to_string(),
            target: "web".to_string(),
            args: Vec::new(),
        }
    }
}

/// `filenames:` section; unset templates use mode-dependent defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilenameSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typings: Option<String>,
}

impl ConfigFile {
    /// Parse configuration from a YAML string. An empty document means defaults.
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }
}
