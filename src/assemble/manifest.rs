//! Build manifest (`wasmpak-manifest.json`)
//!
//! Describes what a build emitted. Contains no timestamps or absolute paths,
//! so identical inputs produce an identical manifest.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::assets::Asset;
use crate::compiler::interface::Export;
use crate::config::Mode;
use crate::error::{Result, fs as fs_error};

/// Manifest file name inside the output directory
pub const MANIFEST_FILE: &str = "wasmpak-manifest.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub mode: Mode,
    pub module: ModuleRecord,
    pub shim: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typings: Option<String>,
    /// Files imported by the shim, next to it
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub snippets: Vec<String>,
    /// Entry name -> emitted entry script
    pub entries: BTreeMap<String, String>,
    /// Copied assets, sorted by path
    pub assets: Vec<Asset>,
    /// Hash over every other file in the output directory
    pub fingerprint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleRecord {
    pub file: String,
    pub integrity: String,
    pub size: u64,
    pub exports: Vec<Export>,
}

impl Manifest {
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Write the manifest into an output or staging directory
    pub fn write_to(&self, dir: &Path) -> Result<()> {
        let path = dir.join(MANIFEST_FILE);
        std::fs::write(&path, self.to_json()?).map_err(|e| fs_error::write_failed(&path, &e))
    }
}
