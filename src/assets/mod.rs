//! Static asset copier
//!
//! Copies every configured static source into the staging directory byte for
//! byte. A directory source keeps its relative layout, a file source lands
//! under its own file name. Sources are applied in order, so a later source
//! overwrites an earlier one at the same relative path.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::error::{Result, fs as fs_error};
use crate::path_utils;

/// A file copied verbatim into the output directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Asset {
    /// Path relative to the output directory, forward slashes
    #[serde(rename = "path")]
    pub relative_path: String,
    #[serde(skip)]
    pub source: PathBuf,
    pub size: u64,
}

/// Copy all sources into `dest`, returning the assets sorted by relative path
pub fn copy_assets(sources: &[PathBuf], dest: &Path) -> Result<Vec<Asset>> {
    let mut copied: BTreeMap<String, Asset> = BTreeMap::new();

    for source in sources {
        if !source.exists() {
            return Err(fs_error::asset_source_not_found(source));
        }

        if source.is_dir() {
            copy_directory(source, dest, &mut copied)?;
        } else {
            let file_name = source
                .file_name()
                .ok_or_else(|| fs_error::asset_source_not_found(source))?;
            copy_file(source, Path::new(file_name), dest, &mut copied)?;
        }
    }

    tracing::debug!(count = copied.len(), "copied static assets");
    Ok(copied.into_values().collect())
}

fn copy_directory(
    source: &Path,
    dest: &Path,
    copied: &mut BTreeMap<String, Asset>,
) -> Result<()> {
    let walker = WalkDir::new(source)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|e| {
            fs_error::io_error(format!(
                "Failed to read static source {}: {}",
                source.display(),
                e
            ))
        })?;

        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| fs_error::io_error(e.to_string()))?;

        if entry.file_type().is_dir() {
            let target = dest.join(relative);
            fs::create_dir_all(&target).map_err(|e| fs_error::write_failed(&target, &e))?;
        } else {
            copy_file(entry.path(), relative, dest, copied)?;
        }
    }

    Ok(())
}

fn copy_file(
    source: &Path,
    relative: &Path,
    dest: &Path,
    copied: &mut BTreeMap<String, Asset>,
) -> Result<()> {
    let target = dest.join(relative);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| fs_error::write_failed(parent, &e))?;
    }

    let size = fs::copy(source, &target).map_err(|e| fs_error::write_failed(&target, &e))?;

    let relative_path = path_utils::to_forward_slashes(relative);
    let asset = Asset {
        relative_path: relative_path.clone(),
        source: source.to_path_buf(),
        size,
    };
    if let Some(previous) = copied.insert(relative_path, asset) {
        tracing::debug!(
            path = %previous.relative_path,
            replaced = %previous.source.display(),
            by = %source.display(),
            "asset overwritten by later source"
        );
    }
    Ok(())
}
