//! Output assembler
//!
//! Writes the compiled module, its binding shim with the snippets it
//! imports, optional typings and one entry script per entry point into the staging directory next to the
//! already copied assets, then records everything in the manifest.
//!
//! File names come from the configured templates. `[contenthash]` is the
//! truncated BLAKE3 hash of the bytes being written, so a file name changes
//! exactly when its content does.
//!
//! A generated file replaces a copied asset at the same relative path. The
//! asset is dropped from the manifest and a warning is logged.

pub mod entry;
pub mod manifest;

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use crate::assets::Asset;
use crate::compiler::BinaryModule;
use crate::config::ProjectConfig;
use crate::error::{Result, config as config_error, fs as fs_error};
use crate::hash;

pub use entry::EntryLinks;
pub use manifest::{MANIFEST_FILE, Manifest, ModuleRecord};

/// Assemble the output in `staging` and write the manifest
pub fn assemble(
    config: &ProjectConfig,
    module: &BinaryModule,
    assets: Vec<Asset>,
    staging: &Path,
) -> Result<Manifest> {
    let mut emitter = Emitter::new(staging, assets);
    emitter.reserve(MANIFEST_FILE)?;

    let hash_length = config.hash_length;
    let out_name = config.out_name.as_str();

    let module_file = config
        .filenames
        .module
        .render(out_name, &hash::hash_suffix(&module.bytes, hash_length));
    emitter.emit(&module_file, &module.bytes)?;

    let shim_file = config.filenames.shim.render(
        out_name,
        &hash::hash_suffix(module.shim.as_bytes(), hash_length),
    );
    emitter.emit(&shim_file, module.shim.as_bytes())?;

    // The shim imports `./snippets/...` relative to its own directory
    let shim_dir = shim_file.rfind('/').map_or("", |sep| &shim_file[..=sep]);
    let mut snippets = Vec::with_capacity(module.snippets.len());
    for snippet in &module.snippets {
        let file = format!("{shim_dir}{}", snippet.path);
        emitter.emit(&file, &snippet.contents)?;
        snippets.push(file);
    }

    let typings_file = match &module.typings {
        Some(typings) => {
            let file = config.filenames.typings.render(
                out_name,
                &hash::hash_suffix(typings.as_bytes(), hash_length),
            );
            emitter.emit(&file, typings.as_bytes())?;
            Some(file)
        }
        None => None,
    };

    let mut entries = BTreeMap::new();
    for (name, source_path) in &config.entries {
        let source = fs::read_to_string(source_path)
            .map_err(|e| fs_error::read_failed(source_path, &e))?;

        // [contenthash] never appears in the directory part, so the
        // unhashed name locates the script for relative imports.
        let location = config.filenames.entry.render(name, "");
        let script = entry::render(
            &source,
            &EntryLinks {
                entry_file: &location,
                shim_file: &shim_file,
                module_file: &module_file,
                binding_specifier: &config.binding_specifier,
                out_name,
            },
        );

        let entry_file = config
            .filenames
            .entry
            .render(name, &hash::hash_suffix(script.as_bytes(), hash_length));
        emitter.emit(&entry_file, script.as_bytes())?;
        tracing::debug!(entry = %name, file = %entry_file, "emitted entry script");
        entries.insert(name.clone(), entry_file);
    }

    let fingerprint = hash::hash_directory(staging, &[MANIFEST_FILE])?;
    let manifest = Manifest {
        mode: config.mode,
        module: ModuleRecord {
            file: module_file,
            integrity: hash::integrity(&module.bytes),
            size: module.bytes.len() as u64,
            exports: module.interface.exports.clone(),
        },
        shim: shim_file,
        typings: typings_file,
        snippets,
        entries,
        assets: emitter.into_assets(),
        fingerprint,
    };
    manifest.write_to(staging)?;

    Ok(manifest)
}

/// Writes generated files, keeping track of names already taken
struct Emitter<'a> {
    dir: &'a Path,
    written: BTreeSet<String>,
    assets: BTreeMap<String, Asset>,
}

impl<'a> Emitter<'a> {
    fn new(dir: &'a Path, assets: Vec<Asset>) -> Self {
        Self {
            dir,
            written: BTreeSet::new(),
            assets: assets
                .into_iter()
                .map(|a| (a.relative_path.clone(), a))
                .collect(),
        }
    }

    /// Claim a relative path for a generated file
    fn reserve(&mut self, relative: &str) -> Result<()> {
        if !self.written.insert(relative.to_string()) {
            return Err(config_error::invalid(format!(
                "generated files collide at '{relative}', adjust the filename templates"
            )));
        }
        if let Some(asset) = self.assets.remove(relative) {
            tracing::warn!(
                path = %relative,
                source = %asset.source.display(),
                "generated file replaces copied asset"
            );
        }
        Ok(())
    }

    fn emit(&mut self, relative: &str, bytes: &[u8]) -> Result<()> {
        self.reserve(relative)?;

        let path = self.dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| fs_error::write_failed(parent, &e))?;
        }
        fs::write(&path, bytes).map_err(|e| fs_error::write_failed(&path, &e))
    }

    fn into_assets(self) -> Vec<Asset> {
        self.assets.into_values().collect()
    }
}
