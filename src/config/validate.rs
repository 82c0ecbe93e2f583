//! Configuration validation
//!
//! Runs once while loading, so a malformed project fails before any build
//! stage touches the file system.

use std::path::Path;

use super::ProjectConfig;
use crate::error::{Result, config as config_error};
use crate::path_utils::is_within;

const MIN_HASH_LENGTH: usize = 4;
const MAX_HASH_LENGTH: usize = 64;

pub(super) fn validate(config: &ProjectConfig) -> Result<()> {
    validate_scalars(config)?;
    validate_templates(config)?;
    validate_entries(config)?;
    validate_crate(&config.crate_dir)?;
    validate_out_dir(config)
}

fn validate_scalars(config: &ProjectConfig) -> Result<()> {
    if !(MIN_HASH_LENGTH..=MAX_HASH_LENGTH).contains(&config.hash_length) {
        return Err(config_error::invalid(format!(
            "hash_length must be between {MIN_HASH_LENGTH} and {MAX_HASH_LENGTH}, got {}",
            config.hash_length
        )));
    }
    if config.binding_specifier.trim().is_empty() {
        return Err(config_error::invalid("binding_specifier must not be empty"));
    }
    if config.compiler.program.trim().is_empty() {
        return Err(config_error::invalid("compiler.program must not be empty"));
    }
    if !is_plain_name(&config.out_name) {
        return Err(config_error::invalid(format!(
            "out_name '{}' must be a plain file name",
            config.out_name
        )));
    }
    Ok(())
}

fn validate_templates(config: &ProjectConfig) -> Result<()> {
    if !config.filenames.module.uses_hash() {
        return Err(config_error::invalid(format!(
            "filenames.module '{}' must contain [contenthash]",
            config.filenames.module
        )));
    }
    if config.entries.len() > 1 && !config.filenames.entry.uses_name() {
        return Err(config_error::invalid(format!(
            "filenames.entry '{}' must contain [name] when there is more than one entry",
            config.filenames.entry
        )));
    }
    Ok(())
}

fn validate_entries(config: &ProjectConfig) -> Result<()> {
    if config.entries.is_empty() {
        return Err(config_error::invalid("at least one entry is required"));
    }

    for (name, path) in &config.entries {
        if !is_plain_name(name) {
            return Err(config_error::invalid(format!(
                "entry name '{name}' must be a plain name without path separators"
            )));
        }
        if !path.is_file() {
            return Err(config_error::entry_not_found(
                name,
                config.display_path(path),
            ));
        }
    }
    Ok(())
}

fn validate_crate(crate_dir: &Path) -> Result<()> {
    if crate_dir.join("Cargo.toml").is_file() {
        Ok(())
    } else {
        Err(config_error::crate_not_found(crate_dir.display().to_string()))
    }
}

/// The output directory is replaced wholesale on every build, so it must
/// never overlap with anything the build reads.
fn validate_out_dir(config: &ProjectConfig) -> Result<()> {
    let out_dir = &config.out_dir;

    if is_within(&config.root, out_dir) {
        return Err(config_error::invalid(format!(
            "out_dir '{}' must not be the project root or one of its parents",
            out_dir.display()
        )));
    }
    if is_within(&config.crate_dir, out_dir) {
        return Err(config_error::invalid(format!(
            "out_dir '{}' must not contain the crate directory",
            out_dir.display()
        )));
    }

    for source in &config.static_sources {
        if is_within(source, out_dir) || is_within(out_dir, source) {
            return Err(config_error::invalid(format!(
                "out_dir '{}' must not overlap static source '{}'",
                out_dir.display(),
                source.display()
            )));
        }
    }

    for (name, entry) in &config.entries {
        if is_within(entry, out_dir) {
            return Err(config_error::invalid(format!(
                "out_dir '{}' must not contain entry '{name}'",
                out_dir.display()
            )));
        }
    }
    Ok(())
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}
