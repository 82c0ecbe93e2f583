//! BLAKE3 hashing utilities for content-addressed output names

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use blake3::Hasher;
use walkdir::WalkDir;

use crate::error::{Result, fs as fs_error};
use crate::path_utils;

/// Hash prefix for BLAKE3 hashes
pub const HASH_PREFIX: &str = "blake3:";

/// Full hex BLAKE3 digest of a byte slice
pub fn content_hash(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

/// Content hash truncated to `len` hex characters, used as a filename suffix.
///
/// Identical bytes always yield the same suffix.
pub fn hash_suffix(bytes: &[u8], len: usize) -> String {
    let mut hex = content_hash(bytes);
    hex.truncate(len);
    hex
}

/// Integrity string (`blake3:<hex>`) of a byte slice
pub fn integrity(bytes: &[u8]) -> String {
    format!("{}{}", HASH_PREFIX, content_hash(bytes))
}

/// Calculate BLAKE3 hash of a directory's contents
///
/// Hashes all files recursively, sorted by relative path, so the result only
/// depends on names and bytes. Files named in `exclude` are skipped. An entry
/// that cannot be walked fails the hash instead of being left out.
pub fn hash_directory(path: &Path, exclude: &[&str]) -> Result<String> {
    if !path.is_dir() {
        return Err(fs_error::not_found(path));
    }

    let mut hasher = Hasher::new();
    let mut files = Vec::new();
    for entry in WalkDir::new(path).follow_links(true) {
        let entry = entry.map_err(|e| {
            fs_error::io_error(format!("Failed to hash {}: {}", path.display(), e))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let excluded = exclude.contains(&entry.file_name().to_string_lossy().as_ref());
        if !excluded {
            files.push(entry);
        }
    }

    files.sort_by_key(|e| e.path().to_path_buf());

    for entry in files {
        let file_path = entry.path();

        let relative_path = path_utils::to_forward_slashes(
            file_path.strip_prefix(path).unwrap_or(file_path),
        );
        hasher.update(relative_path.as_bytes());
        hasher.update(b"\0");

        let file = File::open(file_path).map_err(|e| fs_error::read_failed(file_path, &e))?;
        feed_reader(&mut hasher, file, file_path)?;

        hasher.update(b"\0");
    }

    Ok(format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex()))
}

fn feed_reader(hasher: &mut Hasher, file: File, path: &Path) -> Result<()> {
    let mut reader = BufReader::new(file);
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .map_err(|e| fs_error::read_failed(path, &e))?;

        if bytes_read == 0 {
            return Ok(());
        }

        hasher.update(&buffer[..bytes_read]);
    }
}
