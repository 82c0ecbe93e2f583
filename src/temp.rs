//! Temporary directories for build scratch space.
//!
//! Scratch directories are never created under the current working directory
//! (e.g. when TMPDIR=tmp or TMPDIR=./tmp).

use std::env;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::error::{Result, fs as fs_error};

/// Returns a directory path suitable for creating temporary directories.
/// Never returns a relative path, so scratch dirs never land inside the
/// project being built.
pub fn temp_dir_base() -> PathBuf {
    let t = env::temp_dir();
    if t.is_absolute() {
        t
    } else {
        #[cfg(windows)]
        {
            env::var("TEMP")
                .or_else(|_| env::var("TMP"))
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("C:\\Windows\\Temp"))
        }
        #[cfg(not(windows))]
        {
            PathBuf::from("/tmp")
        }
    }
}

/// Create a fresh scratch directory, removed when the handle is dropped
pub fn scratch_dir(prefix: &str) -> Result<TempDir> {
    let base = temp_dir_base();
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir_in(&base)
        .map_err(|e| fs_error::write_failed(&base, &e))
}
