//! Staged output commit
//!
//! A build writes into a staging directory next to the output directory.
//! Committing swaps the staging directory into place; a transaction that is
//! dropped without a commit removes the staging directory, so the previous
//! output stays untouched.
//!
//! ## Usage
//!
//! ```ignore
//! let transaction = OutputTransaction::begin(&config.out_dir)?;
//!
//! // Write everything into transaction.staging()...
//!
//! // On success:
//! transaction.commit()?;
//!
//! // On error (automatic via Drop if not committed):
//! // the staging directory is removed
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, fs as fs_error, output as output_error};

/// A pending replacement of an output directory
#[derive(Debug)]
pub struct OutputTransaction {
    out_dir: PathBuf,
    staging: PathBuf,
    backup: PathBuf,
    committed: bool,
}

impl OutputTransaction {
    /// Create an empty staging directory for `out_dir`
    ///
    /// Callers hold the output lock, so leftovers from an interrupted build
    /// can be removed safely.
    pub fn begin(out_dir: &Path) -> Result<Self> {
        let (staging, backup) = sibling_paths(out_dir)?;
        remove_leftovers(out_dir)?;

        fs::create_dir_all(&staging).map_err(|e| fs_error::write_failed(&staging, &e))?;

        Ok(Self {
            out_dir: out_dir.to_path_buf(),
            staging,
            backup,
            committed: false,
        })
    }

    /// Directory the build writes into
    pub fn staging(&self) -> &Path {
        &self.staging
    }

    /// Replace the output directory with the staging directory
    pub fn commit(mut self) -> Result<PathBuf> {
        let had_previous = self.out_dir.exists();

        if had_previous {
            fs::rename(&self.out_dir, &self.backup)
                .map_err(|e| output_error::commit_failed(&self.out_dir, e.to_string()))?;
        }

        if let Err(e) = fs::rename(&self.staging, &self.out_dir) {
            if had_previous {
                if let Err(restore) = fs::rename(&self.backup, &self.out_dir) {
                    tracing::error!(
                        backup = %self.backup.display(),
                        error = %restore,
                        "failed to restore previous output"
                    );
                }
            }
            return Err(output_error::commit_failed(&self.out_dir, e.to_string()));
        }

        self.committed = true;
        tracing::debug!(out_dir = %self.out_dir.display(), "output committed");

        if had_previous {
            if let Err(e) = remove_path(&self.backup) {
                tracing::warn!(backup = %self.backup.display(), error = %e, "failed to remove previous output");
            }
        }

        Ok(self.out_dir.clone())
    }

    /// Discard the staging directory
    pub fn rollback(&mut self) -> Result<()> {
        if self.committed || !self.staging.exists() {
            return Ok(());
        }
        remove_path(&self.staging)
    }
}

impl Drop for OutputTransaction {
    fn drop(&mut self) {
        if !self.committed {
            if let Err(e) = self.rollback() {
                tracing::warn!(error = %e, "rollback failed");
            }
        }
    }
}

/// Remove staging and backup directories left by an interrupted build.
///
/// Returns whether anything was removed. Callers must hold the output lock.
pub fn remove_leftovers(out_dir: &Path) -> Result<bool> {
    let (staging, backup) = sibling_paths(out_dir)?;
    let mut removed = false;
    for leftover in [&staging, &backup] {
        if leftover.exists() {
            tracing::debug!(path = %leftover.display(), "removing leftover from interrupted build");
            remove_path(leftover)?;
            removed = true;
        }
    }
    Ok(removed)
}

/// Staging and backup paths next to `out_dir`
fn sibling_paths(out_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    let parent = out_dir
        .parent()
        .ok_or_else(|| output_error::commit_failed(out_dir, "output directory has no parent"))?;
    let name = out_dir
        .file_name()
        .ok_or_else(|| output_error::commit_failed(out_dir, "output directory has no name"))?
        .to_string_lossy();

    Ok((
        parent.join(format!(".wasmpak-staging-{name}")),
        parent.join(format!(".wasmpak-backup-{name}")),
    ))
}

fn remove_path(path: &Path) -> Result<()> {
    let result = if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| fs_error::write_failed(path, &e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_commit_creates_output() {
        let temp = TempDir::new().unwrap();
        let out_dir = temp.path().join("dist");

        let transaction = OutputTransaction::begin(&out_dir).unwrap();
        fs::write(transaction.staging().join("index.html"), "new").unwrap();
        let staging = transaction.staging().to_path_buf();
        transaction.commit().unwrap();

        assert_eq!(fs::read_to_string(out_dir.join("index.html")).unwrap(), "new");
        assert!(!staging.exists());
    }

    #[test]
    fn test_commit_replaces_previous_output() {
        let temp = TempDir::new().unwrap();
        let out_dir = temp.path().join("dist");
        fs::create_dir_all(&out_dir).unwrap();
        fs::write(out_dir.join("stale.js"), "old").unwrap();

        let transaction = OutputTransaction::begin(&out_dir).unwrap();
        fs::write(transaction.staging().join("index.js"), "new").unwrap();
        transaction.commit().unwrap();

        assert!(!out_dir.join("stale.js").exists());
        assert!(out_dir.join("index.js").is_file());
        assert!(!temp.path().join(".wasmpak-backup-dist").exists());
    }

    #[test]
    fn test_drop_without_commit_keeps_previous_output() {
        let temp = TempDir::new().unwrap();
        let out_dir = temp.path().join("dist");
        fs::create_dir_all(&out_dir).unwrap();
        fs::write(out_dir.join("index.js"), "old").unwrap();

        let transaction = OutputTransaction::begin(&out_dir).unwrap();
        fs::write(transaction.staging().join("index.js"), "new").unwrap();
        let staging = transaction.staging().to_path_buf();
        drop(transaction);

        assert!(!staging.exists());
        assert_eq!(fs::read_to_string(out_dir.join("index.js")).unwrap(), "old");
    }

    #[test]
    fn test_begin_removes_leftover_staging() {
        let temp = TempDir::new().unwrap();
        let out_dir = temp.path().join("dist");
        let leftover = temp.path().join(".wasmpak-staging-dist");
        fs::create_dir_all(&leftover).unwrap();
        fs::write(leftover.join("partial.js"), "").unwrap();

        let transaction = OutputTransaction::begin(&out_dir).unwrap();
        assert!(!transaction.staging().join("partial.js").exists());
    }

    #[test]
    fn test_remove_leftovers() {
        let temp = TempDir::new().unwrap();
        let out_dir = temp.path().join("dist");
        fs::create_dir_all(temp.path().join(".wasmpak-staging-dist")).unwrap();
        fs::create_dir_all(temp.path().join(".wasmpak-backup-dist/js")).unwrap();

        assert!(remove_leftovers(&out_dir).unwrap());
        assert!(!temp.path().join(".wasmpak-staging-dist").exists());
        assert!(!temp.path().join(".wasmpak-backup-dist").exists());
        assert!(!remove_leftovers(&out_dir).unwrap());
    }
}
