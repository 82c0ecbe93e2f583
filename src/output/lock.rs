//! Advisory lock on an output directory
//!
//! The lock file lives next to the output directory (`.<name>.wasmpak.lock`)
//! because the directory itself is swapped out on every commit. It is never
//! deleted, so every waiter locks the same inode.

use std::fs;
use std::path::{Path, PathBuf};

use fslock::LockFile;

use crate::error::{Result, output as output_error};

/// RAII guard for an output directory
///
/// Acquires an advisory file lock on creation and releases it on drop.
/// Serialises builds and cleans that target the same output directory.
#[derive(Debug)]
pub struct OutputGuard {
    lock: LockFile,
    lock_path: PathBuf,
}

impl OutputGuard {
    /// Acquire the lock, waiting for a concurrent holder to finish
    pub fn acquire(out_dir: &Path) -> Result<Self> {
        let (mut lock, lock_path) = open(out_dir)?;

        let acquired = lock
            .try_lock()
            .map_err(|e| output_error::lock_failed(&lock_path, e.to_string()))?;
        if !acquired {
            tracing::info!(
                lock = %lock_path.display(),
                "output directory is in use, waiting for the other build"
            );
            lock.lock()
                .map_err(|e| output_error::lock_failed(&lock_path, e.to_string()))?;
        }

        tracing::debug!(lock = %lock_path.display(), "acquired output lock");
        Ok(Self { lock, lock_path })
    }

    /// Try to acquire the lock without blocking
    pub fn try_acquire(out_dir: &Path) -> Result<Option<Self>> {
        let (mut lock, lock_path) = open(out_dir)?;

        let acquired = lock
            .try_lock()
            .map_err(|e| output_error::lock_failed(&lock_path, e.to_string()))?;

        if acquired {
            Ok(Some(Self { lock, lock_path }))
        } else {
            Ok(None)
        }
    }

    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }
}

impl Drop for OutputGuard {
    fn drop(&mut self) {
        let _ = self.lock.unlock();
    }
}

/// Lock file path for an output directory
pub fn lock_path(out_dir: &Path) -> Result<PathBuf> {
    let parent = out_dir
        .parent()
        .ok_or_else(|| output_error::lock_failed(out_dir, "output directory has no parent"))?;
    let name = out_dir
        .file_name()
        .ok_or_else(|| output_error::lock_failed(out_dir, "output directory has no name"))?;
    Ok(parent.join(format!(".{}.wasmpak.lock", name.to_string_lossy())))
}

fn open(out_dir: &Path) -> Result<(LockFile, PathBuf)> {
    let lock_path = lock_path(out_dir)?;
    if let Some(parent) = lock_path.parent() {
        fs::create_dir_all(parent).map_err(|e| output_error::lock_failed(parent, e.to_string()))?;
    }

    let lock = LockFile::open(&lock_path)
        .map_err(|e| output_error::lock_failed(&lock_path, format!("Failed to open lock file: {e}")))?;
    Ok((lock, lock_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_lock_path_next_to_output() {
        let path = lock_path(Path::new("/project/dist")).unwrap();
        assert_eq!(path, Path::new("/project/.dist.wasmpak.lock"));
    }

    #[test]
    fn test_acquire_creates_parent() {
        let temp = TempDir::new().unwrap();
        let out_dir = temp.path().join("build/web");

        let guard = OutputGuard::acquire(&out_dir).unwrap();
        assert!(guard.lock_path().is_file());
        assert!(!out_dir.exists());
    }

    #[test]
    fn test_lock_released_on_drop() {
        let temp = TempDir::new().unwrap();
        let out_dir = temp.path().join("dist");

        let guard = OutputGuard::acquire(&out_dir).unwrap();
        let lock_file = guard.lock_path().to_path_buf();
        drop(guard);

        assert!(lock_file.is_file());
        assert!(OutputGuard::try_acquire(&out_dir).unwrap().is_some());
    }

    #[test]
    fn test_waiter_keeps_exclusive_lock_after_handover() {
        let temp = TempDir::new().unwrap();
        let out_dir = temp.path().join("dist");

        let first = OutputGuard::acquire(&out_dir).unwrap();

        let (acquired_tx, acquired_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let waiter_dir = out_dir.clone();
        let waiter = thread::spawn(move || {
            let guard = OutputGuard::acquire(&waiter_dir).unwrap();
            acquired_tx.send(()).unwrap();
            release_rx.recv().unwrap();
            drop(guard);
        });

        // Give the waiter time to block on the held lock
        thread::sleep(Duration::from_millis(200));
        assert!(acquired_rx.try_recv().is_err());

        drop(first);
        acquired_rx
            .recv_timeout(Duration::from_secs(10))
            .unwrap();

        assert!(OutputGuard::try_acquire(&out_dir).unwrap().is_none());

        release_tx.send(()).unwrap();
        waiter.join().unwrap();
        assert!(OutputGuard::try_acquire(&out_dir).unwrap().is_some());
    }

    #[test]
    fn test_try_acquire() {
        let temp = TempDir::new().unwrap();
        let out_dir = temp.path().join("dist");

        let guard1 = OutputGuard::try_acquire(&out_dir).unwrap();
        assert!(guard1.is_some());

        let guard2 = OutputGuard::try_acquire(&out_dir).unwrap();
        assert!(guard2.is_none());

        drop(guard1);
        let guard3 = OutputGuard::try_acquire(&out_dir).unwrap();
        assert!(guard3.is_some());
    }
}
