//! Output directory errors

use std::path::Path;

use super::WasmpakError;

/// Creates an output locked error
pub fn locked(path: &Path) -> WasmpakError {
    WasmpakError::OutputLocked {
        path: path.display().to_string(),
    }
}

/// Creates an output lock failed error
pub fn lock_failed(path: &Path, reason: impl Into<String>) -> WasmpakError {
    WasmpakError::OutputLockFailed {
        path: path.display().to_string(),
        reason: reason.into(),
    }
}

/// Creates an output commit failed error
pub fn commit_failed(path: &Path, reason: impl Into<String>) -> WasmpakError {
    WasmpakError::OutputCommitFailed {
        path: path.display().to_string(),
        reason: reason.into(),
    }
}
