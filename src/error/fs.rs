//! File system errors

use std::path::Path;

use super::WasmpakError;

/// Creates an asset source not found error
pub fn asset_source_not_found(path: &Path) -> WasmpakError {
    WasmpakError::AssetSourceNotFound {
        path: path.display().to_string(),
    }
}

/// Creates a file not found error
pub fn not_found(path: &Path) -> WasmpakError {
    WasmpakError::FileNotFound {
        path: path.display().to_string(),
    }
}

/// Creates a file read failed error
pub fn read_failed(path: &Path, err: &std::io::Error) -> WasmpakError {
    WasmpakError::FileReadFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates a file write failed error
pub fn write_failed(path: &Path, err: &std::io::Error) -> WasmpakError {
    WasmpakError::FileWriteFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> WasmpakError {
    WasmpakError::IoError {
        message: message.into(),
    }
}
