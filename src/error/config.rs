//! Configuration errors

use super::WasmpakError;

/// Creates a config not found error
pub fn not_found(path: impl Into<String>) -> WasmpakError {
    WasmpakError::ConfigNotFound { path: path.into() }
}

/// Creates a config read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> WasmpakError {
    WasmpakError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> WasmpakError {
    WasmpakError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> WasmpakError {
    WasmpakError::ConfigInvalid {
        message: message.into(),
    }
}

/// Creates an entry not found error
pub fn entry_not_found(name: impl Into<String>, path: impl Into<String>) -> WasmpakError {
    WasmpakError::EntryNotFound {
        name: name.into(),
        path: path.into(),
    }
}

/// Creates a crate not found error
pub fn crate_not_found(path: impl Into<String>) -> WasmpakError {
    WasmpakError::CrateNotFound { path: path.into() }
}
