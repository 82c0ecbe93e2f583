//! Toolchain and binary module errors

use super::WasmpakError;

/// Creates a toolchain not found error
pub fn toolchain_not_found(program: impl Into<String>, reason: impl Into<String>) -> WasmpakError {
    WasmpakError::ToolchainNotFound {
        program: program.into(),
        reason: reason.into(),
    }
}

/// Creates a compilation failed error carrying the toolchain diagnostics
pub fn failed(
    program: impl Into<String>,
    status: impl Into<String>,
    diagnostics: impl Into<String>,
) -> WasmpakError {
    WasmpakError::CompilationFailed {
        program: program.into(),
        status: status.into(),
        diagnostics: diagnostics.into(),
    }
}

/// Creates a compiler output missing error
pub fn output_missing(path: impl Into<String>) -> WasmpakError {
    WasmpakError::CompilerOutputMissing { path: path.into() }
}

/// Creates an invalid module error
pub fn invalid_module(offset: usize, reason: impl Into<String>) -> WasmpakError {
    WasmpakError::InvalidWasmModule {
        offset,
        reason: reason.into(),
    }
}

/// Creates an invalid module error from a decoder error
pub fn malformed_module(err: &wasmparser::BinaryReaderError) -> WasmpakError {
    invalid_module(err.offset(), err.message())
}
