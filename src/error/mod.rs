//! Error types and handling for wasmpak
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Configuration errors (raised before any build stage runs)
//! - [`compile`]: Toolchain and binary module errors
//! - [`fs`]: File system errors
//! - [`output`]: Output directory locking and commit errors

pub mod compile;
pub mod config;
pub mod fs;
pub mod output;


use miette::Diagnostic;
use thiserror::Error;

/// Broad failure category of a [`WasmpakError`]
///
/// Every category is fatal for the current build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed entry or path configuration
    Configuration,
    /// The external toolchain failed or produced unusable output
    Compilation,
    /// Asset copy or output write failure
    Io,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration => write!(f, "configuration"),
            Self::Compilation => write!(f, "compilation"),
            Self::Io => write!(f, "io"),
        }
    }
}

/// Main error type for wasmpak operations
#[derive(Error, Diagnostic, Debug)]
pub enum WasmpakError {
    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(wasmpak::config::not_found),
        help("Pass an existing file with --config, or omit it to use wasmpak.yaml discovery")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file: {path}: {reason}")]
    #[diagnostic(code(wasmpak::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(wasmpak::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(wasmpak::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Entry '{name}' not found: {path}")]
    #[diagnostic(
        code(wasmpak::config::entry_not_found),
        help("Entry paths in wasmpak.yaml are resolved relative to the project directory")
    )]
    EntryNotFound { name: String, path: String },

    #[error("Crate directory has no Cargo.toml: {path}")]
    #[diagnostic(
        code(wasmpak::config::crate_not_found),
        help("Set 'crate' in wasmpak.yaml to the directory of the crate to compile")
    )]
    CrateNotFound { path: String },

    // Compilation errors
    #[error("Failed to run '{program}': {reason}")]
    #[diagnostic(
        code(wasmpak::compile::toolchain_not_found),
        help("Install wasm-pack (cargo install wasm-pack) or set compiler.program in wasmpak.yaml")
    )]
    ToolchainNotFound { program: String, reason: String },

    #[error("Compilation failed: '{program}' exited with {status}\n{diagnostics}")]
    #[diagnostic(code(wasmpak::compile::failed))]
    CompilationFailed {
        program: String,
        status: String,
        diagnostics: String,
    },

    #[error("Compiler did not produce expected file: {path}")]
    #[diagnostic(
        code(wasmpak::compile::output_missing),
        help("Check that compiler.target and out_name match what the toolchain emits")
    )]
    CompilerOutputMissing { path: String },

    #[error("Invalid WebAssembly module at offset {offset}: {reason}")]
    #[diagnostic(code(wasmpak::compile::invalid_module))]
    InvalidWasmModule { offset: usize, reason: String },

    // File system errors
    #[error("Asset source not found: {path}")]
    #[diagnostic(
        code(wasmpak::fs::asset_source_not_found),
        help("Every entry of 'static' in wasmpak.yaml must exist")
    )]
    AssetSourceNotFound { path: String },

    #[error("File not found: {path}")]
    #[diagnostic(code(wasmpak::fs::not_found))]
    FileNotFound { path: String },

    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(wasmpak::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(wasmpak::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(wasmpak::fs::io_error))]
    IoError { message: String },

    // Output errors
    #[error("Output directory is locked by another build: {path}")]
    #[diagnostic(
        code(wasmpak::output::locked),
        help("Wait for the other wasmpak process to finish")
    )]
    OutputLocked { path: String },

    #[error("Failed to lock output directory {path}: {reason}")]
    #[diagnostic(code(wasmpak::output::lock_failed))]
    OutputLockFailed { path: String, reason: String },

    #[error("Failed to replace output directory {path}: {reason}")]
    #[diagnostic(
        code(wasmpak::output::commit_failed),
        help("The previous output directory was left in place")
    )]
    OutputCommitFailed { path: String, reason: String },
}

impl WasmpakError {
    /// Failure category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ConfigNotFound { .. }
            | Self::ConfigReadFailed { .. }
            | Self::ConfigParseFailed { .. }
            | Self::ConfigInvalid { .. }
            | Self::EntryNotFound { .. }
            | Self::CrateNotFound { .. } => ErrorKind::Configuration,
            Self::ToolchainNotFound { .. }
            | Self::CompilationFailed { .. }
            | Self::CompilerOutputMissing { .. }
            | Self::InvalidWasmModule { .. } => ErrorKind::Compilation,
            Self::AssetSourceNotFound { .. }
            | Self::FileNotFound { .. }
            | Self::FileReadFailed { .. }
            | Self::FileWriteFailed { .. }
            | Self::IoError { .. }
            | Self::OutputLocked { .. }
            | Self::OutputLockFailed { .. }
            | Self::OutputCommitFailed { .. } => ErrorKind::Io,
        }
    }
}

impl From<std::io::Error> for WasmpakError {
    fn from(err: std::io::Error) -> Self {
        WasmpakError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for WasmpakError {
    fn from(err: serde_json::Error) -> Self {
        WasmpakError::IoError {
            message: format!("JSON serialization failed: {err}"),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, WasmpakError>;
