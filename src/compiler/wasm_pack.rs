//! wasm-pack toolchain
//!
//! Runs `wasm-pack build` (or a compatible program) as a child process and
//! collects what it writes into the scratch directory.

use std::ffi::OsString;
use std::process::Command;

use super::{CompileRequest, CompiledArtifacts, Toolchain, collect_artifacts};
use crate::config::{CompilerConfig, Mode};
use crate::error::{Result, compile as compile_error};

/// wasm-pack invocation settings
#[derive(Debug, Clone)]
pub struct WasmPack {
    program: String,
    target: String,
    extra_args: Vec<String>,
}

impl WasmPack {
    pub fn new(config: &CompilerConfig) -> Self {
        Self {
            program: config.program.clone(),
            target: config.target.clone(),
            extra_args: config.args.clone(),
        }
    }

    /// Arguments passed to the program for a request
    pub fn args(&self, request: &CompileRequest<'_>) -> Vec<OsString> {
        let profile = match request.mode {
            Mode::Development => "--dev",
            Mode::Production => "--release",
        };

        let mut args: Vec<OsString> = vec![
            "build".into(),
            request.crate_dir.as_os_str().to_owned(),
            "--target".into(),
            self.target.clone().into(),
            "--out-dir".into(),
            request.scratch.as_os_str().to_owned(),
            "--out-name".into(),
            request.out_name.into(),
            profile.into(),
        ];
        args.extend(self.extra_args.iter().map(OsString::from));
        args
    }
}

impl Toolchain for WasmPack {
    fn name(&self) -> &str {
        &self.program
    }

    fn compile(&self, request: &CompileRequest<'_>) -> Result<CompiledArtifacts> {
        let args = self.args(request);
        tracing::debug!(program = %self.program, ?args, "running toolchain");

        let output = Command::new(&self.program)
            .args(&args)
            .current_dir(request.crate_dir)
            .output()
            .map_err(|e| compile_error::toolchain_not_found(&self.program, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let diagnostics = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(compile_error::failed(
                &self.program,
                output.status.to_string(),
                diagnostics,
            ));
        }

        collect_artifacts(request.scratch, request.out_name)
    }
}
