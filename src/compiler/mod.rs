//! Binary compiler invocation
//!
//! Compiles the source unit into a WebAssembly module plus its JavaScript
//! binding shim by handing it to an external [`Toolchain`]. Everything the
//! toolchain writes lands in a scratch directory that lives for one build;
//! nothing is cached between runs.

pub mod interface;
pub mod wasm_pack;

use std::path::Path;

use walkdir::WalkDir;

use crate::config::{Mode, ProjectConfig};
use crate::error::{Result, compile as compile_error, fs as fs_error};
use crate::{path_utils, temp};

pub use interface::ModuleInterface;
pub use wasm_pack::WasmPack;

/// What to compile and where the toolchain may write
#[derive(Debug, Clone, Copy)]
pub struct CompileRequest<'a> {
    /// Crate directory (contains `Cargo.toml`)
    pub crate_dir: &'a Path,
    /// Base name of the emitted files
    pub out_name: &'a str,
    pub mode: Mode,
    /// Toolchain-managed scratch directory, empty at the start of a build
    pub scratch: &'a Path,
}

/// Raw toolchain output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledArtifacts {
    pub wasm: Vec<u8>,
    pub shim: String,
    pub typings: Option<String>,
    /// JavaScript the shim imports from `./snippets/`
    pub snippets: Vec<Snippet>,
}

/// A file the binding shim imports, relative to the shim's directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// Forward-slash path, starting with `snippets/`
    pub path: String,
    pub contents: Vec<u8>,
}

/// External compiler collaborator
pub trait Toolchain {
    /// Name used in logs and progress output
    fn name(&self) -> &str;

    /// Compile the request, failing with the toolchain's diagnostics
    fn compile(&self, request: &CompileRequest<'_>) -> Result<CompiledArtifacts>;
}

/// Compiled binary module with its binding shim and interface descriptor
#[derive(Debug, Clone)]
pub struct BinaryModule {
    pub bytes: Vec<u8>,
    pub shim: String,
    pub typings: Option<String>,
    pub snippets: Vec<Snippet>,
    pub interface: ModuleInterface,
}

impl BinaryModule {
    /// Validate toolchain output and read the module interface
    pub fn from_artifacts(artifacts: CompiledArtifacts) -> Result<Self> {
        let interface = ModuleInterface::parse(&artifacts.wasm)?;
        Ok(Self {
            bytes: artifacts.wasm,
            shim: artifacts.shim,
            typings: artifacts.typings,
            snippets: artifacts.snippets,
            interface,
        })
    }
}

/// Run the toolchain for the configured source unit
pub fn compile<T: Toolchain>(toolchain: &T, config: &ProjectConfig) -> Result<BinaryModule> {
    let scratch = temp::scratch_dir("wasmpak-pkg-")?;
    let request = CompileRequest {
        crate_dir: &config.crate_dir,
        out_name: &config.out_name,
        mode: config.mode,
        scratch: scratch.path(),
    };

    tracing::info!(
        toolchain = toolchain.name(),
        crate_dir = %config.crate_dir.display(),
        mode = %config.mode,
        "compiling source unit"
    );
    let artifacts = toolchain.compile(&request)?;
    let module = BinaryModule::from_artifacts(artifacts)?;

    tracing::debug!(
        size = module.bytes.len(),
        exports = module.interface.exports.len(),
        "binary module ready"
    );
    Ok(module)
}

/// Read the files a wasm-bindgen style toolchain leaves in `dir`:
/// `<out_name>_bg.wasm`, `<out_name>.js`, optionally `<out_name>.d.ts` and
/// the `snippets/` tree
pub fn collect_artifacts(dir: &Path, out_name: &str) -> Result<CompiledArtifacts> {
    let wasm_path = dir.join(format!("{out_name}_bg.wasm"));
    let shim_path = dir.join(format!("{out_name}.js"));
    let typings_path = dir.join(format!("{out_name}.d.ts"));

    for required in [&wasm_path, &shim_path] {
        if !required.is_file() {
            return Err(compile_error::output_missing(required.display().to_string()));
        }
    }

    let wasm = std::fs::read(&wasm_path).map_err(|e| fs_error::read_failed(&wasm_path, &e))?;
    let shim =
        std::fs::read_to_string(&shim_path).map_err(|e| fs_error::read_failed(&shim_path, &e))?;
    let typings = if typings_path.is_file() {
        Some(
            std::fs::read_to_string(&typings_path)
                .map_err(|e| fs_error::read_failed(&typings_path, &e))?,
        )
    } else {
        None
    };

    Ok(CompiledArtifacts {
        wasm,
        shim,
        typings,
        snippets: collect_snippets(dir)?,
    })
}

fn collect_snippets(dir: &Path) -> Result<Vec<Snippet>> {
    let root = dir.join("snippets");
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut snippets = Vec::new();
    for entry in WalkDir::new(&root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            fs_error::io_error(format!("Failed to read {}: {}", root.display(), e))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let relative = path
            .strip_prefix(dir)
            .map_err(|e| fs_error::io_error(e.to_string()))?;
        let contents = std::fs::read(path).map_err(|e| fs_error::read_failed(path, &e))?;
        snippets.push(Snippet {
            path: path_utils::to_forward_slashes(relative),
            contents,
        });
    }
    tracing::debug!(count = snippets.len(), "collected binding snippets");
    Ok(snippets)
}
