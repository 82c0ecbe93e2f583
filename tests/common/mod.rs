//! Common test utilities for wasmpak integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// Stand-in for wasm-pack: parses `--out-dir`/`--out-name`, records its
/// arguments next to itself and writes an empty module, a shim and one
/// inline snippet the shim imports.
const FAKE_WASM_PACK: &str = r#"#!/bin/sh
printf '%s\n' "$*" > "$(dirname "$0")/last-args"
out_dir=""
out_name=""
while [ $# -gt 0 ]; do
  case "$1" in
    --out-dir) out_dir="$2"; shift ;;
    --out-name) out_name="$2"; shift ;;
  esac
  shift
done
mkdir -p "$out_dir/snippets/hello-wasm-0123"
printf '\000asm\001\000\000\000' > "$out_dir/${out_name}_bg.wasm"
printf 'export function now() { return Date.now(); }\n' > "$out_dir/snippets/hello-wasm-0123/inline0.js"
printf "import { now } from './snippets/hello-wasm-0123/inline0.js';\nexport default async function init(input) {}\nexport function start() {}\n" > "$out_dir/${out_name}.js"
printf 'export function start(): void;\n' > "$out_dir/${out_name}.d.ts"
"#;

const FAILING_WASM_PACK: &str = r#"#!/bin/sh
echo "error[E0308]: mismatched types" >&2
echo "Error: Compiling your crate to WebAssembly failed" >&2
exit 101
"#;

/// A temporary project for integration tests
#[allow(dead_code)]
pub struct TestProject {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestProject {
    /// Create a project with a crate manifest and the default static layout
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        let project = Self { temp, path };

        project.write_file("Cargo.toml", "[package]\nname = \"hello-wasm\"\n");
        project.write_file("src/lib.rs", "");
        project.write_file(
            "static/index.js",
            "import(\"../pkg\").then((m) => m.start()).catch(console.error);\n",
        );
        project.write_file(
            "static/index.html",
            "<!DOCTYPE html>\n<script type=\"module\" src=\"index.js\"></script>\n",
        );
        project
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the project
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in the project
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Install a fake compiler script and return its path
    #[cfg(unix)]
    pub fn install_compiler(&self, failing: bool) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let script = self.path.join("tools/wasm-pack");
        let content = if failing {
            FAILING_WASM_PACK
        } else {
            FAKE_WASM_PACK
        };
        self.write_file("tools/wasm-pack", content);
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make compiler executable");
        script
    }

    /// Write wasmpak.yaml using the fake compiler plus extra settings
    #[cfg(unix)]
    pub fn configure(&self, failing: bool, extra: &str) {
        let script = self.install_compiler(failing);
        self.write_file(
            "wasmpak.yaml",
            &format!(
                "out_name: hello\ncompiler:\n  program: {}\n{}",
                script.display(),
                extra
            ),
        );
    }

    /// Arguments the fake compiler was last called with
    pub fn compiler_args(&self) -> String {
        self.read_file("tools/last-args")
    }

    /// Parsed build manifest
    pub fn manifest(&self, out_dir: &str) -> serde_json::Value {
        let content = self.read_file(&format!("{out_dir}/wasmpak-manifest.json"));
        serde_json::from_str(&content).expect("Failed to parse manifest")
    }
}
