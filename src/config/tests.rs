//! Configuration loading and validation tests

#![allow(clippy::expect_used)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::*;
use crate::error::{ErrorKind, WasmpakError};

fn create_project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join("Cargo.toml"), "[package]\nname = \"demo-app\"\n").unwrap();
    fs::create_dir_all(root.join("static")).unwrap();
    fs::write(root.join("static/index.js"), "import('../pkg');\n").unwrap();
    fs::write(root.join("static/index.html"), "<html></html>\n").unwrap();
    temp
}

fn load(root: &Path, yaml: &str) -> crate::error::Result<ProjectConfig> {
    fs::write(root.join(CONFIG_FILE), yaml).unwrap();
    ProjectConfig::discover(root, &ConfigOverrides::default())
}

fn canonical(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap()
}

#[test]
fn test_defaults_without_config_file() {
    let temp = create_project();
    let config = ProjectConfig::discover(temp.path(), &ConfigOverrides::default()).unwrap();
    let root = canonical(temp.path());

    assert!(config.config_path.is_none());
    assert_eq!(config.root, root);
    assert_eq!(config.crate_dir, root);
    assert_eq!(config.out_dir, root.join("dist"));
    assert_eq!(config.static_sources, vec![root.join("static")]);
    assert_eq!(config.entries["index"], root.join("static/index.js"));
    assert_eq!(config.mode, Mode::Development);
    assert_eq!(config.hash_length, 20);
    assert_eq!(config.compiler.program, "wasm-pack");
    assert_eq!(config.filenames.entry.as_str(), "[name].js");
}

#[test]
fn test_out_name_defaults_to_crate_dir_name() {
    let temp = create_project();
    let app = temp.path().join("my-app");
    fs::create_dir_all(&app).unwrap();
    fs::write(app.join("Cargo.toml"), "[package]\n").unwrap();

    let config = load(temp.path(), "crate: my-app\n").unwrap();
    assert_eq!(config.out_name, "my_app");
}

#[test]
fn test_explicit_out_name() {
    let temp = create_project();
    let config = load(temp.path(), "out_name: game\n").unwrap();
    assert_eq!(config.out_name, "game");
}

#[test]
fn test_discover_walks_up_to_config() {
    let temp = create_project();
    fs::write(temp.path().join(CONFIG_FILE), "out_dir: public\n").unwrap();
    let nested = temp.path().join("src/deep");
    fs::create_dir_all(&nested).unwrap();

    let config = ProjectConfig::discover(&nested, &ConfigOverrides::default()).unwrap();
    assert_eq!(config.root, canonical(temp.path()));
    assert_eq!(config.out_dir, canonical(temp.path()).join("public"));
    assert!(config.config_path.is_some());
}

#[test]
fn test_production_mode_hashes_entries() {
    let temp = create_project();
    let config = load(temp.path(), "mode: production\n").unwrap();
    assert_eq!(config.mode, Mode::Production);
    assert_eq!(config.filenames.entry.as_str(), "[name].[contenthash].js");
}

#[test]
fn test_overrides_take_precedence() {
    let temp = create_project();
    fs::write(temp.path().join(CONFIG_FILE), "mode: development\n").unwrap();

    let overrides = ConfigOverrides {
        mode: Some(Mode::Production),
        out_dir: Some(PathBuf::from("build/web")),
    };
    let config = ProjectConfig::discover(temp.path(), &overrides).unwrap();
    assert_eq!(config.mode, Mode::Production);
    assert_eq!(config.out_dir, canonical(temp.path()).join("build/web"));
}

#[test]
fn test_explicit_entry_template_wins_over_mode() {
    let temp = create_project();
    let yaml = "mode: production\nfilenames:\n  entry: \"[name].js\"\n";
    let config = load(temp.path(), yaml).unwrap();
    assert_eq!(config.filenames.entry.as_str(), "[name].js");
}

#[test]
fn test_from_file_missing() {
    let err = ProjectConfig::from_file(
        Path::new("/nonexistent/wasmpak.yaml"),
        &ConfigOverrides::default(),
    )
    .unwrap_err();
    assert!(matches!(err, WasmpakError::ConfigNotFound { .. }));
}

#[test]
fn test_parse_error_is_configuration_error() {
    let temp = create_project();
    let err = load(temp.path(), "entries: [unclosed\n").unwrap_err();
    assert!(matches!(err, WasmpakError::ConfigParseFailed { .. }));
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn test_missing_entry_file() {
    let temp = create_project();
    let err = load(temp.path(), "entries:\n  app: web/app.js\n").unwrap_err();
    match err {
        WasmpakError::EntryNotFound { name, path } => {
            assert_eq!(name, "app");
            assert_eq!(path, "web/app.js");
        }
        other => panic!("Expected EntryNotFound, got {other:?}"),
    }
}

#[test]
fn test_empty_entries_rejected() {
    let temp = create_project();
    let err = load(temp.path(), "entries: {}\n").unwrap_err();
    assert!(err.to_string().contains("at least one entry"));
}

#[test]
fn test_entry_name_with_separator_rejected() {
    let temp = create_project();
    let err = load(temp.path(), "entries:\n  a/b: static/index.js\n").unwrap_err();
    assert!(matches!(err, WasmpakError::ConfigInvalid { .. }));
}

#[test]
fn test_missing_cargo_toml() {
    let temp = create_project();
    fs::remove_file(temp.path().join("Cargo.toml")).unwrap();
    let err = ProjectConfig::discover(temp.path(), &ConfigOverrides::default()).unwrap_err();
    assert!(matches!(err, WasmpakError::CrateNotFound { .. }));
}

#[test]
fn test_missing_static_dir_is_not_a_config_error() {
    let temp = create_project();
    let config = load(temp.path(), "static: [public]\n");
    assert!(config.is_ok());
}

#[test]
fn test_hash_length_bounds() {
    let temp = create_project();
    assert!(load(temp.path(), "hash_length: 3\n").is_err());
    assert!(load(temp.path(), "hash_length: 65\n").is_err());
    assert!(load(temp.path(), "hash_length: 4\n").is_ok());
    assert!(load(temp.path(), "hash_length: 64\n").is_ok());
}

#[test]
fn test_module_template_requires_hash() {
    let temp = create_project();
    let err = load(temp.path(), "filenames:\n  module: \"[name].wasm\"\n").unwrap_err();
    assert!(err.to_string().contains("[contenthash]"));
}

#[test]
fn test_multiple_entries_require_name_placeholder() {
    let temp = create_project();
    fs::write(temp.path().join("static/worker.js"), "").unwrap();
    let yaml = "entries:\n  index: static/index.js\n  worker: static/worker.js\n\
                filenames:\n  entry: app.js\n";
    let err = load(temp.path(), yaml).unwrap_err();
    assert!(err.to_string().contains("[name]"));
}

#[test]
fn test_out_dir_cannot_be_root() {
    let temp = create_project();
    let err = load(temp.path(), "out_dir: .\n").unwrap_err();
    assert!(err.to_string().contains("project root"));
}

#[test]
fn test_out_dir_cannot_overlap_static() {
    let temp = create_project();
    assert!(load(temp.path(), "out_dir: static\n").is_err());
    assert!(load(temp.path(), "out_dir: static/dist\n").is_err());
}

#[test]
fn test_out_dir_cannot_contain_crate() {
    let temp = create_project();
    let app = temp.path().join("web/app");
    fs::create_dir_all(&app).unwrap();
    fs::write(app.join("Cargo.toml"), "[package]\n").unwrap();

    let err = load(temp.path(), "crate: web/app\nout_dir: web\n").unwrap_err();
    assert!(err.to_string().contains("crate directory"));
}

#[test]
fn test_out_dir_inside_crate_is_allowed() {
    let temp = create_project();
    assert!(load(temp.path(), "out_dir: target/site\n").is_ok());
}

#[test]
fn test_find_config_none() {
    let temp = TempDir::new().unwrap();
    let nested = temp.path().join("a/b");
    fs::create_dir_all(&nested).unwrap();
    // Ancestors of the temp dir are outside our control, only assert the
    // lookup never reports a file inside the fresh tree.
    if let Some(found) = find_config(&nested) {
        assert!(!found.starts_with(temp.path()));
    }
}

#[test]
fn test_mode_display() {
    assert_eq!(Mode::Development.to_string(), "development");
    assert_eq!(Mode::Production.to_string(), "production");
}
