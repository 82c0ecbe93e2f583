//! Cross-platform path utilities for wasmpak
//!
//! This module provides utilities for handling paths across different platforms
//! (Windows, macOS, Linux) with consistent behavior.

use std::path::{Component, Path, PathBuf};

/// Convert a path to a string with forward slashes.
///
/// Used for every relative path that ends up in the manifest or in a
/// generated script, so output is identical on all platforms.
///
/// # Examples
///
/// ```ignore
/// use std::path::Path;
///
/// assert_eq!(to_forward_slashes(Path::new("C:\\Users\\file.txt")), "C:/Users/file.txt");
/// ```
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Normalize a path lexically, without touching the file system.
///
/// Removes `.` components and folds `..` into the preceding normal component.
/// Leading `..` components of a relative path are kept. Needed for paths that
/// may not exist yet (such as the output directory), where `canonicalize`
/// would fail.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last_is_normal =
                    matches!(out.components().next_back(), Some(Component::Normal(_)));
                if last_is_normal {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Whether `path` is `base` or lies below it (both already normalized)
pub fn is_within(path: &Path, base: &Path) -> bool {
    path.starts_with(base)
}

/// Whether a relative path escapes its base through `..`, a root or a prefix
pub fn escapes_base(relative: &str) -> bool {
    Path::new(relative).components().any(|c| {
        matches!(
            c,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}

/// Make a module name from an arbitrary directory name.
///
/// Characters outside `[A-Za-z0-9_]` become underscores, the way cargo turns
/// `my-app` into the `my_app` library name. Returns "module" if nothing is left.
///
/// ```ignore
/// assert_eq!(module_name_from("my-app"), "my_app");
/// assert_eq!(module_name_from("..."), "module");
/// ```
pub fn module_name_from(name: &str) -> String {
    let key: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if key.chars().all(|c| c == '_') {
        "module".to_string()
    } else {
        key
    }
}
