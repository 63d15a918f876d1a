//! Filesystem utilities.
//!
//! Paths inside the module tree are tracked as tree-relative strings with
//! forward slashes (the tree root itself is the empty string); these helpers
//! bridge them to real filesystem paths.

use std::fs;
use std::path::{Component, Path};

use anyhow::{Context, Result};

/// Join a tree-relative directory and a file name.
pub fn tree_join(dir: &str, file: &str) -> String {
    if dir.is_empty() {
        file.to_string()
    } else {
        format!("{}/{}", dir, file)
    }
}

/// Check whether a tree-relative path names an existing file under `tree_root`.
pub fn tree_exists(tree_root: &Path, rel: &str) -> bool {
    tree_root.join(rel).is_file()
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write file: {}", path.display()))
}

/// Copy a file, creating parent directories of the destination if needed.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        ensure_dir(parent)?;
    }
    fs::copy(src, dst)
        .with_context(|| format!("failed to copy {} to {}", src.display(), dst.display()))?;
    Ok(())
}

/// Express `path` as a tree-relative string under `base`.
///
/// Returns `None` when `path` does not sit inside `base`.
pub fn rel_dir_string(base: &Path, path: &Path) -> Option<String> {
    let rel = pathdiff::diff_paths(path, base)?;
    let mut parts = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(parts.join("/"))
}
