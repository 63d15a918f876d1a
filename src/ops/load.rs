//! Build-file discovery and loading.
//!
//! Walks the module tree for `Berth.toml` files, parses them in parallel,
//! and declares their modules into a fresh build graph. Declaration order
//! across files carries no meaning; references stay unresolved until the
//! resolution pass runs against the completed registry.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::core::declaration::BuildFile;
use crate::core::graph::BuildGraph;
use crate::util::fs::{read_to_string, rel_dir_string};

/// File name of the per-directory build file.
pub const BUILD_FILE_NAME: &str = "Berth.toml";

/// Load every build file under `tree_root` into a new graph.
pub fn load_tree(tree_root: &Path) -> Result<BuildGraph> {
    let mut files: Vec<(String, PathBuf)> = Vec::new();
    for entry in WalkDir::new(tree_root).follow_links(false) {
        let entry =
            entry.with_context(|| format!("failed to walk {}", tree_root.display()))?;
        if entry.file_type().is_file() && entry.file_name() == BUILD_FILE_NAME {
            let dir = entry.path().parent().unwrap_or(tree_root);
            let rel = rel_dir_string(tree_root, dir).ok_or_else(|| {
                anyhow!(
                    "build file {} is outside the module tree",
                    entry.path().display()
                )
            })?;
            files.push((rel, entry.path().to_path_buf()));
        }
    }
    // Deterministic declaration order for error reporting; resolution does
    // not depend on it.
    files.sort();

    let parsed: Vec<(String, BuildFile)> = files
        .par_iter()
        .map(|(dir, path)| {
            tracing::debug!(file = %path.display(), "parsing build file");
            let text = read_to_string(path)?;
            let file: BuildFile = toml::from_str(&text)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            Ok((dir.clone(), file))
        })
        .collect::<Result<_>>()?;

    let graph = BuildGraph::new();
    for (dir, file) in parsed {
        for root in file.package_roots {
            graph.declare_root(root, &dir)?;
        }
        for package in file.interface_packages {
            graph.declare_package(package, &dir)?;
        }
    }

    tracing::info!(
        files = files.len(),
        modules = graph.module_count(),
        "loaded build files"
    );
    Ok(graph)
}
