//! The resolution pass: declared modules in, resolved state out.
//!
//! Runs once, after every build file has been loaded. Each module resolves
//! exactly once and is never reconsidered; a failure halts only the module
//! that failed, and unrelated modules keep resolving.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use petgraph::algo::tarjan_scc;
use petgraph::graph::DiGraph;

use crate::builder::actions::{ActionSink, CopyAction};
use crate::core::declaration::{PackageModule, RootModule, SNAPSHOT_FILE};
use crate::core::graph::BuildGraph;
use crate::core::version::split_versioned_name;
use crate::resolver::errors::ResolveError;
use crate::resolver::freeze::{FreezeOracle, PlatformHistory};
use crate::util::fs::{tree_exists, tree_join};

/// A package root after resolution.
#[derive(Debug, Clone)]
pub struct ResolvedRoot {
    pub name: String,
    /// Declaring directory, tree-relative.
    pub dir: String,
    /// Anchor path after defaulting.
    pub path: String,
    /// The path property as declared, if it was declared.
    pub declared_path: Option<String>,
    pub require_frozen: bool,
    /// Tree-relative snapshot path, when one applies.
    pub current_snapshot: Option<String>,
    /// Output-relative path of the generated snapshot copy. Present iff
    /// `current_snapshot` is.
    pub generated_artifact: Option<String>,
}

impl ResolvedRoot {
    /// Codegen flag handed to the IDL compiler: `-r<name>:<path>`.
    pub fn full_root_flag(&self) -> String {
        format!("-r{}:{}", self.name, self.path)
    }

    /// Generated outputs this root contributes as downstream inputs.
    pub fn outputs(&self) -> Vec<&str> {
        self.generated_artifact.iter().map(String::as_str).collect()
    }
}

/// A resolved reference to a prior version in the lineage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorRef {
    pub name: String,
    /// Directory the referenced package was declared in.
    pub dir: String,
}

/// An interface package after resolution.
#[derive(Debug, Clone)]
pub struct ResolvedPackage {
    pub name: String,
    /// Declaring directory, tree-relative.
    pub dir: String,
    /// Name of the anchoring root.
    pub root: String,
    /// Source files in declaration order.
    pub srcs: Vec<String>,
    /// Prior-version references; the package's dependency edges.
    pub deps: Vec<PriorRef>,
    /// Derived minimum-platform-version stamp, when history has an entry.
    pub min_sdk_version: Option<String>,
}

/// Output of a resolution pass.
#[derive(Debug, Default)]
pub struct Resolve {
    pub roots: BTreeMap<String, ResolvedRoot>,
    pub packages: BTreeMap<String, ResolvedPackage>,
}

impl Resolve {
    pub fn root(&self, name: &str) -> Option<&ResolvedRoot> {
        self.roots.get(name)
    }

    pub fn package(&self, name: &str) -> Option<&ResolvedPackage> {
        self.packages.get(name)
    }
}

/// Resolves a complete build graph.
pub struct Resolver<'a> {
    tree_root: &'a Path,
    history: &'a PlatformHistory,
    freeze: &'a dyn FreezeOracle,
}

impl<'a> Resolver<'a> {
    pub fn new(
        tree_root: &'a Path,
        history: &'a PlatformHistory,
        freeze: &'a dyn FreezeOracle,
    ) -> Self {
        Resolver {
            tree_root,
            history,
            freeze,
        }
    }

    /// Run the pass.
    ///
    /// Returns resolved state plus every per-module failure; a failed module
    /// is absent from the resolved maps, unrelated modules are unaffected.
    pub fn resolve(
        &self,
        graph: &BuildGraph,
        sink: &mut dyn ActionSink,
    ) -> (Resolve, Vec<ResolveError>) {
        let mut resolve = Resolve::default();
        let mut errors = Vec::new();

        for root in graph.registry().roots() {
            match self.resolve_root(&root, sink) {
                Ok(resolved) => {
                    resolve.roots.insert(resolved.name.clone(), resolved);
                }
                Err(e) => errors.push(e),
            }
        }

        let packages = graph.packages();
        let dirs: HashMap<&str, &str> = packages
            .iter()
            .map(|p| (p.name(), p.dir.as_str()))
            .collect();

        for pkg in &packages {
            match self.resolve_package(pkg, graph, &dirs) {
                Ok(resolved) => {
                    resolve.packages.insert(resolved.name.clone(), resolved);
                }
                Err(e) => errors.push(e),
            }
        }

        if let Some(err) = check_lineage(&packages) {
            if let ResolveError::LineageCycle { members } = &err {
                for member in members {
                    resolve.packages.remove(member);
                }
            }
            errors.push(err);
        }

        tracing::info!(
            roots = resolve.roots.len(),
            packages = resolve.packages.len(),
            failures = errors.len(),
            "resolution pass finished"
        );

        (resolve, errors)
    }

    fn resolve_root(
        &self,
        root: &RootModule,
        sink: &mut dyn ActionSink,
    ) -> Result<ResolvedRoot, ResolveError> {
        let decl = &root.decl;

        // Path defaults to the declaring directory.
        let path = decl.path.clone().unwrap_or_else(|| root.dir.clone());

        let snapshot = tree_join(&path, SNAPSHOT_FILE);
        let current_snapshot = if decl.use_current {
            // use_current asserts the snapshot here; an unrelated path would
            // track some other directory's API surface.
            if path != root.dir {
                return Err(ResolveError::CurrentPathMismatch {
                    root: decl.name.clone(),
                    path,
                    module_dir: root.dir.clone(),
                });
            }
            if !tree_exists(self.tree_root, &snapshot) {
                return Err(ResolveError::MissingSnapshot {
                    root: decl.name.clone(),
                    expected: snapshot,
                });
            }
            Some(snapshot)
        } else if tree_exists(self.tree_root, &snapshot) {
            Some(snapshot)
        } else {
            None
        };

        // Schedule the artifact copy iff a snapshot resolved.
        let generated_artifact = current_snapshot.as_ref().map(|snap| {
            let output = tree_join(&tree_join(&root.dir, "gen"), &format!("{}.txt", decl.name));
            sink.schedule_copy(CopyAction {
                input: snap.clone(),
                output: output.clone(),
            });
            output
        });

        tracing::debug!(root = %decl.name, snapshot = ?current_snapshot, "resolved package root");

        Ok(ResolvedRoot {
            name: decl.name.clone(),
            dir: root.dir.clone(),
            path,
            declared_path: decl.path.clone(),
            require_frozen: decl.require_frozen,
            current_snapshot,
            generated_artifact,
        })
    }

    fn resolve_package(
        &self,
        pkg: &PackageModule,
        graph: &BuildGraph,
        dirs: &HashMap<&str, &str>,
    ) -> Result<ResolvedPackage, ResolveError> {
        let decl = &pkg.decl;

        let root = graph
            .registry()
            .lookup(&decl.root)
            .ok_or_else(|| ResolveError::UnknownRoot {
                package: decl.name.clone(),
                root: decl.root.clone(),
            })?;

        if root.require_frozen() && !self.freeze.is_frozen(&decl.name) {
            return Err(ResolveError::NotFrozen {
                package: decl.name.clone(),
                root: decl.root.clone(),
            });
        }

        let mut deps = Vec::with_capacity(decl.interfaces.len());
        for reference in &decl.interfaces {
            let dir = dirs
                .get(reference.as_str())
                .ok_or_else(|| ResolveError::UnknownPriorVersion {
                    package: decl.name.clone(),
                    reference: reference.clone(),
                })?;
            deps.push(PriorRef {
                name: reference.clone(),
                dir: (*dir).to_string(),
            });
        }

        let min_sdk_version = split_versioned_name(&decl.name)
            .and_then(|(_, version)| self.history.api_level(&decl.root, version))
            .map(str::to_string);

        Ok(ResolvedPackage {
            name: decl.name.clone(),
            dir: pkg.dir.clone(),
            root: decl.root.clone(),
            srcs: decl.srcs.clone(),
            deps,
            min_sdk_version,
        })
    }
}

/// Detect cycles in the prior-version lineage.
///
/// References to undeclared packages are skipped here; they already failed
/// per-package resolution.
fn check_lineage(packages: &[Arc<PackageModule>]) -> Option<ResolveError> {
    let mut graph = DiGraph::<&str, ()>::new();
    let mut nodes = HashMap::new();
    for pkg in packages {
        nodes.insert(pkg.name(), graph.add_node(pkg.name()));
    }
    for pkg in packages {
        for dep in &pkg.decl.interfaces {
            if let Some(&to) = nodes.get(dep.as_str()) {
                graph.add_edge(nodes[pkg.name()], to, ());
            }
        }
    }

    for scc in tarjan_scc(&graph) {
        let cyclic = scc.len() > 1 || scc.iter().any(|&n| graph.contains_edge(n, n));
        if cyclic {
            let mut members: Vec<String> = scc.iter().map(|&n| graph[n].to_string()).collect();
            members.sort();
            return Some(ResolveError::LineageCycle { members });
        }
    }
    None
}
