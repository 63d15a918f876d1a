//! The build graph under construction: every declared module.
//!
//! The graph is the declaring framework of the registry contract: it owns
//! module-name uniqueness across the whole tree and hands roots to the
//! registry the moment they are declared. Packages are collected for the
//! later resolution pass.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::core::declaration::{PackageDecl, PackageModule, RootDecl, RootModule};
use crate::core::registry::RootRegistry;

/// Error raised while declaring modules into the graph.
#[derive(Debug, Error)]
pub enum DeclareError {
    #[error("duplicate module name `{name}` (declared in //{first} and //{second})")]
    DuplicateModule {
        name: String,
        first: String,
        second: String,
    },
}

/// All modules declared for one build-graph construction.
#[derive(Debug, Default)]
pub struct BuildGraph {
    registry: RootRegistry,
    packages: Mutex<Vec<Arc<PackageModule>>>,
    // module name -> declaring dir, across both module kinds
    names: Mutex<HashMap<String, String>>,
}

impl BuildGraph {
    pub fn new() -> Self {
        BuildGraph {
            registry: RootRegistry::new(),
            packages: Mutex::new(Vec::new()),
            names: Mutex::new(HashMap::new()),
        }
    }

    /// The root registry for this construction.
    pub fn registry(&self) -> &RootRegistry {
        &self.registry
    }

    /// Declare a package root; it is registered immediately.
    pub fn declare_root(&self, decl: RootDecl, dir: &str) -> Result<Arc<RootModule>, DeclareError> {
        self.claim_name(&decl.name, dir)?;
        let module = Arc::new(RootModule {
            decl,
            dir: dir.to_string(),
        });
        self.registry.register(module.clone());
        Ok(module)
    }

    /// Declare an interface package.
    pub fn declare_package(
        &self,
        decl: PackageDecl,
        dir: &str,
    ) -> Result<Arc<PackageModule>, DeclareError> {
        self.claim_name(&decl.name, dir)?;
        let module = Arc::new(PackageModule {
            decl,
            dir: dir.to_string(),
        });
        tracing::debug!(package = %module.name(), dir, "declared interface package");
        self.packages.lock().unwrap().push(module.clone());
        Ok(module)
    }

    /// All declared packages, ordered by name for deterministic iteration.
    pub fn packages(&self) -> Vec<Arc<PackageModule>> {
        let mut packages = self.packages.lock().unwrap().clone();
        packages.sort_by(|a, b| a.name().cmp(b.name()));
        packages
    }

    /// Total number of declared modules.
    pub fn module_count(&self) -> usize {
        self.names.lock().unwrap().len()
    }

    fn claim_name(&self, name: &str, dir: &str) -> Result<(), DeclareError> {
        let mut names = self.names.lock().unwrap();
        if let Some(first) = names.get(name) {
            return Err(DeclareError::DuplicateModule {
                name: name.to_string(),
                first: first.clone(),
                second: dir.to_string(),
            });
        }
        names.insert(name.to_string(), dir.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root_decl(name: &str) -> RootDecl {
        RootDecl {
            name: name.to_string(),
            path: None,
            use_current: false,
            require_frozen: false,
        }
    }

    fn package_decl(name: &str, root: &str) -> PackageDecl {
        PackageDecl {
            name: name.to_string(),
            srcs: vec![],
            root: root.to_string(),
            interfaces: vec![],
        }
    }

    #[test]
    fn test_declared_root_is_registered() {
        let graph = BuildGraph::new();
        graph.declare_root(root_decl("android.hardware"), "hardware").unwrap();

        assert!(graph.registry().lookup("android.hardware").is_some());
        assert_eq!(graph.module_count(), 1);
    }

    #[test]
    fn test_duplicate_names_rejected_across_kinds() {
        let graph = BuildGraph::new();
        graph.declare_root(root_decl("shared.name"), "a").unwrap();

        let err = graph
            .declare_package(package_decl("shared.name", "shared.name"), "b")
            .unwrap_err();
        assert!(err.to_string().contains("duplicate module name `shared.name`"));
        assert!(err.to_string().contains("//a"));
        assert!(err.to_string().contains("//b"));
    }

    #[test]
    fn test_packages_sorted() {
        let graph = BuildGraph::new();
        graph.declare_package(package_decl("pkg@1.1", "r"), "").unwrap();
        graph.declare_package(package_decl("pkg@1.0", "r"), "").unwrap();

        let names: Vec<_> = graph.packages().iter().map(|p| p.name().to_string()).collect();
        assert_eq!(names, vec!["pkg@1.0", "pkg@1.1"]);
    }
}
