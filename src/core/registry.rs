//! The package-root registry.
//!
//! A single append-only table from root name to declared root, shared across
//! every build file in one graph construction. Declaration may run in
//! parallel, so inserts take a write lock; lookups are read-only and
//! order-independent — a root is found by name no matter which build file
//! declared it first, as long as it is registered before resolution runs.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::core::declaration::RootModule;

/// Registry of declared package roots, keyed by name.
///
/// Owned by the build graph for one construction; never a process-wide
/// singleton, so runs stay isolated and testable. Name uniqueness is
/// enforced by the declaring framework (the build-file loader), not here.
#[derive(Debug, Default)]
pub struct RootRegistry {
    table: RwLock<HashMap<String, Arc<RootModule>>>,
}

impl RootRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        RootRegistry {
            table: RwLock::new(HashMap::new()),
        }
    }

    /// Register a declared root. Safe under concurrent declaration; the lock
    /// is held only for the insert.
    pub fn register(&self, root: Arc<RootModule>) {
        let mut table = self.table.write().unwrap();
        tracing::debug!(root = %root.name(), dir = %root.dir, "registered package root");
        table.insert(root.name().to_string(), root);
    }

    /// Look up a root by exact name.
    pub fn lookup(&self, name: &str) -> Option<Arc<RootModule>> {
        self.table.read().unwrap().get(name).cloned()
    }

    /// All registered roots, ordered by name for deterministic iteration.
    pub fn roots(&self) -> Vec<Arc<RootModule>> {
        let table = self.table.read().unwrap();
        let mut roots: Vec<_> = table.values().cloned().collect();
        roots.sort_by(|a, b| a.name().cmp(b.name()));
        roots
    }

    /// Number of registered roots.
    pub fn len(&self) -> usize {
        self.table.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
