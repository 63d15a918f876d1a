//! Injected freeze and platform-history inputs.
//!
//! Whether a declared version is frozen, and which platform API level a
//! root's packages first appeared at, are historical facts supplied from
//! outside. Both are plain lookups here, loaded from configuration.

use std::collections::{BTreeMap, HashMap, HashSet};

use anyhow::{Context, Result};

use crate::core::version::Version;
use crate::util::config::EmitConfig;

/// Externally supplied predicate deciding whether a declared interface
/// package version is API-frozen.
pub trait FreezeOracle: Send + Sync {
    fn is_frozen(&self, package: &str) -> bool;
}

/// Freeze predicate backed by an explicit set of package names.
#[derive(Debug, Clone, Default)]
pub struct FrozenSet {
    names: HashSet<String>,
}

impl FrozenSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FrozenSet {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        self.names.insert(name.into());
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FreezeOracle for FrozenSet {
    fn is_frozen(&self, package: &str) -> bool {
        self.names.contains(package)
    }
}

/// Historical first-appearance table: (root name, version) → platform API
/// level. Lookups miss unless an entry was loaded; nothing is derived.
#[derive(Debug, Clone, Default)]
pub struct PlatformHistory {
    table: HashMap<String, BTreeMap<Version, String>>,
}

impl PlatformHistory {
    pub fn new() -> Self {
        PlatformHistory::default()
    }

    pub fn insert(&mut self, root: impl Into<String>, version: Version, api_level: impl Into<String>) {
        self.table
            .entry(root.into())
            .or_default()
            .insert(version, api_level.into());
    }

    /// API level for packages of `root` that first appeared at `version`.
    pub fn api_level(&self, root: &str, version: Version) -> Option<&str> {
        self.table.get(root)?.get(&version).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Build both injected inputs from a parsed config file.
pub fn from_config(config: &EmitConfig) -> Result<(PlatformHistory, FrozenSet)> {
    let mut history = PlatformHistory::new();
    for entry in &config.platform {
        let version: Version = entry
            .version
            .parse()
            .with_context(|| format!("platform entry for root `{}`", entry.root))?;
        history.insert(entry.root.clone(), version, entry.api_level.clone());
    }
    Ok((history, FrozenSet::new(config.frozen.iter().cloned())))
}
