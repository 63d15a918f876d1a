//! Build-file schema and declared modules.
//!
//! Each directory in the module tree may carry one `Berth.toml` declaring
//! `[[package_root]]` and `[[interface_package]]` modules. Declarations are
//! plain records: references between them stay unresolved names until the
//! resolution pass runs against the completed registry.

use serde::Deserialize;

/// File name of the current-API snapshot tracked at a package root.
pub const SNAPSHOT_FILE: &str = "current.txt";

/// One parsed build file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildFile {
    #[serde(default, rename = "package_root")]
    pub package_roots: Vec<RootDecl>,

    #[serde(default, rename = "interface_package")]
    pub interface_packages: Vec<PackageDecl>,
}

/// A declared package root.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RootDecl {
    /// Unique module name; the registry key.
    pub name: String,

    /// Anchor directory, tree-relative. It is recommended not to set this
    /// and let it default to the declaring directory.
    pub path: Option<String>,

    /// True to require a current-API snapshot here.
    ///
    /// When false, the snapshot is used only when it exists.
    #[serde(default)]
    pub use_current: bool,

    /// True to require every package anchored at this root to be frozen.
    #[serde(default)]
    pub require_frozen: bool,
}

/// A declared interface package.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageDecl {
    /// Unique module name, conventionally `<base>@<major>.<minor>`.
    pub name: String,

    /// Interface definition files, order-preserving.
    #[serde(default)]
    pub srcs: Vec<String>,

    /// Name of the package root this package is anchored at.
    pub root: String,

    /// Names of earlier-version packages this one extends.
    #[serde(default)]
    pub interfaces: Vec<String>,
}

/// A declared package root together with its declaring directory.
#[derive(Debug)]
pub struct RootModule {
    pub decl: RootDecl,
    /// Declaring directory, tree-relative.
    pub dir: String,
}

impl RootModule {
    pub fn name(&self) -> &str {
        &self.decl.name
    }

    pub fn require_frozen(&self) -> bool {
        self.decl.require_frozen
    }
}

/// A declared interface package together with its declaring directory.
#[derive(Debug)]
pub struct PackageModule {
    pub decl: PackageDecl,
    /// Declaring directory, tree-relative.
    pub dir: String,
}

impl PackageModule {
    pub fn name(&self) -> &str {
        &self.decl.name
    }
}
