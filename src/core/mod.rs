//! Core data model: module declarations, the root registry, and the build
//! graph under construction.

pub mod declaration;
pub mod graph;
pub mod registry;
pub mod version;

pub use declaration::{BuildFile, PackageDecl, PackageModule, RootDecl, RootModule};
pub use graph::BuildGraph;
pub use registry::RootRegistry;
pub use version::Version;
