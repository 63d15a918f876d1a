//! High-level operations over the module tree.

pub mod load;

pub use load::{load_tree, BUILD_FILE_NAME};
