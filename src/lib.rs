//! Berth - a package-root registry and build-target emitter for versioned
//! interface packages.
//!
//! Interface packages are named, versioned units of interface-definition
//! sources anchored at a shared package root. This crate owns the root
//! registry, the cross-module resolution pass, and the dual emission that
//! projects one resolved graph into both primitive copy actions and a
//! secondary declarative target representation.

pub mod builder;
pub mod core;
pub mod emit;
pub mod ops;
pub mod resolver;
pub mod util;

pub use crate::core::{BuildGraph, RootRegistry, Version};
pub use crate::emit::{BuildTarget, TargetEmitter};
pub use crate::resolver::{Resolve, Resolver};
