//! The secondary build representation.
//!
//! A read-only projection of resolved state into declarative targets:
//! rule class, load location, name, and an attribute map. Nothing here
//! touches the primitive build-action path.

pub mod emitter;
pub mod target;

pub use emitter::{render_build_file, TargetEmitter};
pub use target::{AttrValue, BuildTarget, Label};
