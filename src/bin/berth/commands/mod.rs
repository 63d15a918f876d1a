//! Command implementations.

pub mod check;
pub mod completions;
pub mod emit;
pub mod plan;

use std::path::Path;

use anyhow::Result;

use berth::builder::RecordedActions;
use berth::ops::load_tree;
use berth::resolver::{freeze, ResolveError, Resolver};
use berth::util::EmitConfig;
use berth::Resolve;

/// Load the tree, apply config, and run the resolution pass.
pub(crate) fn load_and_resolve(
    dir: &Path,
    config: Option<&Path>,
) -> Result<(Resolve, Vec<ResolveError>, RecordedActions)> {
    let config = match config {
        Some(path) => EmitConfig::load(path)?,
        None => EmitConfig::default(),
    };
    let (history, frozen) = freeze::from_config(&config)?;

    let graph = load_tree(dir)?;
    let mut actions = RecordedActions::new();
    let resolver = Resolver::new(dir, &history, &frozen);
    let (resolve, errors) = resolver.resolve(&graph, &mut actions);
    Ok((resolve, errors, actions))
}
