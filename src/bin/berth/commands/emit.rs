//! `berth emit` command

use std::collections::BTreeMap;

use anyhow::{bail, Result};

use crate::cli::EmitArgs;
use berth::emit::{render_build_file, BuildTarget, TargetEmitter};
use berth::util::diagnostic::suggestions;
use berth::util::fs::write_string;

pub fn execute(args: EmitArgs) -> Result<()> {
    let (resolve, errors, _) = super::load_and_resolve(&args.dir, args.config.as_deref())?;
    if !errors.is_empty() {
        bail!(
            "{} module(s) failed to resolve\n{}",
            errors.len(),
            suggestions::RUN_CHECK
        );
    }

    let emitter = TargetEmitter::new(&args.dir, &resolve);
    let targets = emitter.emit();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&targets)?);
        return Ok(());
    }

    let mut by_dir: BTreeMap<&str, Vec<&BuildTarget>> = BTreeMap::new();
    for target in &targets {
        by_dir.entry(target.dir.as_str()).or_default().push(target);
    }

    if args.write {
        for (dir, targets) in &by_dir {
            let path = args.dir.join(dir).join("BUILD.bazel");
            write_string(&path, &render_build_file(targets))?;
            println!("wrote {}", path.display());
        }
    } else {
        for (dir, targets) in &by_dir {
            println!("# //{}", dir);
            print!("{}", render_build_file(targets));
            println!();
        }
    }

    Ok(())
}
