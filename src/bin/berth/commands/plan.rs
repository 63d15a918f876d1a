//! `berth plan` command

use anyhow::{bail, Result};

use crate::cli::PlanArgs;
use berth::builder::LocalExecutor;
use berth::util::diagnostic::suggestions;

pub fn execute(args: PlanArgs) -> Result<()> {
    let (_resolve, errors, actions) = super::load_and_resolve(&args.dir, args.config.as_deref())?;
    if !errors.is_empty() {
        bail!(
            "{} module(s) failed to resolve\n{}",
            errors.len(),
            suggestions::RUN_CHECK
        );
    }

    if actions.is_empty() {
        println!("(no snapshot copies scheduled)");
        return Ok(());
    }

    if args.execute {
        let executor = LocalExecutor::new(&args.dir, &args.out_dir);
        let count = executor.execute(actions.actions())?;
        println!("executed {} copy action(s) into {}", count, args.out_dir.display());
    } else {
        for action in actions.actions() {
            println!("{}", action.description());
        }
    }

    Ok(())
}
