//! `berth check` command

use anyhow::{bail, Result};

use crate::cli::CheckArgs;
use berth::util::diagnostic;

pub fn execute(args: CheckArgs, color: bool) -> Result<()> {
    let (resolve, errors, _actions) = super::load_and_resolve(&args.dir, args.config.as_deref())?;

    for error in &errors {
        diagnostic::emit(&error.to_diagnostic(), color);
    }

    if !errors.is_empty() {
        bail!("{} module(s) failed to resolve", errors.len());
    }

    println!(
        "{} root(s), {} package(s) resolved",
        resolve.roots.len(),
        resolve.packages.len()
    );
    Ok(())
}
