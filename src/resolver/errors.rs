//! Resolution error types and diagnostics.
//!
//! Every variant is a structural or configuration problem naming the
//! offending module; nothing here is transient, so there are no retries.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error resolving a single module.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ResolveError {
    #[error("root `{root}`: cannot use unrelated path `{path}` with use_current")]
    #[diagnostic(
        code(berth::resolve::current_path_mismatch),
        help("path defaults to the declaring directory; remove use_current or correct path")
    )]
    CurrentPathMismatch {
        root: String,
        path: String,
        module_dir: String,
    },

    #[error("root `{root}`: required snapshot `{expected}` does not exist")]
    #[diagnostic(code(berth::resolve::missing_snapshot))]
    MissingSnapshot { root: String, expected: String },

    #[error("package `{package}` references unknown root `{root}`")]
    #[diagnostic(code(berth::resolve::unknown_root))]
    UnknownRoot { package: String, root: String },

    #[error("package `{package}` references unknown prior version `{reference}`")]
    #[diagnostic(code(berth::resolve::unknown_prior_version))]
    UnknownPriorVersion { package: String, reference: String },

    #[error("package `{package}` is not frozen, but root `{root}` requires frozen interfaces")]
    #[diagnostic(code(berth::resolve::not_frozen))]
    NotFrozen { package: String, root: String },

    #[error("cycle detected in version lineage: {}", .members.join(" -> "))]
    #[diagnostic(code(berth::resolve::lineage_cycle))]
    LineageCycle { members: Vec<String> },
}

impl ResolveError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ResolveError::CurrentPathMismatch {
                root,
                path,
                module_dir,
            } => Diagnostic::error(format!(
                "cannot use unrelated path with use_current on root `{}`",
                root
            ))
            .with_context(format!(
                "path is `{}`, but the root is declared in `{}`",
                path, module_dir
            ))
            .with_context("presumably this root should be declared at its path")
            .with_suggestion(format!(
                "Move the root declaration to `{}`, or drop the explicit path",
                path
            ))
            .with_suggestion("Remove use_current if the snapshot lives elsewhere"),

            ResolveError::MissingSnapshot { root, expected } => Diagnostic::error(format!(
                "root `{}` requires a current-API snapshot",
                root
            ))
            .with_context(format!("expected `{}` to exist", expected))
            .with_suggestion("Create the snapshot file, or drop use_current"),

            ResolveError::UnknownRoot { package, root } => Diagnostic::error(format!(
                "package `{}` references unknown root `{}`",
                package, root
            ))
            .with_context(suggestions::CHECK_SPELLING)
            .with_suggestion(format!("Declare a package_root named `{}`", root))
            .with_suggestion("Fix the root reference in the package declaration"),

            ResolveError::UnknownPriorVersion { package, reference } => {
                Diagnostic::error(format!(
                    "package `{}` references unknown prior version `{}`",
                    package, reference
                ))
                .with_context(suggestions::CHECK_SPELLING)
                .with_suggestion(format!(
                    "Declare `{}`, or remove it from the lineage of `{}`",
                    reference, package
                ))
            }

            ResolveError::NotFrozen { package, root } => Diagnostic::error(format!(
                "package `{}` must be frozen",
                package
            ))
            .with_context(format!("root `{}` requires frozen interfaces", root))
            .with_suggestion(format!("Freeze the API surface of `{}`", package))
            .with_suggestion(format!("Drop require_frozen from root `{}`", root)),

            ResolveError::LineageCycle { members } => {
                Diagnostic::error("cycle detected in version lineage")
                    .with_context(format!("cycle: {}", members.join(" -> ")))
                    .with_suggestion("A version may only extend earlier versions")
            }
        }
    }
}
