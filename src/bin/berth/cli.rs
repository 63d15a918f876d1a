//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// Berth - a package-root registry and build-target emitter for versioned interface packages
#[derive(Parser)]
#[command(name = "berth")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load and resolve the module tree, reporting every failure
    Check(CheckArgs),

    /// Emit the secondary build representation
    Emit(EmitArgs),

    /// Show (or execute) the scheduled snapshot copies
    Plan(PlanArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct CheckArgs {
    /// Module tree root (defaults to the current directory)
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Freeze/platform configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct EmitArgs {
    /// Module tree root (defaults to the current directory)
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Freeze/platform configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Dump targets as JSON instead of build-file syntax
    #[arg(long)]
    pub json: bool,

    /// Write one BUILD.bazel per directory instead of printing
    #[arg(long)]
    pub write: bool,
}

#[derive(Args)]
pub struct PlanArgs {
    /// Module tree root (defaults to the current directory)
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Freeze/platform configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output directory for executed copies
    #[arg(long, default_value = "out")]
    pub out_dir: PathBuf,

    /// Execute the copies instead of printing them
    #[arg(long)]
    pub execute: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
