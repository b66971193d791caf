//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// splice - Patch marked regions across a source tree
#[derive(Parser, Debug)]
#[command(name = "splice")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Apply a replacement set to the target tree
    ///
    /// Targets are patched in configuration order; the first failure stops
    /// the run and leaves earlier targets patched.
    ///
    /// Examples:
    ///   splice apply                     # splice.yaml against the current directory
    ///   splice apply -c release.yaml     # a different configuration document
    ///   splice apply --root ../checkout  # patch another tree
    ///   splice apply --dry-run           # preview without writing
    Apply {
        /// Configuration document to apply
        #[arg(short, long, default_value = "splice.yaml", env = "SPLICE_CONFIG")]
        config: PathBuf,

        /// Root directory target paths resolve under
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Compute every change without writing any of them
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate targets and keys without writing
    ///
    /// Exits non-zero when any target is missing or malformed, or when keys
    /// and markers have drifted apart.
    Check {
        /// Configuration document to validate
        #[arg(short, long, default_value = "splice.yaml", env = "SPLICE_CONFIG")]
        config: PathBuf,

        /// Root directory target paths resolve under
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Output the report as JSON for CI integration
        #[arg(long)]
        json: bool,
    },

    /// Show the changes apply would make, as unified diffs
    Diff {
        /// Configuration document to preview
        #[arg(short, long, default_value = "splice.yaml", env = "SPLICE_CONFIG")]
        config: PathBuf,

        /// Root directory target paths resolve under
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },

    /// Generate shell completions
    ///
    /// Outputs completion script for your shell.
    ///
    /// Examples:
    ///   splice completions bash > ~/.local/share/bash-completion/completions/splice
    ///   splice completions zsh > ~/.zfunc/_splice
    ///   splice completions fish > ~/.config/fish/completions/splice.fish
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
