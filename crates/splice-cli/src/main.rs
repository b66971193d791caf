//! splice CLI
//!
//! The command-line interface for patching marked regions across a source
//! tree from a YAML replacement set.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);
    if cli.verbose {
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Some(cmd) => execute_command(cmd),
        None => {
            // No command provided - show help hint
            println!("{} marker-based source patcher", "splice".green().bold());
            println!();
            println!("Run {} for available commands.", "splice --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Apply {
            config,
            root,
            dry_run,
        } => commands::run_apply(&config, &root, dry_run),
        Commands::Check { config, root, json } => commands::run_check(&config, &root, json),
        Commands::Diff { config, root } => commands::run_diff(&config, &root),
        Commands::Completions { shell } => {
            commands::run_completions(shell);
            Ok(())
        }
    }
}
