//! Apply command implementation
//!
//! Loads a configuration document and patches every target it lists.

use std::path::Path;

use colored::Colorize;

use splice_core::{ApplyOptions, PatchEngine, ReplacementSet};

use crate::error::Result;

/// Run the apply command
///
/// Targets are processed in document order; the first failure ends the run
/// with earlier targets already patched.
pub fn run_apply(config: &Path, root: &Path, dry_run: bool) -> Result<()> {
    println!(
        "{} Applying {}...",
        "=>".blue().bold(),
        config.display().to_string().cyan()
    );

    let set = ReplacementSet::load(config)?;
    let engine = PatchEngine::new(root, set);
    let report = engine.apply(ApplyOptions { dry_run })?;

    if report.actions.is_empty() {
        println!(
            "{} Already up to date. No changes needed.",
            "OK".green().bold()
        );
        return Ok(());
    }

    for action in &report.actions {
        println!("   {} {}", "+".green(), action);
    }
    println!("{} {}", "OK".green().bold(), report.summary());

    Ok(())
}
