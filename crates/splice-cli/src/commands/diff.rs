//! Diff command implementation
//!
//! Previews the changes apply would make without applying them.

use std::io::Write;
use std::path::Path;

use colored::Colorize;

use splice_core::{PatchEngine, ReplacementSet};

use crate::error::Result;

/// Run the diff command
///
/// Renders one unified diff per target that would change, colored like git.
/// Unchanged targets are omitted.
pub fn run_diff(config: &Path, root: &Path) -> Result<()> {
    let set = ReplacementSet::load(config)?;
    let engine = PatchEngine::new(root, set);
    let diffs = engine.diff()?;

    let mut stdout = std::io::stdout().lock();

    if diffs.is_empty() {
        writeln!(
            stdout,
            "{} No changes. Targets already match.",
            "OK".green().bold()
        )?;
        return Ok(());
    }

    for diff in &diffs {
        for line in diff.unified.lines() {
            if line.starts_with("+++") || line.starts_with("---") {
                writeln!(stdout, "{}", line.bold())?;
            } else if line.starts_with('+') {
                writeln!(stdout, "{}", line.green())?;
            } else if line.starts_with('-') {
                writeln!(stdout, "{}", line.red())?;
            } else if line.starts_with("@@") {
                writeln!(stdout, "{}", line.cyan())?;
            } else {
                writeln!(stdout, "{line}")?;
            }
        }
    }
    writeln!(stdout)?;
    writeln!(
        stdout,
        "{} {} target(s) would change.",
        "=>".blue().bold(),
        diffs.len()
    )?;

    Ok(())
}
