//! Check command implementation
//!
//! Validates the configuration against the target tree without writing.

use std::path::Path;

use colored::Colorize;

use splice_core::{CheckReport, CheckStatus, PatchEngine, ReplacementSet};

use crate::error::{CliError, Result};

/// Run the check command
///
/// Prints one line per finding, or the report as JSON when `json` is set.
/// Returns an error unless the report is healthy, so CI can gate on the
/// exit code.
pub fn run_check(config: &Path, root: &Path, json: bool) -> Result<()> {
    let set = ReplacementSet::load(config)?;
    let engine = PatchEngine::new(root, set);
    let report = engine.check();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.is_healthy() {
        Ok(())
    } else {
        Err(CliError::user(format!(
            "check found {} problem(s)",
            report.findings.len()
        )))
    }
}

fn print_report(report: &CheckReport) {
    match report.status {
        CheckStatus::Healthy => {
            println!(
                "{} All targets match. No drift detected.",
                "OK".green().bold()
            );
        }
        CheckStatus::Drifted => {
            println!("{} Targets have drifted:", "DRIFTED".yellow().bold());
            for finding in &report.findings {
                println!(
                    "   {} {}: {}",
                    "!".yellow(),
                    finding.file.cyan(),
                    finding.detail
                );
            }
        }
        CheckStatus::Broken => {
            println!("{} Apply would fail:", "BROKEN".red().bold());
            for finding in &report.findings {
                println!(
                    "   {} {}: {}",
                    "!".red(),
                    finding.file.cyan(),
                    finding.detail
                );
            }
        }
    }
}
