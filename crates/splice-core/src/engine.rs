//! PatchEngine implementation
//!
//! The PatchEngine drives one run of a replacement set against a target
//! tree: resolve each configured path under the root, dispatch on its
//! directive, and stop at the first failure. Files already written before a
//! failure stay written; nothing rolls back.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use splice_markers::{CommentStyle, MOVE_KEY, MarkerSyntax, rewrite, scan};

use crate::check::{CheckFinding, CheckReport, FindingKind};
use crate::diff::FileDiff;
use crate::error::{Error, Result};
use crate::io;
use crate::model::{FileDirective, ReplacementSet, TargetEntry};
use crate::path::TargetPath;

/// Options for apply runs
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyOptions {
    /// If true, compute every change without modifying the filesystem.
    /// Actions are prefixed with "[dry-run] would ...".
    pub dry_run: bool,
}

/// Report from an apply run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplyReport {
    /// Human-readable actions, one per write performed (or simulated).
    pub actions: Vec<String>,
    /// Targets processed before the run ended.
    pub files_processed: usize,
    pub regions_replaced: usize,
    pub regions_removed: usize,
    pub lines_replaced: usize,
    pub lines_removed: usize,
}

impl ApplyReport {
    /// One-line summary of the run for logs and CLI output.
    pub fn summary(&self) -> String {
        format!(
            "{} files processed, {} regions replaced, {} regions removed, {} lines replaced, {} lines removed",
            self.files_processed,
            self.regions_replaced,
            self.regions_removed,
            self.lines_replaced,
            self.lines_removed
        )
    }
}

/// Engine for patching a target tree from a replacement set
///
/// Three operations share one resolution scheme:
/// - **apply**: Write every configured change, in document order
/// - **check**: Validate targets and keys without writing
/// - **diff**: Render the changes apply would make as unified diffs
pub struct PatchEngine {
    /// Root the configured target paths resolve under.
    root: TargetPath,
    set: ReplacementSet,
}

impl PatchEngine {
    /// Create an engine for one replacement set rooted at `root`.
    pub fn new(root: impl Into<TargetPath>, set: ReplacementSet) -> Self {
        Self {
            root: root.into(),
            set,
        }
    }

    /// The root target paths resolve under.
    pub fn root(&self) -> &TargetPath {
        &self.root
    }

    /// The replacement set this engine runs.
    pub fn set(&self) -> &ReplacementSet {
        &self.set
    }

    fn resolve(&self, target: &TargetPath) -> PathBuf {
        self.root.join(target.as_str()).to_native()
    }

    fn syntax_for(&self, target: &TargetPath) -> MarkerSyntax {
        MarkerSyntax::new(CommentStyle::for_path(target.as_str()), self.set.dialect())
    }

    /// Apply every directive in document order.
    ///
    /// # Errors
    ///
    /// Returns the first failure and stops there. Targets processed before
    /// the failing one keep their new content.
    pub fn apply(&self, options: ApplyOptions) -> Result<ApplyReport> {
        let mut report = ApplyReport::default();
        for entry in &self.set {
            self.apply_entry(entry, options, &mut report)?;
            report.files_processed += 1;
        }
        Ok(report)
    }

    fn apply_entry(
        &self,
        entry: &TargetEntry,
        options: ApplyOptions,
        report: &mut ApplyReport,
    ) -> Result<()> {
        tracing::debug!("processing {} ({})", entry.path, entry.directive.kind());
        let native = self.resolve(&entry.path);
        if !native.exists() {
            return Err(Error::target_not_found(native));
        }

        match &entry.directive {
            FileDirective::Overwrite(content) => {
                if options.dry_run {
                    report.actions.push(format!(
                        "[dry-run] would overwrite {} ({} bytes)",
                        entry.path,
                        content.len()
                    ));
                } else {
                    io::write_atomic(&native, content)?;
                    report
                        .actions
                        .push(format!("overwrote {} ({} bytes)", entry.path, content.len()));
                }
            }
            FileDirective::Append(payload) => {
                if options.dry_run {
                    report.actions.push(format!(
                        "[dry-run] would append {} bytes to {}",
                        payload.len(),
                        entry.path
                    ));
                } else {
                    io::append_text(&native, payload)?;
                    report
                        .actions
                        .push(format!("appended {} bytes to {}", payload.len(), entry.path));
                }
            }
            FileDirective::Regions(map) => {
                let text = io::read_text(&native)?;
                let syntax = self.syntax_for(&entry.path);
                let outcome =
                    rewrite(&text, &syntax, map).map_err(|e| Error::marker(&native, e))?;

                report.regions_replaced += outcome.regions_replaced;
                report.regions_removed += outcome.regions_removed;
                report.lines_replaced += outcome.lines_replaced;
                report.lines_removed += outcome.lines_removed;

                if outcome.text == text {
                    tracing::debug!("{} already up to date", entry.path);
                } else if options.dry_run {
                    report.actions.push(format!(
                        "[dry-run] would rewrite {} ({} spans)",
                        entry.path,
                        outcome.total()
                    ));
                } else {
                    io::write_atomic(&native, &outcome.text)?;
                    report
                        .actions
                        .push(format!("rewrote {} ({} spans)", entry.path, outcome.total()));
                }
            }
        }
        Ok(())
    }

    /// Validate the set against the tree without writing anything.
    ///
    /// Every target is visited even after problems are found; the report
    /// carries the full list.
    pub fn check(&self) -> CheckReport {
        let mut report = CheckReport::healthy();
        for entry in &self.set {
            self.check_entry(entry, &mut report);
        }
        report
    }

    fn check_entry(&self, entry: &TargetEntry, report: &mut CheckReport) {
        let native = self.resolve(&entry.path);
        if !native.exists() {
            report.push(CheckFinding::new(
                entry.path.as_str(),
                FindingKind::MissingTarget,
                "listed in the configuration but not in the tree",
            ));
            return;
        }

        let text = match io::read_text(&native) {
            Ok(text) => text,
            Err(e) => {
                report.push(CheckFinding::new(
                    entry.path.as_str(),
                    FindingKind::UnreadableTarget,
                    e.to_string(),
                ));
                return;
            }
        };

        // Overwrite and append content is never scanned for markers; the
        // read above is their whole check.
        let FileDirective::Regions(map) = &entry.directive else {
            return;
        };

        let syntax = self.syntax_for(&entry.path);
        let located = match scan(&text, &syntax) {
            Ok(located) => located,
            Err(e) => {
                report.push(CheckFinding::new(
                    entry.path.as_str(),
                    FindingKind::MalformedMarker,
                    e.to_string(),
                ));
                return;
            }
        };

        for region in &located.regions {
            if !map.contains_key(&region.key) {
                report.push(CheckFinding::new(
                    entry.path.as_str(),
                    FindingKind::OrphanRegion,
                    format!(
                        "region '{}' (lines {}-{}) has no configured value; apply deletes it",
                        region.key, region.start_line, region.end_line
                    ),
                ));
            }
        }
        for mark in &located.marks {
            // 'move' marks delete their line unconditionally; that is the
            // point of the key, not drift.
            if mark.key == MOVE_KEY || map.contains_key(&mark.key) {
                continue;
            }
            report.push(CheckFinding::new(
                entry.path.as_str(),
                FindingKind::OrphanMark,
                format!(
                    "marked line {} ('{}') has no configured value; apply deletes it",
                    mark.line, mark.key
                ),
            ));
        }

        let file_keys = located.keys();
        for key in map.keys() {
            if !file_keys.contains(key.as_str()) {
                report.push(CheckFinding::new(
                    entry.path.as_str(),
                    FindingKind::UnusedKey,
                    format!("key '{key}' matches no region or mark in the file"),
                ));
            }
        }
    }

    /// Render the changes apply would make, one diff per changed target.
    ///
    /// Unchanged targets are omitted. A missing or unreadable target ends
    /// the run with the first error.
    pub fn diff(&self) -> Result<Vec<FileDiff>> {
        let mut diffs = Vec::new();
        for entry in &self.set {
            let native = self.resolve(&entry.path);
            if !native.exists() {
                return Err(Error::target_not_found(native));
            }
            let old = io::read_text(&native)?;
            let new = match &entry.directive {
                FileDirective::Overwrite(content) => content.clone(),
                FileDirective::Append(payload) => {
                    let mut appended = old.clone();
                    appended.push_str(payload);
                    appended
                }
                FileDirective::Regions(map) => {
                    let syntax = self.syntax_for(&entry.path);
                    rewrite(&old, &syntax, map)
                        .map_err(|e| Error::marker(&native, e))?
                        .text
                }
            };
            let diff = FileDiff::between(entry.path.as_str(), &old, &new);
            if diff.changed {
                diffs.push(diff);
            }
        }
        Ok(diffs)
    }
}
