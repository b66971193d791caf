//! Check types for read-only validation
//!
//! Reports whether a replacement set and a target tree agree without writing
//! anything: every target present, markers well paired, and keys matched on
//! both sides.

use serde::{Deserialize, Serialize};

/// Overall status of a check run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// Every target exists, scans cleanly, and all keys match up
    Healthy,
    /// Applying would delete orphan regions or skip unused keys
    Drifted,
    /// Apply or diff would fail: missing, unreadable, or malformed targets
    Broken,
}

/// What a finding is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// Target listed in the configuration but absent from the tree.
    MissingTarget,
    /// Target exists but cannot be read as text.
    UnreadableTarget,
    /// Marker pairing in the target is broken.
    MalformedMarker,
    /// Region in the file with no configured key; apply deletes it.
    OrphanRegion,
    /// Marked line in the file with no configured key; apply deletes it.
    OrphanMark,
    /// Configured key with no region or mark in the file; apply ignores it.
    UnusedKey,
}

impl FindingKind {
    fn severity(self) -> CheckStatus {
        match self {
            Self::MissingTarget | Self::UnreadableTarget | Self::MalformedMarker => {
                CheckStatus::Broken
            }
            Self::OrphanRegion | Self::OrphanMark | Self::UnusedKey => CheckStatus::Drifted,
        }
    }
}

/// One issue found during a check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckFinding {
    /// Logical path of the target the finding belongs to.
    pub file: String,
    pub kind: FindingKind,
    /// Human-readable description of the issue.
    pub detail: String,
}

impl CheckFinding {
    pub fn new(file: impl Into<String>, kind: FindingKind, detail: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            kind,
            detail: detail.into(),
        }
    }
}

/// Report from a read-only validation pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    /// Worst severity across all findings.
    pub status: CheckStatus,
    pub findings: Vec<CheckFinding>,
}

impl CheckReport {
    /// Create a report with no issues.
    pub fn healthy() -> Self {
        Self {
            status: CheckStatus::Healthy,
            findings: Vec::new(),
        }
    }

    /// Add a finding, escalating the status to the worst severity seen.
    ///
    /// Broken > Drifted > Healthy.
    pub fn push(&mut self, finding: CheckFinding) {
        self.status = match (self.status, finding.kind.severity()) {
            (CheckStatus::Broken, _) | (_, CheckStatus::Broken) => CheckStatus::Broken,
            (CheckStatus::Drifted, _) | (_, CheckStatus::Drifted) => CheckStatus::Drifted,
            (CheckStatus::Healthy, CheckStatus::Healthy) => CheckStatus::Healthy,
        };
        self.findings.push(finding);
    }

    pub fn is_healthy(&self) -> bool {
        self.status == CheckStatus::Healthy
    }
}

impl Default for CheckReport {
    fn default() -> Self {
        Self::healthy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_is_healthy() {
        let report = CheckReport::healthy();
        assert_eq!(report.status, CheckStatus::Healthy);
        assert!(report.is_healthy());
        assert!(report.findings.is_empty());
    }

    #[test]
    fn drift_finding_escalates_status() {
        let mut report = CheckReport::healthy();
        report.push(CheckFinding::new(
            "a.go",
            FindingKind::UnusedKey,
            "key 'x' matches nothing",
        ));
        assert_eq!(report.status, CheckStatus::Drifted);
        assert!(!report.is_healthy());
    }

    #[test]
    fn broken_outranks_drifted() {
        let mut report = CheckReport::healthy();
        report.push(CheckFinding::new("a.go", FindingKind::OrphanRegion, "r"));
        report.push(CheckFinding::new("b.go", FindingKind::MissingTarget, "m"));
        report.push(CheckFinding::new("c.go", FindingKind::UnusedKey, "u"));
        assert_eq!(report.status, CheckStatus::Broken);
        assert_eq!(report.findings.len(), 3);
    }
}
