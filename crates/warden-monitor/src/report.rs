//! # Sweep Reports
//!
//! The result types produced by a monitor sweep: the binary
//! [`AuditStatus`] classification against the compliance threshold, the
//! finer-grained [`ComplianceLevel`] severity ladder, and the per-tree
//! [`AuditReport`] carrying the stats snapshot taken before any remediation.

use serde::{Deserialize, Serialize};

use warden_core::ServicePath;
use warden_tree::TreeStats;

/// Threshold classification of one tree in a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    /// Compliance rate met the threshold.
    Ok,
    /// Compliance rate fell below the threshold; remediation was triggered.
    Violation,
}

impl std::fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Ok => "OK",
            Self::Violation => "VIOLATION",
        };
        f.write_str(s)
    }
}

/// Severity ladder for a tree's compliance rate.
///
/// Ordering (best → worst): Ok, Warning, Danger, Critical, Panic.
/// Everything at or above the threshold is `Ok`; below it, severity grows
/// with the shortfall relative to the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceLevel {
    /// At or above the threshold.
    Ok,
    /// Below the threshold but within three quarters of it.
    Warning,
    /// Below three quarters of the threshold.
    Danger,
    /// Below half of the threshold.
    Critical,
    /// Below a quarter of the threshold.
    Panic,
}

impl ComplianceLevel {
    /// Grade a compliance rate against a threshold.
    pub fn grade(rate: f64, threshold: f64) -> Self {
        if rate >= threshold {
            Self::Ok
        } else if rate >= threshold * 0.75 {
            Self::Warning
        } else if rate >= threshold * 0.5 {
            Self::Danger
        } else if rate >= threshold * 0.25 {
            Self::Critical
        } else {
            Self::Panic
        }
    }
}

impl std::fmt::Display for ComplianceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Ok => "OK",
            Self::Warning => "WARNING",
            Self::Danger => "DANGER",
            Self::Critical => "CRITICAL",
            Self::Panic => "PANIC",
        };
        f.write_str(s)
    }
}

/// Per-tree result of one sweep.
///
/// `stats` is the snapshot taken *before* any automatic pruning, so a
/// violating report shows the state that caused the violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    /// Registry key of the audited tree.
    pub path: ServicePath,
    /// `compliant_nodes / max(1, total_nodes)` at sweep time.
    pub compliance_rate: f64,
    /// Threshold classification.
    pub status: AuditStatus,
    /// Severity grading of the rate.
    pub level: ComplianceLevel,
    /// Stats snapshot taken before remediation.
    pub stats: TreeStats,
}
