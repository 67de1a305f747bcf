//! # Compliance Matrix
//!
//! A four-bucket confusion matrix recording the outcome of policy
//! enforcement observations. Each tree owns exactly one matrix; the
//! enforcement pass records one observation per node visited with the
//! a-priori expectation that every node should comply.
//!
//! ## Lifecycle Invariant
//!
//! The matrix is mutated only by enforcement passes and is never reset
//! automatically — accuracy is cumulative over the tree's lifetime.

use serde::{Deserialize, Serialize};

/// Confusion-matrix counters for compliance observations.
///
/// `accuracy()` is the share of observations where expectation and outcome
/// agreed, and is defined as `0.0` when nothing has been recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceMatrix {
    /// Expected compliant, observed compliant.
    true_positives: u64,
    /// Expected non-compliant, observed non-compliant.
    true_negatives: u64,
    /// Expected non-compliant, observed compliant.
    false_positives: u64,
    /// Expected compliant, observed non-compliant.
    false_negatives: u64,
}

impl ComplianceMatrix {
    /// Create an empty matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observation into exactly one bucket.
    pub fn record(&mut self, expected: bool, actual: bool) {
        match (expected, actual) {
            (true, true) => self.true_positives += 1,
            (false, false) => self.true_negatives += 1,
            (false, true) => self.false_positives += 1,
            (true, false) => self.false_negatives += 1,
        }
    }

    /// Total observations recorded.
    pub fn total(&self) -> u64 {
        self.true_positives + self.true_negatives + self.false_positives + self.false_negatives
    }

    /// Share of observations where expectation and outcome agreed.
    ///
    /// `(TP + TN) / total`, or `0.0` when no observations exist.
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.true_positives + self.true_negatives) as f64 / total as f64
    }

    /// Expected-compliant, observed-compliant count.
    pub fn true_positives(&self) -> u64 {
        self.true_positives
    }

    /// Expected-non-compliant, observed-non-compliant count.
    pub fn true_negatives(&self) -> u64 {
        self.true_negatives
    }

    /// Expected-non-compliant, observed-compliant count.
    pub fn false_positives(&self) -> u64 {
        self.false_positives
    }

    /// Expected-compliant, observed-non-compliant count.
    pub fn false_negatives(&self) -> u64 {
        self.false_negatives
    }
}
