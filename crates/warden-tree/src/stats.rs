//! # Tree Statistics
//!
//! [`TreeStats`] is the aggregate snapshot the monitor reads during a sweep
//! and the CLI renders as JSON. It is a pure read of the tree's current
//! state; `is_balanced` comes from a fresh balance-only traversal and is
//! independent of the per-node `compliant` flags, which can be stale
//! between enforcement passes.

use serde::{Deserialize, Serialize};

use warden_core::ServicePath;

/// Aggregated statistics for one tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Registry key of the tree.
    pub service_path: ServicePath,
    /// Number of nodes currently in the tree.
    pub total_nodes: u64,
    /// Nodes whose balance factor is currently within ±1.
    pub balanced_nodes: u64,
    /// Nodes whose `compliant` flag is currently set.
    pub compliant_nodes: u64,
    /// Rotations performed over the tree's lifetime (never resets).
    pub rotation_count: u64,
    /// Audit failures observed over the tree's lifetime (never resets).
    pub violation_count: u64,
    /// Cumulative accuracy of the compliance matrix.
    pub accuracy: f64,
    /// Height of the root (0 for an empty tree).
    pub tree_height: i64,
    /// Whether every reachable node is balance-compliant right now.
    pub is_balanced: bool,
}
