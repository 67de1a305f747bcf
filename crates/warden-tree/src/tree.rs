//! # The Policy-Enforced Tree
//!
//! [`PolicyTree`] owns the root node, the rotation and violation counters,
//! the policy table, and the compliance matrix. Mutations rebalance with
//! standard AVL rotations; every mutation ends with a full enforcement pass
//! that audits each node, re-derives cached heights, and records one
//! observation per node into the matrix.
//!
//! ## Mutation / Enforcement Cycle
//!
//! ```text
//! insert/delete ──rebalance──▶ enforce_policies ──▶ matrix + flags + counters
//!        ▲                                                   │
//!        │                 monitor sweep ──▶ prune_non_compliant (on violation)
//!        └────────────── caller ◀────────────────────────────┘
//! ```
//!
//! Pruning does not rebalance and never rotates; the balance invariant is
//! restored incrementally by subsequent inserts and deletes.

use std::rc::Rc;

use warden_core::{
    ComplianceMatrix, DiagnosticSink, PolicyKind, ServicePath, Timestamp, TracingSink, WardenError,
};

use crate::node::{height_of, AvlNode};
use crate::policy::TreePolicies;
use crate::stats::TreeStats;

/// A self-balancing search tree with integrated policy enforcement.
pub struct PolicyTree {
    root: Option<Box<AvlNode>>,
    service_path: ServicePath,
    policies: TreePolicies,
    matrix: ComplianceMatrix,
    rotation_count: u64,
    violation_count: u64,
    sink: Rc<dyn DiagnosticSink>,
}

impl std::fmt::Debug for PolicyTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyTree")
            .field("service_path", &self.service_path)
            .field("total_nodes", &count_nodes(&self.root))
            .field("rotation_count", &self.rotation_count)
            .field("violation_count", &self.violation_count)
            .finish_non_exhaustive()
    }
}

impl PolicyTree {
    /// Create an empty tree with default policies, logging through `tracing`.
    pub fn new(service_path: ServicePath) -> Self {
        Self::with_sink(service_path, Rc::new(TracingSink))
    }

    /// Create an empty tree with default policies and an injected sink.
    pub fn with_sink(service_path: ServicePath, sink: Rc<dyn DiagnosticSink>) -> Self {
        Self::with_policies(service_path, TreePolicies::default(), sink)
    }

    /// Create an empty tree with an explicit policy table and sink.
    pub fn with_policies(
        service_path: ServicePath,
        policies: TreePolicies,
        sink: Rc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            root: None,
            service_path,
            policies,
            matrix: ComplianceMatrix::new(),
            rotation_count: 0,
            violation_count: 0,
            sink,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────

    /// The registry key identifying this tree.
    pub fn service_path(&self) -> &ServicePath {
        &self.service_path
    }

    /// The policy table in force.
    pub fn policies(&self) -> &TreePolicies {
        &self.policies
    }

    /// The compliance matrix accumulated by enforcement passes.
    pub fn matrix(&self) -> &ComplianceMatrix {
        &self.matrix
    }

    /// Rotations performed over this tree's lifetime. Never decreases.
    pub fn rotation_count(&self) -> u64 {
        self.rotation_count
    }

    /// Audit failures observed over this tree's lifetime. Never decreases.
    pub fn violation_count(&self) -> u64 {
        self.violation_count
    }

    /// Number of nodes currently in the tree.
    pub fn len(&self) -> usize {
        count_nodes(&self.root) as usize
    }

    /// Whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Value at the root, if any.
    pub fn root_value(&self) -> Option<i64> {
        self.root.as_ref().map(|n| n.value)
    }

    /// Whether `value` is present.
    pub fn contains(&self, value: i64) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            if value == node.value {
                return true;
            }
            current = if value < node.value {
                node.left.as_deref()
            } else {
                node.right.as_deref()
            };
        }
        false
    }

    // ─── Mutations ───────────────────────────────────────────────────

    /// Insert a value, rebalance, and run an enforcement pass.
    ///
    /// Duplicates descend to the right subtree.
    ///
    /// # Errors
    ///
    /// Returns [`WardenError::PolicyViolation`] if the rotation-limit policy
    /// has been exhausted. The check runs before any mutation: a rejected
    /// insert leaves the tree untouched.
    pub fn insert(&mut self, value: i64) -> Result<(), WardenError> {
        if !self.policies.rotation_limit(self.rotation_count) {
            return Err(WardenError::PolicyViolation {
                policy: PolicyKind::RotationLimit,
                detail: format!(
                    "rotation count {} has reached the cap of {}",
                    self.rotation_count, self.policies.rotation_cap
                ),
            });
        }
        let root = self.root.take();
        self.root = Some(self.insert_at(root, value));
        self.enforce_policies();
        Ok(())
    }

    /// Delete one occurrence of a value, rebalance, and run an enforcement
    /// pass. Deleting an absent value is a no-op (the pass still runs).
    pub fn delete(&mut self, value: i64) {
        let root = self.root.take();
        self.root = self.delete_at(root, value);
        self.enforce_policies();
    }

    fn insert_at(&mut self, node: Option<Box<AvlNode>>, value: i64) -> Box<AvlNode> {
        let mut node = match node {
            None => return Box::new(AvlNode::new(value)),
            Some(node) => node,
        };

        if value < node.value {
            let left = node.left.take();
            node.left = Some(self.insert_at(left, value));
        } else {
            let right = node.right.take();
            node.right = Some(self.insert_at(right, value));
        }

        node.recompute_height();
        let balance = node.balance();

        if balance > 1 {
            // Left-heavy; the left child exists whenever it is the taller side.
            if node.left.as_ref().is_some_and(|l| value < l.value) {
                return self.rotate_right(node);
            }
            node.left = node.left.take().map(|l| self.rotate_left(l));
            return self.rotate_right(node);
        }
        if balance < -1 {
            if node.right.as_ref().is_some_and(|r| value > r.value) {
                return self.rotate_left(node);
            }
            node.right = node.right.take().map(|r| self.rotate_right(r));
            return self.rotate_left(node);
        }

        node
    }

    fn delete_at(&mut self, node: Option<Box<AvlNode>>, value: i64) -> Option<Box<AvlNode>> {
        let mut node = node?;

        if value < node.value {
            let left = node.left.take();
            node.left = self.delete_at(left, value);
        } else if value > node.value {
            let right = node.right.take();
            node.right = self.delete_at(right, value);
        } else {
            match (node.left.take(), node.right.take()) {
                // At most one child: splice it into the parent slot.
                (None, right) => return right,
                (left, None) => return left,
                // Two children: adopt the in-order successor's value, then
                // delete that successor from the right subtree.
                (left, Some(right)) => {
                    node.left = left;
                    node.value = min_value(&right);
                    node.right = self.delete_at(Some(right), node.value);
                }
            }
        }

        node.recompute_height();
        let balance = node.balance();

        // Post-deletion rebalancing is keyed on the heavier child's balance;
        // there is no single inserted value to compare against.
        if balance > 1 {
            let left_balance = node.left.as_ref().map_or(0, |l| l.balance());
            if left_balance >= 0 {
                return Some(self.rotate_right(node));
            }
            node.left = node.left.take().map(|l| self.rotate_left(l));
            return Some(self.rotate_right(node));
        }
        if balance < -1 {
            let right_balance = node.right.as_ref().map_or(0, |r| r.balance());
            if right_balance <= 0 {
                return Some(self.rotate_left(node));
            }
            node.right = node.right.take().map(|r| self.rotate_right(r));
            return Some(self.rotate_left(node));
        }

        Some(node)
    }

    // ─── Rotation Primitives ─────────────────────────────────────────
    //
    // Each primitive reassigns ownership between a node and one child,
    // recomputes both heights, and increments the rotation counter by
    // exactly 1. Rotations never fail and never alter value ordering.
    //
    // A primitive asked to rotate around an absent child returns the node
    // unchanged without counting. That happens only in the double-rotation
    // case when the inserted value equals the child's value (duplicates
    // descend right, so the inner subtree the rule targets can be empty).

    fn rotate_left(&mut self, mut z: Box<AvlNode>) -> Box<AvlNode> {
        let Some(mut y) = z.right.take() else {
            return z;
        };
        self.rotation_count += 1;
        z.right = y.left.take();
        z.recompute_height();
        y.left = Some(z);
        y.recompute_height();
        y
    }

    fn rotate_right(&mut self, mut z: Box<AvlNode>) -> Box<AvlNode> {
        let Some(mut y) = z.left.take() else {
            return z;
        };
        self.rotation_count += 1;
        z.left = y.right.take();
        z.recompute_height();
        y.right = Some(z);
        y.recompute_height();
        y
    }

    // ─── Audit & Enforcement ─────────────────────────────────────────

    /// Run a full enforcement pass over the tree.
    ///
    /// Post-order: children are enforced first, then the node's cached
    /// height is re-derived, the node is audited, and its balance policy is
    /// evaluated. A node's overall result is the AND of its subtrees, its
    /// audit, and its balance; every node visited records one observation
    /// into the matrix against the expectation that nodes always comply.
    ///
    /// The pass never changes tree shape and never rotates.
    pub fn enforce_policies(&mut self) {
        let mut root = self.root.take();
        self.enforce_node(&mut root);
        self.root = root;
    }

    fn enforce_node(&mut self, node: &mut Option<Box<AvlNode>>) -> bool {
        let Some(node) = node.as_deref_mut() else {
            return true;
        };
        let left_ok = self.enforce_node(&mut node.left);
        let right_ok = self.enforce_node(&mut node.right);
        node.recompute_height();
        let node_ok = self.audit_node(node);
        let balance_ok = self.policies.height_balance(node.balance());

        let overall = left_ok && right_ok && node_ok && balance_ok;
        self.matrix.record(true, overall);
        overall
    }

    /// Audit one node: stamp the audit time, derive and store the
    /// `compliant` flag, and on failure bump the violation counter and emit
    /// a warning diagnostic.
    fn audit_node(&mut self, node: &mut AvlNode) -> bool {
        node.last_audit = Timestamp::now();
        let compliant = self.policies.value_integrity(node.value, node.height);
        node.compliant = compliant;
        if !compliant {
            self.violation_count += 1;
            self.sink.warning(
                &self.service_path,
                &format!(
                    "node audit failed: value={}, height={}",
                    node.value, node.height
                ),
            );
        }
        compliant
    }

    // ─── Pruning ─────────────────────────────────────────────────────

    /// Remove every node whose `compliant` flag is false, then re-run the
    /// enforcement pass on the reduced tree.
    ///
    /// The traversal is post-order and rebuilds bottom-up: a node's children
    /// are replaced by their pruned result first, and if the node itself is
    /// non-compliant it is discarded *together with* whatever survived below
    /// it. Compliant descendants of a non-compliant ancestor are removed,
    /// not reattached. That subtree discard is the contract of this
    /// operation, not an accident.
    ///
    /// Pruning does not rebalance. The following enforcement pass re-derives
    /// heights and flags but never rotates; only subsequent inserts and
    /// deletes restore the balance invariant incrementally.
    pub fn prune_non_compliant(&mut self) {
        let root = self.root.take();
        self.root = self.prune_node(root);
        self.enforce_policies();
    }

    fn prune_node(&mut self, node: Option<Box<AvlNode>>) -> Option<Box<AvlNode>> {
        let mut node = node?;
        node.left = self.prune_node(node.left.take());
        node.right = self.prune_node(node.right.take());
        if !node.compliant {
            self.sink.info(
                &self.service_path,
                &format!("pruning non-compliant node: value={}", node.value),
            );
            return None;
        }
        Some(node)
    }

    // ─── Queries ─────────────────────────────────────────────────────

    /// All values in ascending order. Pure read, O(n).
    pub fn inorder_traversal(&self) -> Vec<i64> {
        let mut values = Vec::new();
        collect_inorder(&self.root, &mut values);
        values
    }

    /// Aggregate statistics snapshot.
    ///
    /// `is_balanced` comes from a fresh balance-only traversal, independent
    /// of the per-node `compliant` flags.
    pub fn stats(&self) -> TreeStats {
        let mut total = 0;
        let mut balanced = 0;
        let mut compliant = 0;
        collect_counts(&self.root, &mut total, &mut balanced, &mut compliant);
        TreeStats {
            service_path: self.service_path.clone(),
            total_nodes: total,
            balanced_nodes: balanced,
            compliant_nodes: compliant,
            rotation_count: self.rotation_count,
            violation_count: self.violation_count,
            accuracy: self.matrix.accuracy(),
            tree_height: height_of(&self.root),
            is_balanced: subtree_balanced(&self.root),
        }
    }
}

fn min_value(node: &AvlNode) -> i64 {
    let mut current = node;
    while let Some(left) = current.left.as_deref() {
        current = left;
    }
    current.value
}

fn count_nodes(node: &Option<Box<AvlNode>>) -> u64 {
    node.as_ref()
        .map_or(0, |n| 1 + count_nodes(&n.left) + count_nodes(&n.right))
}

fn collect_inorder(node: &Option<Box<AvlNode>>, out: &mut Vec<i64>) {
    if let Some(node) = node {
        collect_inorder(&node.left, out);
        out.push(node.value);
        collect_inorder(&node.right, out);
    }
}

fn collect_counts(node: &Option<Box<AvlNode>>, total: &mut u64, balanced: &mut u64, compliant: &mut u64) {
    if let Some(node) = node {
        *total += 1;
        if node.balance().abs() <= 1 {
            *balanced += 1;
        }
        if node.compliant {
            *compliant += 1;
        }
        collect_counts(&node.left, total, balanced, compliant);
        collect_counts(&node.right, total, balanced, compliant);
    }
}

fn subtree_balanced(node: &Option<Box<AvlNode>>) -> bool {
    match node {
        None => true,
        Some(node) => {
            node.balance().abs() <= 1
                && subtree_balanced(&node.left)
                && subtree_balanced(&node.right)
        }
    }
}
