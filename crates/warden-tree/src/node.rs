//! # Tree Nodes
//!
//! [`AvlNode`] is an owned recursive structure: each node exclusively owns
//! its children through `Option<Box<_>>`, absence is the empty subtree.
//! Exclusive ownership is what makes the pruning contract exact — dropping
//! a node drops everything beneath it.

use warden_core::Timestamp;

/// A single tree element: value, cached height, and audit state.
#[derive(Debug, Clone)]
pub struct AvlNode {
    pub(crate) value: i64,
    pub(crate) left: Option<Box<AvlNode>>,
    pub(crate) right: Option<Box<AvlNode>>,
    pub(crate) height: i64,
    pub(crate) compliant: bool,
    pub(crate) last_audit: Timestamp,
}

impl AvlNode {
    /// A fresh leaf: height 1, compliant until audited otherwise.
    pub(crate) fn new(value: i64) -> Self {
        Self {
            value,
            left: None,
            right: None,
            height: 1,
            compliant: true,
            last_audit: Timestamp::now(),
        }
    }

    /// The stored value.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// The cached height (1 for a leaf).
    pub fn height(&self) -> i64 {
        self.height
    }

    /// Result of the most recent audit.
    pub fn is_compliant(&self) -> bool {
        self.compliant
    }

    /// When this node was last audited (or constructed).
    pub fn last_audit(&self) -> Timestamp {
        self.last_audit
    }

    /// Balance factor: left height minus right height.
    pub fn balance(&self) -> i64 {
        height_of(&self.left) - height_of(&self.right)
    }

    /// Recompute the cached height from the children's cached heights.
    pub(crate) fn recompute_height(&mut self) {
        self.height = 1 + height_of(&self.left).max(height_of(&self.right));
    }
}

/// Height of an optional subtree; an absent node has height 0.
pub(crate) fn height_of(node: &Option<Box<AvlNode>>) -> i64 {
    node.as_ref().map_or(0, |n| n.height)
}
