//! # Instrumented Tree Adapter
//!
//! [`InstrumentedTree`] is the thin adapter that routes every public tree
//! operation through the [`Middleware`]. It shares the tree through
//! `Rc<RefCell<_>>` so the same instance can simultaneously be registered
//! with an active monitor.

use std::cell::RefCell;
use std::rc::Rc;

use warden_core::{DiagnosticSink, ServicePath, WardenError};
use warden_tree::{PolicyTree, TreeStats};

use crate::middleware::Middleware;

/// A policy tree with instrumented public operations.
#[derive(Debug)]
pub struct InstrumentedTree {
    tree: Rc<RefCell<PolicyTree>>,
    middleware: Middleware,
    path: ServicePath,
}

impl InstrumentedTree {
    /// Wrap a shared tree with instrumentation emitting to `sink`.
    pub fn new(tree: Rc<RefCell<PolicyTree>>, sink: Rc<dyn DiagnosticSink>) -> Self {
        let path = tree.borrow().service_path().clone();
        Self {
            tree,
            middleware: Middleware::new(sink),
            path,
        }
    }

    /// The shared tree, e.g. for registering with a monitor.
    pub fn tree(&self) -> Rc<RefCell<PolicyTree>> {
        Rc::clone(&self.tree)
    }

    /// The instrumented tree's service path.
    pub fn path(&self) -> &ServicePath {
        &self.path
    }

    /// Instrumented [`PolicyTree::insert`].
    ///
    /// # Errors
    ///
    /// Propagates the tree's rotation-limit rejection unchanged.
    pub fn insert(&self, value: i64) -> Result<(), WardenError> {
        self.middleware.try_run(&self.path, "insert", || {
            self.tree.borrow_mut().insert(value)
        })
    }

    /// Instrumented [`PolicyTree::delete`].
    pub fn delete(&self, value: i64) {
        self.middleware
            .run(&self.path, "delete", || self.tree.borrow_mut().delete(value));
    }

    /// Instrumented [`PolicyTree::prune_non_compliant`].
    pub fn prune_non_compliant(&self) {
        self.middleware.run(&self.path, "prune_non_compliant", || {
            self.tree.borrow_mut().prune_non_compliant();
        });
    }

    /// Instrumented [`PolicyTree::inorder_traversal`].
    pub fn inorder_traversal(&self) -> Vec<i64> {
        self.middleware.run(&self.path, "inorder_traversal", || {
            self.tree.borrow().inorder_traversal()
        })
    }

    /// Instrumented [`PolicyTree::stats`].
    pub fn stats(&self) -> TreeStats {
        self.middleware
            .run(&self.path, "stats", || self.tree.borrow().stats())
    }
}
