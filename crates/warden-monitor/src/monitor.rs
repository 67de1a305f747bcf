//! # The Active Monitor
//!
//! [`ActiveMonitor`] keeps an insertion-ordered registry of weak references
//! to policy-enforced trees and sweeps them with [`ActiveMonitor::run_audit`].
//! Trees are processed independently; there is no cross-tree invariant.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use warden_core::{DiagnosticSink, ServicePath, TracingSink};
use warden_tree::PolicyTree;

use crate::report::{AuditReport, AuditStatus, ComplianceLevel};

/// Default compliance-rate threshold a tree must meet during a sweep.
pub const DEFAULT_COMPLIANCE_THRESHOLD: f64 = 0.8;

struct RegistryEntry {
    path: ServicePath,
    tree: Weak<RefCell<PolicyTree>>,
}

/// Monitors registered trees and prunes the ones that fall out of compliance.
pub struct ActiveMonitor {
    entries: Vec<RegistryEntry>,
    threshold: f64,
    sink: Rc<dyn DiagnosticSink>,
}

impl std::fmt::Debug for ActiveMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveMonitor")
            .field("registered", &self.entries.len())
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

impl ActiveMonitor {
    /// Create a monitor with the default threshold, logging through `tracing`.
    pub fn new() -> Self {
        Self::with_sink(Rc::new(TracingSink))
    }

    /// Create a monitor with the default threshold and an injected sink.
    pub fn with_sink(sink: Rc<dyn DiagnosticSink>) -> Self {
        Self {
            entries: Vec::new(),
            threshold: DEFAULT_COMPLIANCE_THRESHOLD,
            sink,
        }
    }

    /// Replace the compliance threshold, clamped to `[0, 1]`.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// The compliance threshold in force.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Number of registry entries (live or not yet swept).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registry keys in sweep order.
    pub fn registered_paths(&self) -> Vec<ServicePath> {
        self.entries.iter().map(|e| e.path.clone()).collect()
    }

    /// Register a tree under its service path.
    ///
    /// Stores a weak reference only; the caller keeps ownership. Registering
    /// a path that is already present overwrites the entry in place, keeping
    /// its original sweep position.
    pub fn register(&mut self, tree: &Rc<RefCell<PolicyTree>>) {
        let path = tree.borrow().service_path().clone();
        let weak = Rc::downgrade(tree);
        if let Some(entry) = self.entries.iter_mut().find(|e| e.path == path) {
            entry.tree = weak;
        } else {
            self.entries.push(RegistryEntry {
                path: path.clone(),
                tree: weak,
            });
        }
        self.sink.info(&path, "registered tree for monitoring");
    }

    /// Remove a registry entry. Returns whether anything was removed.
    pub fn unregister(&mut self, path: &ServicePath) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.path != *path);
        self.entries.len() < before
    }

    /// Sweep every registered tree, in registration order.
    ///
    /// For each live tree: run its enforcement pass, take a stats snapshot,
    /// compute `compliance_rate = compliant_nodes / max(1, total_nodes)`,
    /// and classify against the threshold. A violating tree gets a warning
    /// diagnostic and an automatic [`PolicyTree::prune_non_compliant`]; the
    /// report still carries the pre-prune snapshot.
    ///
    /// Entries whose tree has been dropped elsewhere are discarded from the
    /// registry as the sweep encounters them.
    pub fn run_audit(&mut self) -> Vec<AuditReport> {
        let entries = std::mem::take(&mut self.entries);
        let mut reports = Vec::with_capacity(entries.len());

        for entry in entries {
            let Some(tree) = entry.tree.upgrade() else {
                self.sink
                    .info(&entry.path, "dropping registry entry for released tree");
                continue;
            };
            let mut tree = tree.borrow_mut();
            tree.enforce_policies();
            let stats = tree.stats();

            let compliance_rate = stats.compliant_nodes as f64 / stats.total_nodes.max(1) as f64;
            let status = if compliance_rate >= self.threshold {
                AuditStatus::Ok
            } else {
                AuditStatus::Violation
            };
            let level = ComplianceLevel::grade(compliance_rate, self.threshold);

            if status == AuditStatus::Violation {
                self.sink.warning(
                    &entry.path,
                    &format!("policy violation detected: compliance={compliance_rate:.2}"),
                );
                tree.prune_non_compliant();
            }
            drop(tree);

            reports.push(AuditReport {
                path: entry.path.clone(),
                compliance_rate,
                status,
                level,
                stats,
            });
            self.entries.push(entry);
        }

        reports
    }
}

impl Default for ActiveMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use warden_core::{MemorySink, ServicePath};
    use warden_tree::PolicyTree;

    use super::*;

    fn path(name: &str) -> ServicePath {
        ServicePath::new(name).unwrap()
    }

    fn shared_tree(name: &str, values: &[i64]) -> Rc<RefCell<PolicyTree>> {
        let tree = Rc::new(RefCell::new(PolicyTree::with_sink(
            path(name),
            Rc::new(MemorySink::new()),
        )));
        for &v in values {
            tree.borrow_mut().insert(v).unwrap();
        }
        tree
    }

    // ---- registration ----

    #[test]
    fn register_preserves_insertion_order() {
        let mut monitor = ActiveMonitor::with_sink(Rc::new(MemorySink::new()));
        let a = shared_tree("a.b.c.d.e", &[1]);
        let b = shared_tree("f.g.h.i.j", &[2]);
        monitor.register(&a);
        monitor.register(&b);
        assert_eq!(
            monitor.registered_paths(),
            vec![path("a.b.c.d.e"), path("f.g.h.i.j")]
        );
    }

    #[test]
    fn reregistering_overwrites_in_place() {
        let mut monitor = ActiveMonitor::with_sink(Rc::new(MemorySink::new()));
        let a = shared_tree("a.b.c.d.e", &[1]);
        let b = shared_tree("f.g.h.i.j", &[2]);
        monitor.register(&a);
        monitor.register(&b);
        let a2 = shared_tree("a.b.c.d.e", &[3]);
        monitor.register(&a2);
        assert_eq!(monitor.len(), 2);
        assert_eq!(monitor.registered_paths()[0], path("a.b.c.d.e"));
    }

    #[test]
    fn unregister_removes_entry() {
        let mut monitor = ActiveMonitor::with_sink(Rc::new(MemorySink::new()));
        let a = shared_tree("a.b.c.d.e", &[1]);
        monitor.register(&a);
        assert!(monitor.unregister(&path("a.b.c.d.e")));
        assert!(monitor.is_empty());
        assert!(!monitor.unregister(&path("a.b.c.d.e")));
    }

    // ---- sweeping ----

    #[test]
    fn compliant_tree_reports_ok_and_is_untouched() {
        let mut monitor = ActiveMonitor::with_sink(Rc::new(MemorySink::new()));
        let tree = shared_tree("svc.op.dept.div.region", &[10, 20, 30]);
        monitor.register(&tree);

        let reports = monitor.run_audit();
        assert_eq!(reports.len(), 1);
        let report = &reports[0];
        assert_eq!(report.status, AuditStatus::Ok);
        assert_eq!(report.level, ComplianceLevel::Ok);
        assert_eq!(report.compliance_rate, 1.0);
        assert_eq!(tree.borrow().len(), 3);
    }

    #[test]
    fn violating_tree_is_pruned_but_report_shows_preprune_stats() {
        let mut monitor = ActiveMonitor::with_sink(Rc::new(MemorySink::new()));
        // One bad node out of two: rate 0.5, below the 0.8 default.
        let tree = shared_tree("svc.op.dept.div.region", &[2_000_000, 5]);
        monitor.register(&tree);

        let reports = monitor.run_audit();
        let report = &reports[0];
        assert_eq!(report.status, AuditStatus::Violation);
        assert_eq!(report.compliance_rate, 0.5);
        assert_eq!(report.stats.total_nodes, 2);
        assert_eq!(report.stats.compliant_nodes, 1);

        // Remediation ran: the bad root went, and the whole subtree with it.
        assert!(tree.borrow().is_empty());
    }

    #[test]
    fn violation_emits_warning_diagnostic() {
        let sink = Rc::new(MemorySink::new());
        let mut monitor = ActiveMonitor::with_sink(sink.clone());
        let tree = shared_tree("svc.op.dept.div.region", &[2_000_000]);
        monitor.register(&tree);
        monitor.run_audit();
        assert!(sink
            .warnings()
            .iter()
            .any(|w| w.contains("policy violation detected")));
    }

    #[test]
    fn empty_tree_rate_uses_max_one_denominator() {
        let mut monitor = ActiveMonitor::with_sink(Rc::new(MemorySink::new()));
        let tree = shared_tree("svc.op.dept.div.region", &[]);
        monitor.register(&tree);
        let reports = monitor.run_audit();
        assert_eq!(reports[0].compliance_rate, 0.0);
        assert_eq!(reports[0].status, AuditStatus::Violation);
    }

    #[test]
    fn sweep_processes_trees_in_registration_order() {
        let mut monitor = ActiveMonitor::with_sink(Rc::new(MemorySink::new()));
        let a = shared_tree("a.b.c.d.e", &[1]);
        let b = shared_tree("f.g.h.i.j", &[2]);
        let c = shared_tree("k.l.m.n.o", &[3]);
        monitor.register(&b);
        monitor.register(&a);
        monitor.register(&c);
        let reports = monitor.run_audit();
        let order: Vec<_> = reports.iter().map(|r| r.path.clone()).collect();
        assert_eq!(
            order,
            vec![path("f.g.h.i.j"), path("a.b.c.d.e"), path("k.l.m.n.o")]
        );
    }

    #[test]
    fn dropped_tree_entry_is_discarded_on_sweep() {
        let mut monitor = ActiveMonitor::with_sink(Rc::new(MemorySink::new()));
        let kept = shared_tree("kept.op.dept.div.region", &[1]);
        {
            let dropped = shared_tree("gone.op.dept.div.region", &[1]);
            monitor.register(&dropped);
            monitor.register(&kept);
            assert_eq!(monitor.len(), 2);
        }
        let reports = monitor.run_audit();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].path, path("kept.op.dept.div.region"));
        assert_eq!(monitor.len(), 1);
    }

    #[test]
    fn custom_threshold_reclassifies() {
        let mut monitor =
            ActiveMonitor::with_sink(Rc::new(MemorySink::new())).with_threshold(0.4);
        let tree = shared_tree("svc.op.dept.div.region", &[2_000_000, 5]);
        monitor.register(&tree);
        let reports = monitor.run_audit();
        // 0.5 >= 0.4: no violation, no pruning.
        assert_eq!(reports[0].status, AuditStatus::Ok);
        assert_eq!(tree.borrow().len(), 2);
    }

    #[test]
    fn threshold_is_clamped_to_unit_interval() {
        let monitor = ActiveMonitor::with_sink(Rc::new(MemorySink::new())).with_threshold(7.5);
        assert_eq!(monitor.threshold(), 1.0);
    }

    #[test]
    fn sweep_reenforces_before_reading_stats() {
        let mut monitor = ActiveMonitor::with_sink(Rc::new(MemorySink::new()));
        let tree = shared_tree("svc.op.dept.div.region", &[1, 2, 3]);
        let observations_before = tree.borrow().matrix().total();
        monitor.register(&tree);
        monitor.run_audit();
        // The sweep's explicit enforcement pass added observations.
        assert!(tree.borrow().matrix().total() > observations_before);
    }

    #[test]
    fn report_serializes_to_json() {
        let mut monitor = ActiveMonitor::with_sink(Rc::new(MemorySink::new()));
        let tree = shared_tree("svc.op.dept.div.region", &[1, 2, 3]);
        monitor.register(&tree);
        let reports = monitor.run_audit();
        let json = serde_json::to_string(&reports).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("svc.op.dept.div.region"));
    }
}
