//! # Diagnostic Sinks
//!
//! Leveled diagnostics are a side channel: every tree and monitor operation
//! may emit info and warning messages, but the sink that receives them is a
//! collaborator injected at construction, never a process-wide ambient
//! logger. Core logic stays testable and silent by default.
//!
//! [`TracingSink`] is the production sink and forwards to `tracing` with the
//! service path as a structured field. [`MemorySink`] records diagnostics in
//! memory for test assertions.

use std::cell::RefCell;

use crate::identity::ServicePath;

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Normal operational message.
    Info,
    /// Audit failure, low compliance, or a degraded condition.
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
        };
        f.write_str(s)
    }
}

/// A captured diagnostic record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Message severity.
    pub severity: Severity,
    /// Service path of the emitting tree or monitor entry.
    pub path: ServicePath,
    /// Message text.
    pub message: String,
}

/// Receiver for leveled diagnostics emitted by trees and monitors.
///
/// Emission is fire-and-forget: implementations must not fail and must not
/// block the caller on I/O as part of the operation's contract.
pub trait DiagnosticSink {
    /// Record a normal operational message.
    fn info(&self, path: &ServicePath, message: &str);

    /// Record an audit failure or degraded-condition message.
    fn warning(&self, path: &ServicePath, message: &str);
}

/// Production sink: forwards to `tracing` with the path as a field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn info(&self, path: &ServicePath, message: &str) {
        tracing::info!(path = %path, "{message}");
    }

    fn warning(&self, path: &ServicePath, message: &str) {
        tracing::warn!(path = %path, "{message}");
    }
}

/// In-memory sink for tests. Single-threaded, like the rest of the core.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: RefCell<Vec<Diagnostic>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every captured diagnostic, in emission order.
    pub fn records(&self) -> Vec<Diagnostic> {
        self.records.borrow().clone()
    }

    /// Messages captured at warning severity, in emission order.
    pub fn warnings(&self) -> Vec<String> {
        self.records
            .borrow()
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| d.message.clone())
            .collect()
    }

    /// Discard everything captured so far.
    pub fn clear(&self) {
        self.records.borrow_mut().clear();
    }
}

impl DiagnosticSink for MemorySink {
    fn info(&self, path: &ServicePath, message: &str) {
        self.records.borrow_mut().push(Diagnostic {
            severity: Severity::Info,
            path: path.clone(),
            message: message.to_string(),
        });
    }

    fn warning(&self, path: &ServicePath, message: &str) {
        self.records.borrow_mut().push(Diagnostic {
            severity: Severity::Warning,
            path: path.clone(),
            message: message.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> ServicePath {
        ServicePath::new("svc.op.dept.div.region").unwrap()
    }

    #[test]
    fn memory_sink_captures_in_order() {
        let sink = MemorySink::new();
        sink.info(&path(), "first");
        sink.warning(&path(), "second");
        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].severity, Severity::Info);
        assert_eq!(records[0].message, "first");
        assert_eq!(records[1].severity, Severity::Warning);
    }

    #[test]
    fn warnings_filters_by_severity() {
        let sink = MemorySink::new();
        sink.info(&path(), "noise");
        sink.warning(&path(), "signal");
        assert_eq!(sink.warnings(), vec!["signal".to_string()]);
    }

    #[test]
    fn clear_discards_records() {
        let sink = MemorySink::new();
        sink.info(&path(), "gone");
        sink.clear();
        assert!(sink.records().is_empty());
    }
}
