//! # warden-monitor — Active Compliance Monitoring
//!
//! Holds a registry of policy-enforced trees and sweeps them on demand:
//! each sweep re-runs every tree's enforcement pass, computes its compliance
//! rate from fresh stats, classifies it against a threshold, and commands a
//! violating tree to prune its non-compliant nodes.
//!
//! ## Ownership
//!
//! The monitor never owns a tree. Registration stores a weak reference;
//! whoever created the tree controls its lifetime, and a registry entry
//! whose tree has been dropped is discarded during the next sweep.
//! `unregister` removes an entry eagerly.

pub mod monitor;
pub mod report;

pub use monitor::{ActiveMonitor, DEFAULT_COMPLIANCE_THRESHOLD};
pub use report::{AuditReport, AuditStatus, ComplianceLevel};
