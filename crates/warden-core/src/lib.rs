//! # warden-core — Foundational Types for Warden
//!
//! This crate is the bedrock of the Warden workspace. It defines the shared
//! primitives used by the policy-enforced tree, the active monitor, and the
//! instrumentation layer. Every other crate in the workspace depends on
//! `warden-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identity.** `ServicePath` is a validated newtype,
//!    not a bare `String`. Registry keys cannot be confused with arbitrary
//!    text.
//!
//! 2. **Single `PolicyKind` enum.** One definition of the policy taxonomy.
//!    Every `match` on `PolicyKind` is exhaustive — adding a policy forces
//!    every consumer to handle it at compile time.
//!
//! 3. **UTC-only timestamps.** The `Timestamp` type wraps
//!    `chrono::DateTime<Utc>`; audit stamps are always UTC and render as
//!    RFC 3339.
//!
//! 4. **Injected diagnostics.** Core types never log through a process-wide
//!    ambient logger. They emit through a [`DiagnosticSink`] handed to them
//!    at construction; the production sink forwards to `tracing`, the test
//!    sink records in memory.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `warden-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod diagnostics;
pub mod error;
pub mod identity;
pub mod matrix;
pub mod policy;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use diagnostics::{Diagnostic, DiagnosticSink, MemorySink, Severity, TracingSink};
pub use error::WardenError;
pub use identity::{ServiceOperation, ServicePath};
pub use matrix::ComplianceMatrix;
pub use policy::{PolicyKind, POLICY_COUNT};
pub use temporal::Timestamp;
