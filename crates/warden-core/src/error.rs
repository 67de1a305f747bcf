//! # Error Types
//!
//! Structured errors for the Warden workspace, derived with `thiserror`.
//!
//! ## Design
//!
//! The fallible surface is deliberately small. Non-compliance of a tree node
//! is *data* (a cleared flag, a counter, a warning diagnostic), never an
//! error. The only operation that can fail at a call site is an insert
//! rejected by the rotation-limit policy, and that rejection happens before
//! any mutation.

use thiserror::Error;

use crate::policy::PolicyKind;

/// Top-level error type for the Warden workspace.
#[derive(Error, Debug)]
pub enum WardenError {
    /// A named policy rejected the operation before it was applied.
    #[error("policy violation [{policy}]: {detail}")]
    PolicyViolation {
        /// The policy that rejected the operation.
        policy: PolicyKind,
        /// Human-readable rejection context.
        detail: String,
    },

    /// A service path or path segment failed validation.
    #[error("invalid service path: {0:?}")]
    InvalidServicePath(String),

    /// A timestamp could not be constructed from the given epoch value.
    #[error("invalid epoch milliseconds: {0}")]
    InvalidTimestamp(i64),

    /// A policy name did not match any known [`PolicyKind`].
    #[error("unknown policy: {0:?}")]
    UnknownPolicy(String),
}

impl WardenError {
    /// Whether this error is a policy rejection (as opposed to a
    /// construction/validation failure).
    pub fn is_policy_violation(&self) -> bool {
        matches!(self, Self::PolicyViolation { .. })
    }
}
