//! # Tree Policy Table
//!
//! [`TreePolicies`] is the small named table of predicates a tree enforces,
//! one method per [`PolicyKind`](warden_core::PolicyKind):
//!
//! - `height_balance` — per-node balance factor within ±1.
//! - `value_integrity` — value inside the permitted domain, height >= 1.
//! - `rotation_limit` — cumulative rotation count below the lifetime cap.
//!
//! The defaults are the production bounds; tests construct tighter tables
//! to hit the guards quickly.

use serde::{Deserialize, Serialize};

/// The policy predicate table owned by every tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreePolicies {
    /// Smallest value the integrity policy accepts.
    pub value_min: i64,
    /// Largest value the integrity policy accepts.
    pub value_max: i64,
    /// Lifetime rotation cap; inserts are refused once the counter reaches it.
    pub rotation_cap: u64,
}

impl TreePolicies {
    /// Default lower bound of the value domain.
    pub const VALUE_MIN: i64 = -1_000_000;
    /// Default upper bound of the value domain.
    pub const VALUE_MAX: i64 = 1_000_000;
    /// Default lifetime rotation cap.
    pub const ROTATION_CAP: u64 = 1_000;

    /// Per-node balance factor must stay within ±1.
    pub fn height_balance(&self, balance: i64) -> bool {
        balance.abs() <= 1
    }

    /// Value must sit inside the permitted domain with a sane height.
    pub fn value_integrity(&self, value: i64, height: i64) -> bool {
        (self.value_min..=self.value_max).contains(&value) && height >= 1
    }

    /// Cumulative rotations must stay below the lifetime cap.
    ///
    /// The counter is never reset, so a tree that reaches the cap refuses
    /// inserts for the rest of its life.
    pub fn rotation_limit(&self, rotation_count: u64) -> bool {
        rotation_count < self.rotation_cap
    }
}

impl Default for TreePolicies {
    fn default() -> Self {
        Self {
            value_min: Self::VALUE_MIN,
            value_max: Self::VALUE_MAX,
            rotation_cap: Self::ROTATION_CAP,
        }
    }
}
