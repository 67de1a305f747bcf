//! # Policy Taxonomy — Single Source of Truth
//!
//! Defines [`PolicyKind`], the enum naming every policy predicate a tree
//! enforces. This is the ONE definition used across the workspace. Every
//! `match` on `PolicyKind` must be exhaustive — adding a policy forces
//! every consumer to handle it at compile time.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::WardenError;

/// The named policy predicates enforced over a tree.
///
/// | # | Policy | Predicate |
/// |---|--------|-----------|
/// | 1 | HeightBalance | per-node balance factor within ±1 |
/// | 2 | ValueIntegrity | node value within the permitted domain, height ≥ 1 |
/// | 3 | RotationLimit | cumulative rotation count below the lifetime cap |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Per-node balance factor must stay within ±1.
    HeightBalance,
    /// Node value must stay within the permitted domain with a sane height.
    ValueIntegrity,
    /// Cumulative rotations must stay below the lifetime cap.
    RotationLimit,
}

/// Total number of policy kinds. Used for exhaustiveness assertions.
pub const POLICY_COUNT: usize = 3;

impl PolicyKind {
    /// All policy kinds in canonical order.
    pub fn all() -> &'static [PolicyKind] {
        &[Self::HeightBalance, Self::ValueIntegrity, Self::RotationLimit]
    }

    /// Canonical snake_case name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HeightBalance => "height_balance",
            Self::ValueIntegrity => "value_integrity",
            Self::RotationLimit => "rotation_limit",
        }
    }
}

impl std::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = WardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "height_balance" => Ok(Self::HeightBalance),
            "value_integrity" => Ok(Self::ValueIntegrity),
            "rotation_limit" => Ok(Self::RotationLimit),
            other => Err(WardenError::UnknownPolicy(other.to_string())),
        }
    }
}
