//! # warden-cli — Command Modules
//!
//! Argument structs and handlers for the `warden` binary. Each subcommand
//! lives in its own module; `main.rs` only assembles and dispatches.

pub mod demo;
pub mod stats;
pub mod sweep;
