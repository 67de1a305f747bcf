//! # Stats Inspection
//!
//! Builds a tree from the given values and prints its statistics snapshot
//! as JSON.

use clap::Args;

use warden_core::ServicePath;
use warden_tree::PolicyTree;

/// Arguments for the `stats` subcommand.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Service path identifying the tree (dotted, no whitespace).
    #[arg(long)]
    pub path: String,

    /// Values to insert, comma separated.
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub values: Vec<i64>,
}

/// Build the tree and print its stats.
pub fn run(args: &StatsArgs) -> anyhow::Result<()> {
    let path = ServicePath::new(args.path.as_str())?;
    let mut tree = PolicyTree::new(path);
    for &value in &args.values {
        tree.insert(value)?;
    }
    println!("{}", serde_json::to_string_pretty(&tree.stats())?);
    Ok(())
}
