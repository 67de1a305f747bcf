//! # Multi-Tree Sweep
//!
//! Builds one tree per `--tree path=v1,v2,...` argument, registers them all
//! with an active monitor, runs a single audit sweep, and prints the reports
//! as JSON.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Context;
use clap::Args;

use warden_core::ServicePath;
use warden_monitor::ActiveMonitor;
use warden_tree::PolicyTree;

/// Arguments for the `sweep` subcommand.
#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Compliance-rate threshold for classifying each tree.
    #[arg(long, default_value_t = warden_monitor::DEFAULT_COMPLIANCE_THRESHOLD)]
    pub threshold: f64,

    /// Tree specification `path=v1,v2,...`; repeatable.
    #[arg(long = "tree", required = true)]
    pub trees: Vec<String>,
}

/// Parse a `path=v1,v2,...` tree specification.
pub fn parse_tree_spec(spec: &str) -> anyhow::Result<(ServicePath, Vec<i64>)> {
    let (path, values) = spec
        .split_once('=')
        .with_context(|| format!("tree spec {spec:?} is missing '='"))?;
    let path = ServicePath::new(path)?;
    let values = values
        .split(',')
        .filter(|v| !v.is_empty())
        .map(|v| {
            v.trim()
                .parse::<i64>()
                .with_context(|| format!("invalid value {v:?} in tree spec"))
        })
        .collect::<anyhow::Result<Vec<i64>>>()?;
    Ok((path, values))
}

/// Build the trees, run one sweep, print the reports.
pub fn run(args: &SweepArgs) -> anyhow::Result<()> {
    let mut monitor = ActiveMonitor::new().with_threshold(args.threshold);

    // Keep owning references alive for the duration of the sweep; the
    // monitor itself only holds weak ones.
    let mut owned = Vec::with_capacity(args.trees.len());
    for spec in &args.trees {
        let (path, values) = parse_tree_spec(spec)?;
        let tree = Rc::new(RefCell::new(PolicyTree::new(path)));
        for value in values {
            tree.borrow_mut().insert(value)?;
        }
        monitor.register(&tree);
        owned.push(tree);
    }
    tracing::info!(trees = owned.len(), threshold = args.threshold, "starting sweep");

    let reports = monitor.run_audit();
    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}
