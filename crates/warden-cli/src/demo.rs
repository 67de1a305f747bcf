//! # Scripted Demo
//!
//! Walks the whole surface once: inserts through the instrumented adapter,
//! stats, a monitor sweep with automatic pruning, the sorted traversal, and
//! the classic three-ascending-inserts rotation.

use std::cell::RefCell;
use std::rc::Rc;

use clap::Args;

use warden_core::{ServiceOperation, TracingSink};
use warden_monitor::ActiveMonitor;
use warden_observe::InstrumentedTree;
use warden_tree::PolicyTree;

/// Arguments for the `demo` subcommand.
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Also register a tree holding an out-of-range value to show a
    /// violation sweep with automatic pruning.
    #[arg(long)]
    pub with_violation: bool,
}

/// Run the scripted demo scenario.
pub fn run(args: &DemoArgs) -> anyhow::Result<()> {
    let sink = Rc::new(TracingSink);

    let service = ServiceOperation::new("housing", "allocation", "social", "care", "cambridge")?;
    let tree = Rc::new(RefCell::new(PolicyTree::with_sink(
        service.path(),
        sink.clone(),
    )));
    let instrumented = InstrumentedTree::new(Rc::clone(&tree), sink.clone());

    let mut monitor = ActiveMonitor::new();
    monitor.register(&tree);

    println!("=== Inserting values with policy enforcement ===");
    for value in [10, 20, 30, 40, 25, 5, 15, 35] {
        instrumented.insert(value)?;
        println!("inserted {value}");
    }

    println!("\n=== Tree statistics ===");
    println!("{}", serde_json::to_string_pretty(&instrumented.stats())?);

    let violating = if args.with_violation {
        let service =
            ServiceOperation::new("ledger", "intake", "finance", "records", "cambridge")?;
        let tree = Rc::new(RefCell::new(PolicyTree::with_sink(service.path(), sink)));
        tree.borrow_mut().insert(2_000_000)?;
        tree.borrow_mut().insert(5)?;
        monitor.register(&tree);
        Some(tree)
    } else {
        None
    };

    println!("\n=== Running active audit ===");
    for report in monitor.run_audit() {
        println!(
            "{}: {} (compliance: {:.2}, level: {})",
            report.path, report.status, report.compliance_rate, report.level
        );
    }
    if let Some(tree) = violating {
        println!(
            "violating tree after auto-prune: {} nodes",
            tree.borrow().len()
        );
    }

    println!("\n=== Inorder traversal ===");
    println!("sorted values: {:?}", instrumented.inorder_traversal());

    println!("\n=== Rotation demonstration ===");
    let service = ServiceOperation::new("avl", "insert", "data", "structure", "core")?;
    let mut small = PolicyTree::new(service.path());
    for value in [1, 2, 3] {
        small.insert(value)?;
    }
    println!(
        "inserted 1, 2, 3: rotations={}, root={:?}, sorted={:?}",
        small.rotation_count(),
        small.root_value(),
        small.inorder_traversal()
    );

    Ok(())
}
