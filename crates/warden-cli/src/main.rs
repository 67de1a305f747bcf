//! # warden CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Warden — policy-enforced balanced trees with active monitoring.
///
/// Maintains balanced ordered sets under a compliance policy, audits them,
/// and prunes what falls out of line.
#[derive(Parser, Debug)]
#[command(name = "warden", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the scripted demo scenario.
    Demo(warden_cli::demo::DemoArgs),
    /// Build a tree and print its statistics as JSON.
    Stats(warden_cli::stats::StatsArgs),
    /// Build several trees and run one monitor sweep.
    Sweep(warden_cli::sweep::SweepArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Demo(args) => warden_cli::demo::run(&args),
        Commands::Stats(args) => warden_cli::stats::run(&args),
        Commands::Sweep(args) => warden_cli::sweep::run(&args),
    }
}
