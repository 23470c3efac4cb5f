//! xtask - Development task runner for redblack
//!
//! Usage:
//!   cargo xtask stress [--scenario <yaml>] [options]

mod stress;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development task runner for redblack")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a tree from a generated workload and check its invariants
    Stress(stress::StressArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Stress(args) => stress::run(args),
    }
}
