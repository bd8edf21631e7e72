//! gridplan CLI - value-iteration planning for maze agents
//!
//! This CLI provides:
//! - Planning a single move for a layout, with value and policy dumps
//! - Simulating episodes with the planner or a random baseline

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridplan")]
#[command(version, about = "Grid-world MDP planner", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan the next move for a layout
    Plan(gridplan::cli::commands::plan::PlanArgs),

    /// Run episodes and report outcomes
    Simulate(gridplan::cli::commands::simulate::SimulateArgs),
}

fn init_logging(verbose: bool) {
    let default = if verbose { "gridplan=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Plan(args) => gridplan::cli::commands::plan::execute(args),
        Commands::Simulate(args) => gridplan::cli::commands::simulate::execute(args),
    }
}
