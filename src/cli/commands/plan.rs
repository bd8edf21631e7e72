//! Plan command - Solve one layout and show the chosen move

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::output::{print_kv, print_section, print_subsection},
    export::PlanCsvExporter,
    grid::{Cell, CellMap, Direction, Grid},
    layout::Layout,
    planner::MdpPlanner,
    simulation::Game,
    snapshot::Snapshot,
};

#[derive(Parser, Debug)]
#[command(about = "Plan a single move for a layout")]
pub struct PlanArgs {
    /// Path to a maze layout file
    pub layout: PathBuf,

    /// Planner configuration (JSON)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Export per-cell rewards, values and policy to CSV
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Print the value grid and greedy policy
    #[arg(long)]
    pub show_values: bool,
}

pub fn execute(args: PlanArgs) -> Result<()> {
    let layout = Layout::load_from_file(&args.layout)
        .with_context(|| format!("Failed to load layout: {}", args.layout.display()))?;
    let config = super::load_config(args.config.as_deref())?;
    let planner = MdpPlanner::new(config).context("Invalid planner configuration")?;

    let snapshot = Snapshot::capture(&Game::new(&layout, Some(0)));
    let plan = planner.plan(&snapshot);
    let decision = planner.decide_with_plan(&plan, &snapshot)?;

    print_section("Decision");
    print_kv("Layout", &args.layout.display().to_string());
    print_kv("Grid", &format!("{}x{}", plan.grid.width(), plan.grid.height()));
    print_kv("Agent", &snapshot.agent.to_string());
    print_kv("Action", &decision.action.to_string());
    print_kv("Expected value", &format!("{:.4}", decision.expected_value));
    print_kv("Iterations", &decision.report.iterations.to_string());
    print_kv("Final delta", &format!("{:.6}", decision.report.final_delta));
    print_kv("Converged", &decision.report.converged.to_string());

    print_subsection("Candidates");
    for candidate in &decision.candidates {
        print_kv(
            &candidate.direction.to_string(),
            &format!("{:.4}", candidate.expected_value),
        );
    }

    if args.show_values {
        print_subsection("Values");
        print_value_grid(&plan.grid, &plan.values);
        print_subsection("Policy");
        print_policy_grid(&plan.grid, &plan.greedy_policy(), snapshot.agent);
    }

    if let Some(path) = &args.export {
        let rows = PlanCsvExporter::export_to_file(&plan, path)
            .with_context(|| format!("Failed to export plan to {}", path.display()))?;
        println!("\nWrote {rows} rows to {}", path.display());
    }

    Ok(())
}

/// Print values top row first, walls as `#`.
fn print_value_grid(grid: &Grid, values: &CellMap<f64>) {
    for y in (0..grid.height() as i32).rev() {
        let row: Vec<String> = (0..grid.width() as i32)
            .map(|x| {
                let cell = Cell::new(x, y);
                if grid.is_wall(cell) {
                    format!("{:>9}", "#")
                } else {
                    format!("{:>9.2}", values.value(cell))
                }
            })
            .collect();
        println!("{}", row.join(""));
    }
}

fn print_policy_grid(grid: &Grid, policy: &CellMap<Option<Direction>>, agent: Cell) {
    for y in (0..grid.height() as i32).rev() {
        let row: String = (0..grid.width() as i32)
            .map(|x| {
                let cell = Cell::new(x, y);
                if grid.is_wall(cell) {
                    '%'
                } else if cell == agent {
                    'P'
                } else {
                    policy.get(cell).copied().flatten().map_or(' ', Direction::arrow)
                }
            })
            .collect();
        println!("  {row}");
    }
}
