//! Simulate command - Play episodes and report outcomes

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use serde::Serialize;

use crate::{
    baseline::RandomAgent,
    cli::output::{create_episode_progress, print_kv, print_section},
    layout::Layout,
    planner::{MdpAgent, MdpPlanner},
    ports::Agent,
    simulation::{EpisodeSummary, Game, Outcome, run_episode},
};

#[derive(Parser, Debug)]
#[command(about = "Run an agent for several episodes")]
pub struct SimulateArgs {
    /// Path to a maze layout file
    pub layout: PathBuf,

    /// Number of episodes
    #[arg(long, short = 'n', default_value_t = 10)]
    pub episodes: usize,

    /// Moves per episode before it counts as a timeout
    #[arg(long, default_value_t = 1000)]
    pub max_steps: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Agent to run (`mdp` or `random`)
    #[arg(long, short = 'a', default_value = "mdp")]
    pub agent: String,

    /// Planner configuration (JSON)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Aggregate over all episodes
#[derive(Debug, Clone, Serialize)]
pub struct SimulationSummary {
    pub agent: String,
    pub episodes: usize,
    pub wins: usize,
    pub losses: usize,
    pub timeouts: usize,
    pub win_rate: f64,
    pub mean_score: f64,
    pub mean_steps: f64,
}

impl SimulationSummary {
    pub fn from_episodes(agent: &str, episodes: &[EpisodeSummary]) -> Self {
        let count = |outcome| episodes.iter().filter(|e| e.outcome == outcome).count();
        let total = episodes.len();
        let denom = total.max(1) as f64;
        Self {
            agent: agent.to_string(),
            episodes: total,
            wins: count(Outcome::Win),
            losses: count(Outcome::Loss),
            timeouts: count(Outcome::Timeout),
            win_rate: count(Outcome::Win) as f64 / denom,
            mean_score: episodes.iter().map(|e| e.score as f64).sum::<f64>() / denom,
            mean_steps: episodes.iter().map(|e| e.steps as f64).sum::<f64>() / denom,
        }
    }
}

pub fn execute(args: SimulateArgs) -> Result<()> {
    let layout = Layout::load_from_file(&args.layout)
        .with_context(|| format!("Failed to load layout: {}", args.layout.display()))?;
    let config = super::load_config(args.config.as_deref())?;

    let mut agent: Box<dyn Agent> = match args.agent.to_lowercase().as_str() {
        "mdp" => {
            let planner = MdpPlanner::new(config).context("Invalid planner configuration")?;
            Box::new(MdpAgent::new("MDP", planner))
        }
        "random" => match args.seed {
            Some(seed) => Box::new(RandomAgent::with_seed("Random", seed)),
            None => Box::new(RandomAgent::new("Random")),
        },
        other => {
            return Err(anyhow!(
                "Unknown agent type: '{other}'. Supported: mdp, random"
            ));
        }
    };
    let slip = config.slip_model().context("Invalid planner configuration")?;

    let progress = (!args.no_progress && !args.json)
        .then(|| create_episode_progress(args.episodes as u64));

    let mut episodes = Vec::with_capacity(args.episodes);
    for episode in 0..args.episodes {
        let seed = args.seed.map(|s| s.wrapping_add(episode as u64));
        let mut game = Game::new(&layout, seed).with_slip_model(slip);
        let summary = run_episode(agent.as_mut(), &mut game, args.max_steps)
            .with_context(|| format!("Episode {} failed", episode + 1))?;
        episodes.push(summary);

        if let Some(pb) = &progress {
            let wins = episodes.iter().filter(|e| e.outcome == Outcome::Win).count();
            pb.set_message(format!("{wins} wins"));
            pb.inc(1);
        }
    }
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let summary = SimulationSummary::from_episodes(agent.name(), &episodes);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print_section(&format!("Simulation: {}", summary.agent));
    print_kv("Episodes", &summary.episodes.to_string());
    print_kv("Wins", &summary.wins.to_string());
    print_kv("Losses", &summary.losses.to_string());
    print_kv("Timeouts", &summary.timeouts.to_string());
    print_kv("Win rate", &format!("{:.1}%", summary.win_rate * 100.0));
    print_kv("Mean score", &format!("{:.1}", summary.mean_score));
    print_kv("Mean steps", &format!("{:.1}", summary.mean_steps));
    Ok(())
}
