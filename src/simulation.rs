//! A small maze game that implements [`Environment`], used to run agents
//! end-to-end.
//!
//! Agent moves go through the same slip model the planner assumes. Hazards
//! wander at random and are neutralized for [`SCARED_TIME`] turns after the
//! agent eats a capsule.

use rand::{Rng, SeedableRng, random, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    Error, Result,
    grid::{Cell, Direction, Grid},
    layout::Layout,
    ports::{Agent, Environment},
    snapshot::{Hazard, Snapshot},
    transition::SlipModel,
};

/// Turns a hazard stays harmless after a capsule is eaten.
pub const SCARED_TIME: u32 = 40;

/// Score adjustments.
pub mod score {
    pub const FOOD: i64 = 10;
    pub const TIME_PENALTY: i64 = 1;
    pub const WIN: i64 = 500;
    pub const LOSS: i64 = 500;
    pub const HAZARD_EATEN: i64 = 200;
}

/// How an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Win,
    Loss,
    Timeout,
}

#[derive(Debug, Clone)]
struct HazardAgent {
    start: Cell,
    position: Cell,
    timer: u32,
    heading: Option<Direction>,
}

impl HazardAgent {
    fn new(start: Cell) -> Self {
        Self {
            start,
            position: start,
            timer: 0,
            heading: None,
        }
    }

    fn respawn(&mut self) {
        self.position = self.start;
        self.timer = 0;
        self.heading = None;
    }
}

/// Live game state.
#[derive(Debug, Clone)]
pub struct Game {
    grid: Grid,
    walls: Vec<Cell>,
    corners: Vec<Cell>,
    food: Vec<Cell>,
    capsules: Vec<Cell>,
    hazards: Vec<HazardAgent>,
    agent: Cell,
    score: i64,
    steps: usize,
    outcome: Option<Outcome>,
    model: SlipModel,
    rng: StdRng,
}

impl Game {
    /// Start a game from `layout`. Without a seed the game is non-deterministic.
    pub fn new(layout: &Layout, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(random()),
        };
        Self {
            grid: layout.grid(),
            walls: layout.walls.clone(),
            corners: layout.corners(),
            food: layout.food.clone(),
            capsules: layout.capsules.clone(),
            hazards: layout.hazards.iter().map(|&c| HazardAgent::new(c)).collect(),
            agent: layout.agent,
            score: 0,
            steps: 0,
            outcome: None,
            model: SlipModel::default(),
            rng,
        }
    }

    /// Use a different slip model for agent moves.
    pub fn with_slip_model(mut self, model: SlipModel) -> Self {
        self.model = model;
        self
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    fn sample_executed(&mut self, intended: Direction) -> Direction {
        let ticket: f64 = self.rng.random();
        let outcomes = self.model.outcomes(intended);
        let mut cumulative = 0.0;
        for (direction, p) in outcomes {
            cumulative += p;
            if ticket < cumulative {
                return direction;
            }
        }
        outcomes[outcomes.len() - 1].0
    }

    fn consume(&mut self) {
        if let Some(idx) = self.food.iter().position(|&f| f == self.agent) {
            self.food.swap_remove(idx);
            self.score += score::FOOD;
            if self.food.is_empty() {
                self.score += score::WIN;
                self.outcome = Some(Outcome::Win);
            }
        }
        if let Some(idx) = self.capsules.iter().position(|&c| c == self.agent) {
            self.capsules.swap_remove(idx);
            for hazard in &mut self.hazards {
                hazard.timer = SCARED_TIME;
            }
        }
    }

    fn resolve_collisions(&mut self) {
        if self.is_over() {
            return;
        }
        for hazard in &mut self.hazards {
            if hazard.position != self.agent {
                continue;
            }
            if hazard.timer == 0 {
                self.score -= score::LOSS;
                self.outcome = Some(Outcome::Loss);
                return;
            }
            hazard.respawn();
            self.score += score::HAZARD_EATEN;
        }
    }

    fn move_hazards(&mut self) {
        for hazard in &mut self.hazards {
            let mut options = self.grid.open_directions(hazard.position);
            if let Some(heading) = hazard.heading.filter(|_| options.len() > 1) {
                options.retain(|&d| d != heading.reverse());
            }
            if let Some(&direction) = options.choose(&mut self.rng) {
                hazard.position = self.grid.step(hazard.position, direction);
                hazard.heading = Some(direction);
            }
            hazard.timer = hazard.timer.saturating_sub(1);
        }
    }
}

impl Environment for Game {
    fn agent(&self) -> Cell {
        self.agent
    }

    fn legal_actions(&self) -> Vec<Direction> {
        self.grid.open_directions(self.agent)
    }

    fn walls(&self) -> Vec<Cell> {
        self.walls.clone()
    }

    fn food(&self) -> Vec<Cell> {
        self.food.clone()
    }

    fn capsules(&self) -> Vec<Cell> {
        self.capsules.clone()
    }

    fn hazards(&self) -> Vec<Hazard> {
        self.hazards
            .iter()
            .map(|h| Hazard::new(h.position, h.timer))
            .collect()
    }

    fn corners(&self) -> Vec<Cell> {
        self.corners.clone()
    }

    fn execute(&mut self, direction: Direction, legal: &[Direction]) -> Result<()> {
        if self.is_over() {
            return Err(Error::GameOver);
        }
        if !legal.contains(&direction) {
            return Err(Error::IllegalMove {
                direction,
                legal: legal.to_vec(),
            });
        }

        let executed = self.sample_executed(direction);
        self.agent = self.grid.step(self.agent, executed);
        self.steps += 1;
        self.score -= score::TIME_PENALTY;

        self.consume();
        self.resolve_collisions();
        if !self.is_over() {
            self.move_hazards();
            self.resolve_collisions();
        }
        Ok(())
    }
}

/// Result of one episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub outcome: Outcome,
    pub score: i64,
    pub steps: usize,
}

/// Play `agent` in `game` until the game ends or `max_steps` moves are made.
///
/// # Errors
///
/// Propagates agent errors and rejects illegal moves with
/// [`Error::IllegalMove`].
pub fn run_episode<A: Agent + ?Sized>(
    agent: &mut A,
    game: &mut Game,
    max_steps: usize,
) -> Result<EpisodeSummary> {
    while !game.is_over() && game.steps() < max_steps {
        let snapshot = Snapshot::capture(&*game);
        if snapshot.legal.is_empty() {
            break;
        }
        let action = agent.get_action(&snapshot)?;
        if let Err(err) = game.execute(action, &snapshot.legal) {
            warn!(agent = agent.name(), %action, error = %err, "agent move rejected");
            return Err(err);
        }
    }

    let summary = EpisodeSummary {
        outcome: game.outcome().unwrap_or(Outcome::Timeout),
        score: game.score(),
        steps: game.steps(),
    };
    info!(
        agent = agent.name(),
        outcome = ?summary.outcome,
        score = summary.score,
        steps = summary.steps,
        "episode finished"
    );
    Ok(summary)
}
