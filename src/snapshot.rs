//! Per-decision view of the environment.

use serde::{Deserialize, Serialize};

use crate::{
    grid::{Cell, Direction, Grid},
    ports::Environment,
};

/// A hazard (ghost) and its neutralization timer.
///
/// While `timer > 0` the hazard is temporarily harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hazard {
    pub position: Cell,
    pub timer: u32,
}

impl Hazard {
    pub const fn new(position: Cell, timer: u32) -> Self {
        Hazard { position, timer }
    }

    pub const fn lethal(position: Cell) -> Self {
        Hazard::new(position, 0)
    }

    pub fn is_lethal(&self) -> bool {
        self.timer == 0
    }
}

/// Everything the planner reads for one decision.
///
/// A snapshot is owned by a single decision and never reused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub agent: Cell,
    /// Legal moves with the no-op already removed.
    pub legal: Vec<Direction>,
    pub walls: Vec<Cell>,
    pub food: Vec<Cell>,
    pub capsules: Vec<Cell>,
    pub hazards: Vec<Hazard>,
    pub corners: Vec<Cell>,
}

impl Snapshot {
    /// Query every per-decision input from the environment.
    pub fn capture<E: Environment + ?Sized>(env: &E) -> Self {
        Snapshot {
            agent: env.agent(),
            legal: env.legal_actions(),
            walls: env.walls(),
            food: env.food(),
            capsules: env.capsules(),
            hazards: env.hazards(),
            corners: env.corners(),
        }
    }

    /// Grid bounds and walls derived from the corners.
    pub fn grid(&self) -> Grid {
        Grid::from_corners(&self.corners, self.walls.iter().copied())
    }
}
