//! Reward map construction.
//!
//! Rewards are layered by an explicit precedence list ([`PRECEDENCE`]). Each
//! rule runs once, in order, over a fresh table; later rules override earlier
//! ones at the same cell, except hazard buffers which subtract from whatever
//! is already there.

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    grid::{Cell, CellMap, Direction, Grid},
    snapshot::Snapshot,
};

/// Reward magnitudes. Penalties are stored as positive amounts and subtracted.
///
/// The defaults are tuned for classic maze sizes and are not expected to carry
/// over unchanged to much larger or smaller grids.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Reward for every open cell before any other rule applies.
    pub living_cost: f64,
    /// Subtracted from cells with three or more blocked sides.
    pub dead_end_penalty: f64,
    pub goal_reward: f64,
    pub capsule_reward: f64,
    /// Assigned to the cell of each lethal hazard.
    pub hazard_reward: f64,
    /// Subtracted from each open neighbour of a lethal hazard.
    pub hazard_buffer_penalty: f64,
}

impl RewardConfig {
    pub const DEFAULT_LIVING_COST: f64 = -0.04;
    pub const DEFAULT_DEAD_END_PENALTY: f64 = 50.0;
    pub const DEFAULT_GOAL_REWARD: f64 = 10.0;
    pub const DEFAULT_CAPSULE_REWARD: f64 = 20.0;
    pub const DEFAULT_HAZARD_REWARD: f64 = -500.0;
    pub const DEFAULT_HAZARD_BUFFER_PENALTY: f64 = 100.0;

    pub fn with_living_cost(mut self, value: f64) -> Self {
        self.living_cost = value;
        self
    }

    pub fn with_dead_end_penalty(mut self, value: f64) -> Self {
        self.dead_end_penalty = value;
        self
    }

    pub fn with_goal_reward(mut self, value: f64) -> Self {
        self.goal_reward = value;
        self
    }

    pub fn with_capsule_reward(mut self, value: f64) -> Self {
        self.capsule_reward = value;
        self
    }

    pub fn with_hazard_reward(mut self, value: f64) -> Self {
        self.hazard_reward = value;
        self
    }

    pub fn with_hazard_buffer_penalty(mut self, value: f64) -> Self {
        self.hazard_buffer_penalty = value;
        self
    }

    /// Check the ordering the reward rules rely on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if a value is non-finite, a
    /// penalty is negative, the capsule reward does not exceed the goal reward,
    /// or the hazard reward is not worse than the dead-end penalty.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("living_cost", self.living_cost),
            ("dead_end_penalty", self.dead_end_penalty),
            ("goal_reward", self.goal_reward),
            ("capsule_reward", self.capsule_reward),
            ("hazard_reward", self.hazard_reward),
            ("hazard_buffer_penalty", self.hazard_buffer_penalty),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(format!("{name} must be finite, got {value}")));
        }
        if self.living_cost > 0.0 {
            return Err(invalid(format!(
                "living_cost must not be positive, got {}",
                self.living_cost
            )));
        }
        if self.dead_end_penalty < 0.0 || self.hazard_buffer_penalty < 0.0 {
            return Err(invalid(
                "dead_end_penalty and hazard_buffer_penalty are subtracted and must be non-negative"
                    .to_string(),
            ));
        }
        if self.capsule_reward <= self.goal_reward {
            return Err(invalid(format!(
                "capsule_reward ({}) must exceed goal_reward ({})",
                self.capsule_reward, self.goal_reward
            )));
        }
        if self.hazard_reward >= 0.0 || self.hazard_reward.abs() <= self.dead_end_penalty {
            return Err(invalid(format!(
                "hazard_reward ({}) must be negative and larger in magnitude than dead_end_penalty ({})",
                self.hazard_reward, self.dead_end_penalty
            )));
        }
        Ok(())
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidConfiguration { message }
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            living_cost: Self::DEFAULT_LIVING_COST,
            dead_end_penalty: Self::DEFAULT_DEAD_END_PENALTY,
            goal_reward: Self::DEFAULT_GOAL_REWARD,
            capsule_reward: Self::DEFAULT_CAPSULE_REWARD,
            hazard_reward: Self::DEFAULT_HAZARD_REWARD,
            hazard_buffer_penalty: Self::DEFAULT_HAZARD_BUFFER_PENALTY,
        }
    }
}

/// One layer of the reward map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardRule {
    LivingCost,
    DeadEnd,
    Goal,
    Capsule,
    Hazard,
}

/// Order in which reward rules are applied.
pub const PRECEDENCE: [RewardRule; 5] = [
    RewardRule::LivingCost,
    RewardRule::DeadEnd,
    RewardRule::Goal,
    RewardRule::Capsule,
    RewardRule::Hazard,
];

/// Builds the per-decision reward table.
#[derive(Debug, Clone, Copy)]
pub struct RewardMapBuilder<'a> {
    config: &'a RewardConfig,
}

impl<'a> RewardMapBuilder<'a> {
    pub fn new(config: &'a RewardConfig) -> Self {
        Self { config }
    }

    /// Build a reward for every open cell of `grid`. Wall cells stay at 0.
    pub fn build(&self, grid: &Grid, snapshot: &Snapshot) -> CellMap<f64> {
        let mut rewards = CellMap::filled(grid, 0.0);
        for rule in PRECEDENCE {
            self.apply(rule, grid, snapshot, &mut rewards);
        }
        rewards
    }

    fn apply(
        &self,
        rule: RewardRule,
        grid: &Grid,
        snapshot: &Snapshot,
        rewards: &mut CellMap<f64>,
    ) {
        let config = self.config;
        match rule {
            RewardRule::LivingCost => {
                for cell in grid.open_cells() {
                    rewards.set(cell, config.living_cost);
                }
            }
            RewardRule::DeadEnd => {
                // The last food may sit in a dead end; never penalize reaching it.
                if snapshot.food.len() <= 1 {
                    return;
                }
                for cell in grid.open_cells().filter(|&c| grid.blocked_neighbours(c) >= 3) {
                    if let Some(reward) = rewards.get_mut(cell) {
                        *reward -= config.dead_end_penalty;
                    }
                }
            }
            RewardRule::Goal => {
                override_open(grid, rewards, &snapshot.food, config.goal_reward);
            }
            RewardRule::Capsule => {
                override_open(grid, rewards, &snapshot.capsules, config.capsule_reward);
            }
            RewardRule::Hazard => {
                for hazard in snapshot.hazards.iter().filter(|h| h.is_lethal()) {
                    if grid.is_blocked(hazard.position) {
                        continue;
                    }
                    rewards.set(hazard.position, config.hazard_reward);
                    for direction in Direction::ALL {
                        let neighbour = hazard.position.offset(direction);
                        if grid.is_blocked(neighbour) {
                            continue;
                        }
                        if let Some(reward) = rewards.get_mut(neighbour) {
                            *reward -= config.hazard_buffer_penalty;
                        }
                    }
                }
            }
        }
    }
}

fn override_open(grid: &Grid, rewards: &mut CellMap<f64>, cells: &[Cell], value: f64) {
    for &cell in cells {
        if !grid.is_blocked(cell) {
            rewards.set(cell, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Hazard;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    /// 5x3 grid with the outer ring walled, leaving a 3-cell corridor on y=1.
    fn corridor_snapshot() -> Snapshot {
        let mut walls = Vec::new();
        for x in 0..5 {
            walls.push(Cell::new(x, 0));
            walls.push(Cell::new(x, 2));
        }
        walls.push(Cell::new(0, 1));
        walls.push(Cell::new(4, 1));
        Snapshot {
            agent: Cell::new(2, 1),
            legal: vec![Direction::East, Direction::West],
            walls,
            food: Vec::new(),
            capsules: Vec::new(),
            hazards: Vec::new(),
            corners: vec![Cell::new(0, 0), Cell::new(4, 2)],
        }
    }

    fn build(snapshot: &Snapshot) -> CellMap<f64> {
        let config = RewardConfig::default();
        RewardMapBuilder::new(&config).build(&snapshot.grid(), snapshot)
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(RewardConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_rewards() {
        let config = RewardConfig::default().with_capsule_reward(5.0);
        assert!(config.validate().is_err());

        let config = RewardConfig::default().with_hazard_reward(-10.0);
        assert!(config.validate().is_err());

        let config = RewardConfig::default().with_living_cost(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_living_cost_fills_open_cells_and_walls_stay_zero() {
        let snapshot = corridor_snapshot();
        let rewards = build(&snapshot);
        assert!(approx_eq(rewards.value(Cell::new(2, 1)), RewardConfig::DEFAULT_LIVING_COST));
        assert_eq!(rewards.value(Cell::new(0, 0)), 0.0);
        assert_eq!(rewards.value(Cell::new(0, 1)), 0.0);
    }

    #[test]
    fn test_dead_end_penalty_only_with_multiple_food() {
        let mut snapshot = corridor_snapshot();
        snapshot.food = vec![Cell::new(2, 1)];
        let rewards = build(&snapshot);
        assert!(approx_eq(rewards.value(Cell::new(1, 1)), RewardConfig::DEFAULT_LIVING_COST));

        snapshot.food = vec![Cell::new(2, 1), Cell::new(3, 1)];
        let rewards = build(&snapshot);
        assert!(approx_eq(
            rewards.value(Cell::new(1, 1)),
            RewardConfig::DEFAULT_LIVING_COST - RewardConfig::DEFAULT_DEAD_END_PENALTY
        ));
    }

    #[test]
    fn test_goal_overrides_dead_end() {
        let mut snapshot = corridor_snapshot();
        snapshot.food = vec![Cell::new(1, 1), Cell::new(3, 1)];
        let rewards = build(&snapshot);
        assert!(approx_eq(rewards.value(Cell::new(1, 1)), RewardConfig::DEFAULT_GOAL_REWARD));
        assert!(approx_eq(rewards.value(Cell::new(3, 1)), RewardConfig::DEFAULT_GOAL_REWARD));
    }

    #[test]
    fn test_capsule_overrides_goal() {
        let mut snapshot = corridor_snapshot();
        snapshot.food = vec![Cell::new(2, 1)];
        snapshot.capsules = vec![Cell::new(2, 1)];
        let rewards = build(&snapshot);
        assert!(approx_eq(rewards.value(Cell::new(2, 1)), RewardConfig::DEFAULT_CAPSULE_REWARD));
    }

    #[test]
    fn test_hazard_overrides_goal_and_buffers_neighbours() {
        let mut snapshot = corridor_snapshot();
        snapshot.food = vec![Cell::new(2, 1), Cell::new(3, 1)];
        snapshot.hazards = vec![Hazard::lethal(Cell::new(2, 1))];
        let rewards = build(&snapshot);

        assert!(approx_eq(rewards.value(Cell::new(2, 1)), RewardConfig::DEFAULT_HAZARD_REWARD));
        // Buffer subtracts from the goal reward rather than replacing it.
        assert!(approx_eq(
            rewards.value(Cell::new(3, 1)),
            RewardConfig::DEFAULT_GOAL_REWARD - RewardConfig::DEFAULT_HAZARD_BUFFER_PENALTY
        ));
        // Wall neighbours are untouched.
        assert_eq!(rewards.value(Cell::new(2, 0)), 0.0);
    }

    #[test]
    fn test_neutralized_hazard_has_no_effect() {
        let mut snapshot = corridor_snapshot();
        let before = build(&snapshot);
        snapshot.hazards = vec![Hazard::new(Cell::new(2, 1), 12)];
        let after = build(&snapshot);
        assert_eq!(before, after);
    }

    #[test]
    fn test_hazard_buffers_stack() {
        let mut snapshot = corridor_snapshot();
        snapshot.hazards = vec![
            Hazard::lethal(Cell::new(1, 1)),
            Hazard::lethal(Cell::new(3, 1)),
        ];
        let rewards = build(&snapshot);
        assert!(approx_eq(
            rewards.value(Cell::new(2, 1)),
            RewardConfig::DEFAULT_LIVING_COST - 2.0 * RewardConfig::DEFAULT_HAZARD_BUFFER_PENALTY
        ));
    }
}
