//! Baseline agents for comparison with the planner

use rand::{Rng, SeedableRng, random, rngs::StdRng};

use crate::{Error, Result, grid::Direction, ports::Agent, snapshot::Snapshot};

/// Uniformly random legal move (baseline)
pub struct RandomAgent {
    name: String,
    rng: StdRng,
}

impl RandomAgent {
    /// Create a new random agent
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(random()),
        }
    }

    /// Create a new random agent with a deterministic seed
    pub fn with_seed(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_action(&mut self, snapshot: &Snapshot) -> Result<Direction> {
        if snapshot.legal.is_empty() {
            return Err(Error::NoLegalActions {
                cell: snapshot.agent,
            });
        }
        let index = self.rng.random_range(0..snapshot.legal.len());
        Ok(snapshot.legal[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    fn snapshot(legal: Vec<Direction>) -> Snapshot {
        Snapshot {
            agent: Cell::new(1, 1),
            legal,
            walls: Vec::new(),
            food: Vec::new(),
            capsules: Vec::new(),
            hazards: Vec::new(),
            corners: vec![Cell::new(0, 0), Cell::new(2, 2)],
        }
    }

    #[test]
    fn test_random_agent_only_picks_legal_moves() {
        let mut agent = RandomAgent::with_seed("random", 42);
        let legal = vec![Direction::South, Direction::West];
        for _ in 0..50 {
            let action = agent.get_action(&snapshot(legal.clone())).unwrap();
            assert!(legal.contains(&action));
        }
    }

    #[test]
    fn test_random_agent_is_reproducible_with_seed() {
        let legal = Direction::ALL.to_vec();
        let mut a = RandomAgent::with_seed("a", 9);
        let mut b = RandomAgent::with_seed("b", 9);
        for _ in 0..20 {
            assert_eq!(
                a.get_action(&snapshot(legal.clone())).unwrap(),
                b.get_action(&snapshot(legal.clone())).unwrap()
            );
        }
    }

    #[test]
    fn test_random_agent_rejects_empty_legal_set() {
        let mut agent = RandomAgent::with_seed("random", 1);
        assert!(matches!(
            agent.get_action(&snapshot(Vec::new())),
            Err(Error::NoLegalActions { .. })
        ));
    }
}
