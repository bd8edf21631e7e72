//! Greedy action selection from a converged value table.

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    grid::{Cell, CellMap, Direction, Grid},
    transition::SlipModel,
};

/// A legal action and its expected value from the agent's cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionValue {
    pub direction: Direction,
    pub expected_value: f64,
}

/// Expected value of every legal action, in [`Direction::ALL`] order.
///
/// Directions missing from `legal` are skipped; duplicates are evaluated once.
pub fn action_values(
    grid: &Grid,
    values: &CellMap<f64>,
    model: &SlipModel,
    agent: Cell,
    legal: &[Direction],
) -> Vec<ActionValue> {
    Direction::ALL
        .into_iter()
        .filter(|direction| legal.contains(direction))
        .map(|direction| ActionValue {
            direction,
            expected_value: model.expected_value(grid, values, agent, direction),
        })
        .collect()
}

/// Pick the legal action with the strictly greatest expected value.
///
/// Ties, including every action sitting at the sentinel, resolve to the first
/// legal direction in [`Direction::ALL`] order.
///
/// # Errors
///
/// Returns [`Error::NoLegalActions`] if `legal` is empty.
pub fn select_action(
    grid: &Grid,
    values: &CellMap<f64>,
    model: &SlipModel,
    agent: Cell,
    legal: &[Direction],
) -> Result<ActionValue> {
    let mut candidates = action_values(grid, values, model, agent, legal).into_iter();
    let Some(mut best) = candidates.next() else {
        return Err(Error::NoLegalActions { cell: agent });
    };
    for candidate in candidates {
        if candidate.expected_value > best.expected_value {
            best = candidate;
        }
    }
    Ok(best)
}

/// Greedy direction for every open cell; `None` on walls.
pub fn greedy_policy(
    grid: &Grid,
    values: &CellMap<f64>,
    model: &SlipModel,
) -> CellMap<Option<Direction>> {
    let mut policy = CellMap::filled(grid, None);
    for cell in grid.open_cells() {
        let Ok(best) = select_action(grid, values, model, cell, &Direction::ALL) else {
            continue;
        };
        policy.set(cell, Some(best.direction));
    }
    policy
}
