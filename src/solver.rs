//! Value iteration over the reward map.
//!
//! Each sweep is a synchronous Bellman backup:
//!
//! ```text
//! V'(s) = R(s) + γ · max_a Σ_{s'} P(s' | s, a) · V(s')
//! ```
//!
//! Every update in a sweep reads the previous sweep's table. Wall cells are
//! outside the domain and stay at 0.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{
    Error, Result,
    grid::{Cell, CellMap, Direction, Grid},
    transition::SlipModel,
};

/// Sentinel for action comparisons; below every reachable value.
pub const WORST_VALUE: f64 = f64::MIN;

/// Outcome of one solver run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolveReport {
    /// Sweeps performed.
    pub iterations: usize,
    /// Sup-norm change of the last sweep.
    pub final_delta: f64,
    /// Whether the last delta fell below the tolerance before the cap.
    pub converged: bool,
}

/// Value iteration with a tolerance and a hard sweep cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueIteration {
    discount: f64,
    tolerance: f64,
    max_iterations: usize,
    model: SlipModel,
}

impl ValueIteration {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] unless `0 < discount < 1`,
    /// `tolerance > 0` and `max_iterations > 0`.
    pub fn new(
        discount: f64,
        tolerance: f64,
        max_iterations: usize,
        model: SlipModel,
    ) -> Result<Self> {
        if !(discount > 0.0 && discount < 1.0) {
            return Err(Error::InvalidConfiguration {
                message: format!("discount {discount} must be in (0, 1)"),
            });
        }
        if !(tolerance > 0.0 && tolerance.is_finite()) {
            return Err(Error::InvalidConfiguration {
                message: format!("tolerance {tolerance} must be positive and finite"),
            });
        }
        if max_iterations == 0 {
            return Err(Error::InvalidConfiguration {
                message: "max_iterations must be at least 1".to_string(),
            });
        }
        Ok(Self {
            discount,
            tolerance,
            max_iterations,
            model,
        })
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn model(&self) -> &SlipModel {
        &self.model
    }

    /// Run value iteration until the sweep delta drops below the tolerance or
    /// the sweep cap is reached.
    pub fn solve(&self, grid: &Grid, rewards: &CellMap<f64>) -> (CellMap<f64>, SolveReport) {
        let mut values = CellMap::filled(grid, 0.0);
        for cell in grid.open_cells() {
            values.set(cell, rewards.value(cell));
        }
        let mut next = values.clone();

        let mut report = SolveReport {
            iterations: 0,
            final_delta: 0.0,
            converged: false,
        };

        for iteration in 1..=self.max_iterations {
            let mut delta: f64 = 0.0;
            for cell in grid.open_cells() {
                let (_, best) = self.best_action(grid, &values, cell);
                let updated = rewards.value(cell) + self.discount * best;
                delta = delta.max((updated - values.value(cell)).abs());
                next.set(cell, updated);
            }
            std::mem::swap(&mut values, &mut next);

            trace!(iteration, delta, "value iteration sweep");
            report.iterations = iteration;
            report.final_delta = delta;
            if delta < self.tolerance {
                report.converged = true;
                break;
            }
        }

        debug!(
            iterations = report.iterations,
            final_delta = report.final_delta,
            converged = report.converged,
            "value iteration finished"
        );
        (values, report)
    }

    /// Greedy action over all four directions and its expected value.
    ///
    /// Ties keep the earliest direction in [`Direction::ALL`].
    pub fn best_action(
        &self,
        grid: &Grid,
        values: &CellMap<f64>,
        cell: Cell,
    ) -> (Direction, f64) {
        let mut best = (Direction::ALL[0], WORST_VALUE);
        for direction in Direction::ALL {
            let value = self.model.expected_value(grid, values, cell, direction);
            if value > best.1 {
                best = (direction, value);
            }
        }
        best
    }
}
