//! Stochastic "slip" transition model.
//!
//! An intended move succeeds with probability `p`; otherwise the agent slips to
//! one of the two perpendicular directions, each with probability `(1 - p) / 2`.
//! The distribution does not depend on the cell.

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    grid::{Cell, CellMap, Direction, Grid},
};

/// Default probability that the intended direction is executed.
pub const DEFAULT_INTENDED_PROBABILITY: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlipModel {
    intended: f64,
}

impl SlipModel {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] unless `0 < intended <= 1`.
    pub fn new(intended: f64) -> Result<Self> {
        if intended.is_finite() && intended > 0.0 && intended <= 1.0 {
            Ok(SlipModel { intended })
        } else {
            Err(Error::InvalidConfiguration {
                message: format!("intended move probability {intended} must be in (0, 1]"),
            })
        }
    }

    pub fn intended(&self) -> f64 {
        self.intended
    }

    pub fn slip(&self) -> f64 {
        (1.0 - self.intended) / 2.0
    }

    /// The executed-direction distribution for `action`: the intended direction
    /// first, then the two perpendicular slips.
    pub fn outcomes(&self, action: Direction) -> [(Direction, f64); 3] {
        let [left, right] = action.perpendicular();
        let slip = self.slip();
        [(action, self.intended), (left, slip), (right, slip)]
    }

    /// Expected value of taking `action` from `from`, looking destinations up
    /// in `values`. Blocked destinations resolve to `from` itself.
    pub fn expected_value(
        &self,
        grid: &Grid,
        values: &CellMap<f64>,
        from: Cell,
        action: Direction,
    ) -> f64 {
        self.outcomes(action)
            .iter()
            .map(|&(executed, p)| p * values.value(grid.step(from, executed)))
            .sum()
    }
}

impl Default for SlipModel {
    fn default() -> Self {
        SlipModel {
            intended: DEFAULT_INTENDED_PROBABILITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_probabilities_sum_to_one() {
        let model = SlipModel::default();
        for action in Direction::ALL {
            let total: f64 = model.outcomes(action).iter().map(|(_, p)| p).sum();
            assert!((total - 1.0).abs() < 1e-12, "{action}: {total}");
        }
    }

    #[test]
    fn test_default_split_is_eighty_ten_ten() {
        let outcomes = SlipModel::default().outcomes(Direction::North);
        assert_eq!(outcomes[0], (Direction::North, 0.8));
        assert_eq!(outcomes[1].0, Direction::East);
        assert_eq!(outcomes[2].0, Direction::West);
        assert!((outcomes[1].1 - 0.1).abs() < 1e-12);
        assert!((outcomes[2].1 - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_out_of_range_probability() {
        assert!(SlipModel::new(0.0).is_err());
        assert!(SlipModel::new(1.2).is_err());
        assert!(SlipModel::new(f64::NAN).is_err());
        assert!(SlipModel::new(1.0).is_ok());
    }

    #[test]
    fn test_off_grid_action_resolves_to_origin_value() {
        let grid = Grid::new(2, 1, std::iter::empty());
        let mut values = CellMap::filled(&grid, 0.0);
        values.set(Cell::new(0, 0), 4.0);
        values.set(Cell::new(1, 0), 10.0);

        // North from (0,0): intended and the West slip stay put, East slip moves.
        let model = SlipModel::default();
        let ev = model.expected_value(&grid, &values, Cell::new(0, 0), Direction::North);
        assert!((ev - (0.8 * 4.0 + 0.1 * 10.0 + 0.1 * 4.0)).abs() < 1e-9);
    }
}
