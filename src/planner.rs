//! Per-decision planning: rewards, value iteration, action selection.
//!
//! Nothing is cached between calls. Every [`MdpPlanner::decide`] rebuilds the
//! reward and value tables from the snapshot it is given.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Result,
    config::PlannerConfig,
    grid::{CellMap, Direction, Grid},
    policy::{self, ActionValue},
    ports::Agent,
    rewards::RewardMapBuilder,
    snapshot::Snapshot,
    solver::{SolveReport, ValueIteration},
};

/// Reward and value tables for one snapshot.
#[derive(Debug, Clone)]
pub struct Plan {
    pub grid: Grid,
    pub rewards: CellMap<f64>,
    pub values: CellMap<f64>,
    pub report: SolveReport,
    solver: ValueIteration,
}

impl Plan {
    /// Greedy direction for every open cell.
    pub fn greedy_policy(&self) -> CellMap<Option<Direction>> {
        policy::greedy_policy(&self.grid, &self.values, self.solver.model())
    }
}

/// The chosen move and how it was reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub action: Direction,
    pub expected_value: f64,
    /// Every legal action with its expected value, in evaluation order.
    pub candidates: Vec<ActionValue>,
    pub report: SolveReport,
}

/// Value-iteration planner.
#[derive(Debug, Clone)]
pub struct MdpPlanner {
    config: PlannerConfig,
    solver: ValueIteration,
}

impl MdpPlanner {
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if `config` fails
    /// validation.
    pub fn new(config: PlannerConfig) -> Result<Self> {
        config.validate()?;
        let solver = config.solver()?;
        Ok(Self { config, solver })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Build rewards and solve for values.
    pub fn plan(&self, snapshot: &Snapshot) -> Plan {
        let grid = snapshot.grid();
        let rewards = RewardMapBuilder::new(&self.config.rewards).build(&grid, snapshot);
        let (values, report) = self.solver.solve(&grid, &rewards);
        Plan {
            grid,
            rewards,
            values,
            report,
            solver: self.solver,
        }
    }

    /// Plan and pick the best legal move for the snapshot's agent.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoLegalActions`] if the snapshot lists no legal
    /// moves.
    pub fn decide(&self, snapshot: &Snapshot) -> Result<Decision> {
        let plan = self.plan(snapshot);
        self.decide_with_plan(&plan, snapshot)
    }

    /// Pick the best legal move using an already computed plan.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoLegalActions`] if the snapshot lists no legal
    /// moves.
    pub fn decide_with_plan(&self, plan: &Plan, snapshot: &Snapshot) -> Result<Decision> {
        let model = self.solver.model();
        let best = policy::select_action(
            &plan.grid,
            &plan.values,
            model,
            snapshot.agent,
            &snapshot.legal,
        )?;
        let candidates = policy::action_values(
            &plan.grid,
            &plan.values,
            model,
            snapshot.agent,
            &snapshot.legal,
        );
        debug!(
            agent = %snapshot.agent,
            action = %best.direction,
            expected_value = best.expected_value,
            iterations = plan.report.iterations,
            "planner decision"
        );
        Ok(Decision {
            action: best.direction,
            expected_value: best.expected_value,
            candidates,
            report: plan.report,
        })
    }
}

/// [`Agent`] adapter around [`MdpPlanner`].
#[derive(Debug, Clone)]
pub struct MdpAgent {
    name: String,
    planner: MdpPlanner,
}

impl MdpAgent {
    pub fn new(name: impl Into<String>, planner: MdpPlanner) -> Self {
        Self {
            name: name.into(),
            planner,
        }
    }

    pub fn planner(&self) -> &MdpPlanner {
        &self.planner
    }
}

impl Agent for MdpAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_action(&mut self, snapshot: &Snapshot) -> Result<Direction> {
        self.planner.decide(snapshot).map(|decision| decision.action)
    }
}
