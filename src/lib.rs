//! Grid-world MDP planning for maze agents
//!
//! This crate provides:
//! - Reward maps built from a maze snapshot (food, capsules, hazards, dead ends)
//! - Value iteration under a slip transition model
//! - Greedy action selection for the agent's current cell
//! - A maze simulator and baseline agent for end-to-end runs
//!
//! Every decision is computed from scratch; nothing is cached between calls.
//!
//! # Examples
//!
//! ```
//! use gridplan::{Cell, Direction, MdpPlanner, PlannerConfig, Snapshot};
//!
//! let snapshot = Snapshot {
//!     agent: Cell::new(0, 0),
//!     legal: vec![Direction::North, Direction::East],
//!     walls: Vec::new(),
//!     food: vec![Cell::new(2, 2)],
//!     capsules: Vec::new(),
//!     hazards: Vec::new(),
//!     corners: vec![Cell::new(0, 0), Cell::new(2, 2)],
//! };
//!
//! let planner = MdpPlanner::new(PlannerConfig::default()).unwrap();
//! let decision = planner.decide(&snapshot).unwrap();
//! assert!(matches!(decision.action, Direction::North | Direction::East));
//! ```

pub mod baseline;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod grid;
pub mod layout;
pub mod planner;
pub mod policy;
pub mod ports;
pub mod rewards;
pub mod simulation;
pub mod snapshot;
pub mod solver;
pub mod transition;

pub use config::PlannerConfig;
pub use error::{Error, Result};
pub use grid::{Cell, CellMap, Direction, Grid};
pub use layout::Layout;
pub use planner::{Decision, MdpAgent, MdpPlanner, Plan};
pub use rewards::{RewardConfig, RewardMapBuilder};
pub use snapshot::{Hazard, Snapshot};
pub use solver::{SolveReport, ValueIteration};
pub use transition::SlipModel;
