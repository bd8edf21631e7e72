//! Planner configuration.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    rewards::RewardConfig,
    solver::ValueIteration,
    transition::{DEFAULT_INTENDED_PROBABILITY, SlipModel},
};

/// Configuration for the MDP planner.
///
/// Builder-style setters start from the defaults; every field is optional when
/// loading from JSON.
///
/// # Examples
///
/// ```
/// use gridplan::config::PlannerConfig;
///
/// let config = PlannerConfig::default()
///     .with_discount(0.9)
///     .with_max_iterations(250);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Discount factor γ, in (0, 1)
    pub discount: f64,
    /// Stop once the sweep delta drops below this
    pub tolerance: f64,
    /// Hard cap on value-iteration sweeps
    pub max_iterations: usize,
    /// Probability that the intended move is executed
    pub intended_probability: f64,
    pub rewards: RewardConfig,
}

impl PlannerConfig {
    pub const DEFAULT_DISCOUNT: f64 = 0.95;
    pub const DEFAULT_TOLERANCE: f64 = 0.01;
    pub const DEFAULT_MAX_ITERATIONS: usize = 100;

    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_intended_probability(mut self, probability: f64) -> Self {
        self.intended_probability = probability;
        self
    }

    pub fn with_rewards(mut self, rewards: RewardConfig) -> Self {
        self.rewards = rewards;
        self
    }

    /// Slip model described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for an out-of-range probability.
    pub fn slip_model(&self) -> Result<SlipModel> {
        SlipModel::new(self.intended_probability)
    }

    /// Solver described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for out-of-range solver
    /// parameters.
    pub fn solver(&self) -> Result<ValueIteration> {
        ValueIteration::new(
            self.discount,
            self.tolerance,
            self.max_iterations,
            self.slip_model()?,
        )
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] describing the first invalid
    /// field.
    pub fn validate(&self) -> Result<()> {
        self.solver()?;
        self.rewards.validate()
    }

    /// Load and validate a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read,
    /// [`Error::Serialization`] if it is not valid JSON, or
    /// [`Error::InvalidConfiguration`] if validation fails.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            operation: format!("read planner config {}", path.display()),
            source,
        })?;
        let config: PlannerConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            discount: Self::DEFAULT_DISCOUNT,
            tolerance: Self::DEFAULT_TOLERANCE,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            intended_probability: DEFAULT_INTENDED_PROBABILITY,
            rewards: RewardConfig::default(),
        }
    }
}
