//! CLI subcommands

pub mod plan;
pub mod simulate;

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::PlannerConfig;

/// Load a planner config from `path`, or use the defaults.
pub(crate) fn load_config(path: Option<&Path>) -> Result<PlannerConfig> {
    match path {
        Some(path) => PlannerConfig::load_from_file(path)
            .with_context(|| format!("Failed to load planner config: {}", path.display())),
        None => Ok(PlannerConfig::default()),
    }
}
