//! CSV export of reward, value and policy tables
//!
//! One row per grid cell, walls included, so the output can be pivoted back
//! into a heat map.

use std::{fs::File, io::Write, path::Path};

use serde::Serialize;

use crate::{Error, Result, planner::Plan};

/// A single row in the plan CSV export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanExportRecord {
    pub x: i32,
    pub y: i32,
    pub wall: bool,
    pub reward: f64,
    pub value: f64,
    /// Greedy direction, empty for walls
    pub policy: Option<String>,
}

/// Writes a [`Plan`] as CSV.
pub struct PlanCsvExporter;

impl PlanCsvExporter {
    /// Build the export rows in row-major order from the south-west corner.
    pub fn records(plan: &Plan) -> Vec<PlanExportRecord> {
        let policy = plan.greedy_policy();
        plan.values
            .iter()
            .map(|(cell, &value)| PlanExportRecord {
                x: cell.x,
                y: cell.y,
                wall: plan.grid.is_wall(cell),
                reward: plan.rewards.value(cell),
                value,
                policy: policy
                    .get(cell)
                    .copied()
                    .flatten()
                    .map(|d| d.to_string()),
            })
            .collect()
    }

    /// Write the plan to any writer. Returns the number of rows written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Csv`] if a row cannot be serialized or written.
    pub fn write<W: Write>(plan: &Plan, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        let records = Self::records(plan);
        for record in &records {
            csv_writer.serialize(record)?;
        }
        csv_writer.flush().map_err(|source| Error::Io {
            operation: "flush plan CSV".to_string(),
            source,
        })?;
        Ok(records.len())
    }

    /// Write the plan to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be created, or [`Error::Csv`]
    /// on write failure.
    pub fn export_to_file<P: AsRef<Path>>(plan: &Plan, path: P) -> Result<usize> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create {}", path.display()),
            source,
        })?;
        Self::write(plan, file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::PlannerConfig,
        grid::{Cell, Direction},
        planner::MdpPlanner,
        snapshot::Snapshot,
    };

    fn plan() -> Plan {
        let snapshot = Snapshot {
            agent: Cell::new(0, 0),
            legal: vec![Direction::East],
            walls: vec![Cell::new(1, 1)],
            food: vec![Cell::new(2, 0)],
            capsules: Vec::new(),
            hazards: Vec::new(),
            corners: vec![Cell::new(0, 0), Cell::new(2, 1)],
        };
        MdpPlanner::new(PlannerConfig::default())
            .unwrap()
            .plan(&snapshot)
    }

    #[test]
    fn test_records_cover_every_cell() {
        let records = PlanCsvExporter::records(&plan());
        assert_eq!(records.len(), 6);
        let wall = records.iter().find(|r| r.x == 1 && r.y == 1).unwrap();
        assert!(wall.wall);
        assert_eq!(wall.value, 0.0);
        assert_eq!(wall.policy, None);
    }

    #[test]
    fn test_write_emits_header_and_rows() {
        let mut buffer = Vec::new();
        let rows = PlanCsvExporter::write(&plan(), &mut buffer).unwrap();
        assert_eq!(rows, 6);

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("x,y,wall,reward,value,policy"));
        assert_eq!(lines.count(), 6);
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.csv");
        let rows = PlanCsvExporter::export_to_file(&plan(), &path).unwrap();
        assert_eq!(rows, 6);
        assert!(std::fs::read_to_string(&path).unwrap().starts_with("x,y,"));
    }
}
