//! Data export functionality
//!
//! This module provides exporters for writing planner output to
//! external formats for analysis.

pub mod plan_csv;

pub use plan_csv::{PlanCsvExporter, PlanExportRecord};
