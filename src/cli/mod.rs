//! CLI infrastructure for the gridplan toolkit
//!
//! This module provides the command-line interface for planning single
//! moves and simulating whole episodes.

pub mod commands;
pub mod output;
