//! Ports (trait boundaries) for external collaborators.
//!
//! The planner core only talks to the game through these traits. The
//! simulator in [`crate::simulation`] is one adapter; a host game engine is
//! another.

pub mod agent;
pub mod environment;

pub use agent::Agent;
pub use environment::Environment;
