//! Agent port - abstraction over decision makers

use crate::{Result, grid::Direction, snapshot::Snapshot};

/// A decision maker that picks one move per turn.
///
/// Implementations are consulted once per turn with a fresh snapshot. The
/// MDP planner keeps no state between calls; baselines may keep an RNG.
///
/// # Examples
///
/// ```no_run
/// use gridplan::{Direction, Result, Snapshot, ports::Agent};
///
/// struct AlwaysFirst;
///
/// impl Agent for AlwaysFirst {
///     fn name(&self) -> &str {
///         "first"
///     }
///
///     fn get_action(&mut self, snapshot: &Snapshot) -> Result<Direction> {
///         snapshot
///             .legal
///             .first()
///             .copied()
///             .ok_or(gridplan::Error::NoLegalActions { cell: snapshot.agent })
///     }
/// }
/// ```
pub trait Agent {
    /// Name used in logs and summaries.
    fn name(&self) -> &str;

    /// Choose a move for the snapshot's agent.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoLegalActions`] when `snapshot.legal` is empty.
    fn get_action(&mut self, snapshot: &Snapshot) -> Result<Direction>;
}
