//! Environment port - the game-control API the planner consumes

use crate::{
    Result,
    grid::{Cell, Direction},
    snapshot::Hazard,
};

/// Environment-query and move-execution collaborator.
///
/// Queries are answered for the current turn. The planner reads them once per
/// decision through [`crate::Snapshot::capture`].
///
/// # Examples
///
/// ```no_run
/// use gridplan::{Snapshot, ports::Environment};
///
/// fn describe<E: Environment>(env: &E) {
///     let snapshot = Snapshot::capture(env);
///     println!("agent at {} with {} food left", snapshot.agent, snapshot.food.len());
/// }
/// ```
pub trait Environment {
    /// The agent's current cell.
    fn agent(&self) -> Cell;

    /// Legal moves for the agent, with the no-op already removed.
    ///
    /// Must not be empty for a live game.
    fn legal_actions(&self) -> Vec<Direction>;

    /// All wall cells.
    fn walls(&self) -> Vec<Cell>;

    /// Remaining food (goal) cells.
    fn food(&self) -> Vec<Cell>;

    /// Remaining capsule cells.
    fn capsules(&self) -> Vec<Cell>;

    /// Hazards with their neutralization timers.
    fn hazards(&self) -> Vec<Hazard>;

    /// Corner coordinates of the maze. The grid spans one past the largest
    /// corner `x` and `y`.
    fn corners(&self) -> Vec<Cell>;

    /// Execute `direction`, validating it against `legal`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::IllegalMove`] if `direction` is not in `legal`,
    /// or [`crate::Error::GameOver`] once the game has finished.
    fn execute(&mut self, direction: Direction, legal: &[Direction]) -> Result<()>;
}
