use thiserror::Error;

use super::state::Position;

/// Contract violations raised by the transition interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// A discrete action index outside the four recognized values.
    #[error("invalid action index {0}, expected 0..=3")]
    InvalidAction(usize),
    /// `step` was called while the episode is already over.
    #[error("episode is over, call reset before stepping again")]
    EpisodeOver,
}

/// Rejections raised when validating a grid layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("grid size {0} is too small, need at least 2")]
    GridTooSmall(usize),
    #[error("start {0} is outside the grid")]
    StartOutOfBounds(Position),
    #[error("goal {0} is outside the grid")]
    GoalOutOfBounds(Position),
    #[error("hazard {0} is outside the grid")]
    HazardOutOfBounds(Position),
    #[error("start and goal share the cell {0}")]
    GoalOnStart(Position),
    #[error("hazard {0} sits on the start cell")]
    HazardOnStart(Position),
    #[error("hazard {0} sits on the goal cell")]
    HazardOnGoal(Position),
    #[error("hazard {0} is listed twice")]
    DuplicateHazard(Position),
    #[error("cannot place {requested} hazards on a grid with {available} free cells")]
    TooManyHazards { requested: usize, available: usize },
}
