use std::fmt;

use serde::{Deserialize, Serialize};

use super::action::Action;

/// A cell coordinate on the grid. x is the column, y is the row, both zero
/// based from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The cell this action points at, before any boundary clamping
    pub fn moved(&self, action: Action) -> Self {
        let (dx, dy) = action.delta();
        self.moved_by(dx, dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// How an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeOutcome {
    /// The player stepped onto a hazard cell
    Captured,
    /// The player reached the goal cell
    Escaped,
}

/// Complete episode state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Cell the player currently occupies
    pub position: Position,
    /// Cumulative reward collected this episode
    pub score: f32,
    /// Transitions taken this episode
    pub steps: u32,
    /// Set once the episode ends; any further steps must go through reset
    pub outcome: Option<EpisodeOutcome>,
}

impl GameState {
    /// Fresh episode state at the given start cell
    pub fn new(start: Position) -> Self {
        Self {
            position: start,
            score: 0.0,
            steps: 0,
            outcome: None,
        }
    }

    /// True once the episode has ended in a capture or an escape
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }
}
