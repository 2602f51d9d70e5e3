use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::error::LayoutError;
use super::state::Position;

/// Side length of the built-in layout
pub const DEFAULT_GRID_SIZE: usize = 7;

/// What occupies a cell of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// Free floor, costs the step penalty to walk on
    Open,
    /// Ends the episode with the hazard penalty
    Hazard,
    /// Ends the episode with the goal reward
    Goal,
}

/// Layout and reward schedule for one grid
///
/// The engine takes this by value, so tests and callers can inject any
/// layout they like. `validate` enforces the geometric invariants; engines
/// are only ever built from validated configs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Side length of the square grid
    pub size: usize,
    /// Cell every episode starts from
    pub start: Position,
    /// Cell that ends the episode with a win
    pub goal: Position,
    /// Cells that end the episode with a capture
    pub hazards: Vec<Position>,

    // Rewards (for RL)
    /// Reward for reaching the goal
    pub goal_reward: f32,
    /// Penalty for stepping onto a hazard
    pub hazard_penalty: f32,
    /// Penalty for each non-terminal step (encourages short routes)
    pub step_penalty: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            start: Position::new(0, 0),
            goal: Position::new(6, 6),
            hazards: vec![
                Position::new(2, 1),
                Position::new(1, 4),
                Position::new(4, 3),
                Position::new(5, 5),
            ],
            goal_reward: 10.0,
            hazard_penalty: -2.0,
            step_penalty: -0.2,
        }
    }
}

impl GridConfig {
    /// A hazard-free grid with the goal in the bottom-right corner
    pub fn open(size: usize) -> Self {
        Self {
            size,
            start: Position::new(0, 0),
            goal: Position::new(size as i32 - 1, size as i32 - 1),
            hazards: Vec::new(),
            ..Default::default()
        }
    }

    /// Scatter `hazard_count` hazards over an open grid, never on the start
    /// or goal cells. The same seed always produces the same layout.
    ///
    /// # Example
    ///
    /// ```rust
    /// use grid_escape::game::GridConfig;
    ///
    /// let a = GridConfig::random_layout(9, 6, 42).unwrap();
    /// let b = GridConfig::random_layout(9, 6, 42).unwrap();
    /// assert_eq!(a.hazards, b.hazards);
    /// ```
    pub fn random_layout(size: usize, hazard_count: usize, seed: u64) -> Result<Self, LayoutError> {
        if size < 2 {
            return Err(LayoutError::GridTooSmall(size));
        }
        let available = size * size - 2;
        if hazard_count > available {
            return Err(LayoutError::TooManyHazards {
                requested: hazard_count,
                available,
            });
        }

        let mut config = Self::open(size);
        let mut rng = StdRng::seed_from_u64(seed);
        while config.hazards.len() < hazard_count {
            let pos = Position::new(
                rng.gen_range(0..size as i32),
                rng.gen_range(0..size as i32),
            );
            if pos != config.start && pos != config.goal && !config.hazards.contains(&pos) {
                config.hazards.push(pos);
            }
        }
        Ok(config)
    }

    /// Check if a position lies within the grid bounds
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.size as i32 && pos.y >= 0 && pos.y < self.size as i32
    }

    /// Clamp a position into the grid, one axis at a time
    pub fn clamp(&self, pos: Position) -> Position {
        let max = self.size as i32 - 1;
        Position::new(pos.x.clamp(0, max), pos.y.clamp(0, max))
    }

    /// Classify the cell at a position. Positions outside the grid never
    /// reach this in practice because moves are clamped first.
    pub fn cell(&self, pos: Position) -> Cell {
        if self.hazards.contains(&pos) {
            Cell::Hazard
        } else if pos == self.goal {
            Cell::Goal
        } else {
            Cell::Open
        }
    }

    /// Number of cells, which is also the size of the observation space
    pub fn num_cells(&self) -> usize {
        self.size * self.size
    }

    /// Reject layouts that would make the episode contract unsound
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.size < 2 {
            return Err(LayoutError::GridTooSmall(self.size));
        }
        if !self.contains(self.start) {
            return Err(LayoutError::StartOutOfBounds(self.start));
        }
        if !self.contains(self.goal) {
            return Err(LayoutError::GoalOutOfBounds(self.goal));
        }
        if self.start == self.goal {
            return Err(LayoutError::GoalOnStart(self.goal));
        }
        for (i, &hazard) in self.hazards.iter().enumerate() {
            if !self.contains(hazard) {
                return Err(LayoutError::HazardOutOfBounds(hazard));
            }
            if hazard == self.start {
                return Err(LayoutError::HazardOnStart(hazard));
            }
            if hazard == self.goal {
                return Err(LayoutError::HazardOnGoal(hazard));
            }
            if self.hazards[..i].contains(&hazard) {
                return Err(LayoutError::DuplicateHazard(hazard));
            }
        }
        Ok(())
    }
}
