use super::{
    action::Action,
    config::{Cell, GridConfig},
    error::{GameError, LayoutError},
    state::{EpisodeOutcome, GameState, Position},
};

/// Information about a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepInfo {
    /// Kind of cell the move landed on
    pub cell: Cell,
    /// Whether the move was flattened against the grid boundary
    pub clamped: bool,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Cell the move landed on. After a capture the state itself snaps back
    /// to the start cell, but this field still reports the hazard that was hit.
    pub position: Position,
    /// Reward for this step (for RL training)
    pub reward: f32,
    /// Whether the episode has ended
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The transition function over one validated layout.
///
/// The engine owns no episode state. Callers hold a `GameState` and thread
/// it through `step`, so one engine can serve any number of episodes.
pub struct GridEngine {
    config: GridConfig,
}

impl GridEngine {
    /// Build an engine, rejecting unsound layouts up front
    pub fn new(config: GridConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The layout this engine runs
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Fresh episode state at the layout's start cell
    pub fn reset(&self) -> GameState {
        GameState::new(self.config.start)
    }

    /// Execute one transition.
    ///
    /// Moves that point off the grid are clamped to the boundary, never
    /// rejected, and the step penalty applies either way. Stepping a
    /// terminal episode is a caller bug and returns `GameError::EpisodeOver`.
    ///
    /// ```rust
    /// use grid_escape::game::{Action, GridConfig, GridEngine};
    ///
    /// let engine = GridEngine::new(GridConfig::default()).unwrap();
    /// let mut state = engine.reset();
    /// let result = engine.step(&mut state, Action::Right).unwrap();
    /// assert_eq!(result.reward, -0.2);
    /// assert!(!result.terminated);
    /// ```
    pub fn step(&self, state: &mut GameState, action: Action) -> Result<StepResult, GameError> {
        if state.is_terminal() {
            return Err(GameError::EpisodeOver);
        }

        let wanted = state.position.moved(action);
        let landed = self.config.clamp(wanted);
        let cell = self.config.cell(landed);

        let reward = match cell {
            Cell::Open => self.config.step_penalty,
            Cell::Hazard => self.config.hazard_penalty,
            Cell::Goal => self.config.goal_reward,
        };

        state.score += reward;
        state.steps += 1;
        match cell {
            Cell::Open => state.position = landed,
            Cell::Goal => {
                state.position = landed;
                state.outcome = Some(EpisodeOutcome::Escaped);
            }
            // A capture snaps the player back to start, so the next
            // observation is the start cell even though the reported
            // landing cell is the hazard.
            Cell::Hazard => {
                state.position = self.config.start;
                state.outcome = Some(EpisodeOutcome::Captured);
            }
        }

        Ok(StepResult {
            position: landed,
            reward,
            terminated: state.is_terminal(),
            info: StepInfo {
                cell,
                clamped: landed != wanted,
            },
        })
    }
}
