use super::observation::{create_observation, observation_at, Observation};
use crate::game::{
    Action, Cell, GameError, GameState, GridConfig, GridEngine, LayoutError, Position, StepInfo,
};

/// Outcome of one environment step
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// Where the step landed. After a capture this is the hazard cell, while
    /// the environment itself has already snapped back to the start cell.
    pub observation: Observation,
    /// Reward for this step
    pub reward: f32,
    /// Whether the episode has ended
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// Grid Escape environment for reinforcement learning
///
/// Wraps the game engine behind the episodic reset/step/render/close
/// surface, with:
/// - Cell-index observations (one cell per observation)
/// - Discrete action space (4 actions: Up, Down, Left, Right)
/// - Explicit contract errors instead of silent recovery
pub struct GridEnvironment {
    engine: GridEngine,
    state: GameState,
}

impl GridEnvironment {
    /// Create a new environment over a validated layout
    pub fn new(config: GridConfig) -> Result<Self, LayoutError> {
        let engine = GridEngine::new(config)?;
        let state = engine.reset();
        Ok(Self { engine, state })
    }

    /// Reset the environment and return the initial observation
    pub fn reset(&mut self) -> Observation {
        self.state = self.engine.reset();
        create_observation(&self.state, self.engine.config())
    }

    /// Step the environment with a game action.
    ///
    /// Returns `GameError::EpisodeOver` when called on a finished episode;
    /// callers must reset first.
    pub fn step(&mut self, action: Action) -> Result<StepOutcome, GameError> {
        let result = self.engine.step(&mut self.state, action)?;
        Ok(StepOutcome {
            observation: observation_at(result.position, self.engine.config()),
            reward: result.reward,
            terminated: result.terminated,
            info: result.info,
        })
    }

    /// Step the environment with a discrete action index.
    ///
    /// Actions:
    /// - 0: Up
    /// - 1: Down
    /// - 2: Left
    /// - 3: Right
    ///
    /// Any other index is a caller bug and returns `GameError::InvalidAction`.
    pub fn step_index(&mut self, index: usize) -> Result<StepOutcome, GameError> {
        self.step(Action::try_from(index)?)
    }

    /// Current observation without stepping
    pub fn observation(&self) -> Observation {
        create_observation(&self.state, self.engine.config())
    }

    /// Size of the discrete action space
    pub fn action_space(&self) -> usize {
        Action::COUNT
    }

    /// Size of the observation space (one observation per cell)
    pub fn observation_space(&self) -> usize {
        self.engine.config().num_cells()
    }

    /// Plain-text frame of the current state, one grid row per line
    pub fn render(&self) -> String {
        let config = self.engine.config();
        let size = config.size as i32;
        let mut out = String::new();
        for y in 0..size {
            for x in 0..size {
                let pos = Position::new(x, y);
                let glyph = if pos == self.state.position {
                    'P'
                } else {
                    match config.cell(pos) {
                        Cell::Hazard => 'X',
                        Cell::Goal => 'G',
                        Cell::Open => '.',
                    }
                };
                out.push(glyph);
                if x + 1 < size {
                    out.push(' ');
                }
            }
            out.push('\n');
        }
        out.push_str(&format!(
            "score: {:.1}  steps: {}\n",
            self.state.score, self.state.steps
        ));
        out
    }

    /// Release driver-side resources. The environment holds none of its
    /// own, so this leaves the logical state untouched; it exists for
    /// lifecycle parity with reset/step/render.
    pub fn close(&mut self) {}

    /// Get reference to current game state (for testing/debugging)
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The layout this environment runs
    pub fn config(&self) -> &GridConfig {
        self.engine.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::EpisodeOutcome;

    #[test]
    fn test_environment_creation() {
        let env = GridEnvironment::new(GridConfig::default()).unwrap();

        assert!(!env.state().is_terminal());
        assert_eq!(env.state().score, 0.0);
        assert_eq!(env.state().steps, 0);
        assert_eq!(env.observation().position, Position::new(0, 0));
    }

    #[test]
    fn test_environment_rejects_invalid_layouts() {
        let mut config = GridConfig::default();
        config.hazards.push(config.start);
        assert!(matches!(
            GridEnvironment::new(config),
            Err(LayoutError::HazardOnStart(_))
        ));
    }

    #[test]
    fn test_spaces() {
        let env = GridEnvironment::new(GridConfig::default()).unwrap();
        assert_eq!(env.action_space(), 4);
        assert_eq!(env.observation_space(), 49);

        let env = GridEnvironment::new(GridConfig::open(5)).unwrap();
        assert_eq!(env.observation_space(), 25);
    }

    #[test]
    fn test_reset_returns_the_start_observation() {
        let mut env = GridEnvironment::new(GridConfig::default()).unwrap();
        env.step(Action::Right).unwrap();

        let obs = env.reset();
        assert_eq!(obs.position, Position::new(0, 0));
        assert_eq!(obs.index, 0);
        assert_eq!(env.state().score, 0.0);
        assert_eq!(env.state().steps, 0);
    }

    #[test]
    fn test_step_with_each_action_index() {
        let mut env = GridEnvironment::new(GridConfig::default()).unwrap();

        for index in 0..4 {
            env.reset();
            let outcome = env.step_index(index).unwrap();
            assert!(outcome.reward.is_finite());
            assert!(!outcome.terminated);
        }
    }

    #[test]
    fn test_invalid_action_index_is_rejected() {
        let mut env = GridEnvironment::new(GridConfig::default()).unwrap();
        let steps_before = env.state().steps;

        assert_eq!(env.step_index(4), Err(GameError::InvalidAction(4)));
        assert_eq!(env.step_index(999), Err(GameError::InvalidAction(999)));
        assert_eq!(env.state().steps, steps_before);
    }

    #[test]
    fn test_full_episode_to_the_goal() {
        let mut env = GridEnvironment::new(GridConfig::default()).unwrap();
        env.reset();

        // Straight along the top row, then straight down the right edge,
        // which avoids every built-in hazard.
        let mut last = None;
        for _ in 0..6 {
            last = Some(env.step(Action::Right).unwrap());
        }
        for _ in 0..6 {
            last = Some(env.step(Action::Down).unwrap());
        }

        let last = last.unwrap();
        assert!(last.terminated);
        assert_eq!(last.reward, 10.0);
        assert_eq!(last.observation.index, 48);
        assert_eq!(env.state().outcome, Some(EpisodeOutcome::Escaped));
        assert!((env.state().score - 7.8).abs() < 1e-5);
    }

    #[test]
    fn test_capture_reports_the_hazard_but_observes_the_start() {
        let mut env = GridEnvironment::new(GridConfig::default()).unwrap();
        env.reset();

        env.step(Action::Right).unwrap();
        env.step(Action::Right).unwrap();
        let outcome = env.step(Action::Down).unwrap();

        assert!(outcome.terminated);
        assert_eq!(outcome.reward, -2.0);
        assert_eq!(outcome.observation.position, Position::new(2, 1));
        assert_eq!(outcome.observation.index, 9);
        // The environment itself has snapped back to the start cell.
        assert_eq!(env.observation().position, Position::new(0, 0));
        assert_eq!(env.state().outcome, Some(EpisodeOutcome::Captured));
    }

    #[test]
    fn test_step_after_terminal_requires_reset() {
        let mut env = GridEnvironment::new(GridConfig::default()).unwrap();
        env.reset();
        env.step(Action::Right).unwrap();
        env.step(Action::Right).unwrap();
        env.step(Action::Down).unwrap();

        assert_eq!(env.step(Action::Up), Err(GameError::EpisodeOver));

        let obs = env.reset();
        assert_eq!(obs.index, 0);
        assert!(env.step(Action::Right).is_ok());
    }

    #[test]
    fn test_render_draws_the_grid() {
        let env = GridEnvironment::new(GridConfig::default()).unwrap();
        let frame = env.render();

        assert!(frame.starts_with('P'));
        assert_eq!(frame.matches('X').count(), 4);
        assert_eq!(frame.matches('G').count(), 1);
        assert!(frame.contains("score: 0.0  steps: 0"));
        // 7 grid rows plus the status line
        assert_eq!(frame.lines().count(), 8);
    }

    #[test]
    fn test_render_moves_the_player_glyph() {
        let mut env = GridEnvironment::new(GridConfig::default()).unwrap();
        env.step(Action::Down).unwrap();

        let frame = env.render();
        let second_row = frame.lines().nth(1).unwrap();
        assert!(second_row.starts_with('P'));
        assert!(!frame.starts_with('P'));
    }

    #[test]
    fn test_close_keeps_logical_state() {
        let mut env = GridEnvironment::new(GridConfig::default()).unwrap();
        env.step(Action::Right).unwrap();
        let score = env.state().score;

        env.close();
        assert_eq!(env.state().score, score);
        assert_eq!(env.state().position, Position::new(1, 0));
    }

    #[test]
    fn test_multiple_episodes() {
        let mut env = GridEnvironment::new(GridConfig::default()).unwrap();

        for _ in 0..3 {
            env.reset();
            let mut done = false;
            let mut steps = 0;
            while !done && steps < 100 {
                let outcome = env.step(Action::Right).unwrap();
                done = outcome.terminated;
                steps += 1;
            }
            // Hugging the right wall never terminates; the cap ends it.
            assert_eq!(steps, 100);
            assert!(!done);
        }
    }
}
