//! Headless rollout mode
//!
//! Drives the environment with a policy and no UI, which is the shape an
//! external training loop would take. Progress goes through `tracing`; the
//! returned summary is what scripted callers and tests consume.

use anyhow::Result;
use tracing::{debug, info};

use crate::env::{GridEnvironment, Policy};
use crate::game::{EpisodeOutcome, GridConfig, LayoutError};

/// Configuration for rollout mode
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Number of episodes to roll out
    pub episodes: usize,
    /// Per-episode step cap, applied by the driver. The environment itself
    /// never truncates; an undirected policy would otherwise wander forever.
    pub max_steps: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            episodes: 10,
            max_steps: 500,
        }
    }
}

/// Aggregate results of a rollout run
#[derive(Debug, Clone, PartialEq)]
pub struct RolloutSummary {
    pub episodes: usize,
    pub escapes: usize,
    pub captures: usize,
    /// Episodes cut off by the step cap rather than ended by the game
    pub truncated: usize,
    pub total_steps: u64,
    pub mean_score: f32,
}

/// Rollout mode: one policy, one environment, no rendering
///
/// # Example
///
/// ```rust
/// use grid_escape::env::GreedyPolicy;
/// use grid_escape::game::GridConfig;
/// use grid_escape::modes::{AgentConfig, AgentMode};
///
/// let mut mode = AgentMode::new(
///     GridConfig::default(),
///     Box::new(GreedyPolicy),
///     AgentConfig { episodes: 2, max_steps: 100 },
/// ).unwrap();
/// let summary = mode.run().unwrap();
/// assert_eq!(summary.escapes, 2);
/// ```
pub struct AgentMode {
    env: GridEnvironment,
    policy: Box<dyn Policy>,
    config: AgentConfig,
}

impl AgentMode {
    pub fn new(
        grid: GridConfig,
        policy: Box<dyn Policy>,
        config: AgentConfig,
    ) -> Result<Self, LayoutError> {
        Ok(Self {
            env: GridEnvironment::new(grid)?,
            policy,
            config,
        })
    }

    /// Run every episode and return the aggregate summary
    pub fn run(&mut self) -> Result<RolloutSummary> {
        let mut escapes = 0;
        let mut captures = 0;
        let mut truncated = 0;
        let mut total_steps: u64 = 0;
        let mut score_sum = 0.0;

        for episode in 1..=self.config.episodes {
            let (outcome, steps, score) = self.run_episode(episode)?;
            total_steps += u64::from(steps);
            score_sum += score;

            match outcome {
                Some(EpisodeOutcome::Escaped) => {
                    escapes += 1;
                    info!(episode, steps, score, "escaped");
                }
                Some(EpisodeOutcome::Captured) => {
                    captures += 1;
                    info!(episode, steps, score, "captured");
                }
                None => {
                    truncated += 1;
                    info!(episode, steps, score, "truncated");
                }
            }
        }

        self.env.close();

        let summary = RolloutSummary {
            episodes: self.config.episodes,
            escapes,
            captures,
            truncated,
            total_steps,
            mean_score: if self.config.episodes > 0 {
                score_sum / self.config.episodes as f32
            } else {
                0.0
            },
        };

        info!(
            episodes = summary.episodes,
            escapes = summary.escapes,
            captures = summary.captures,
            truncated = summary.truncated,
            mean_score = summary.mean_score,
            "rollout complete"
        );

        Ok(summary)
    }

    /// Run a single episode.
    ///
    /// Returns the outcome (`None` when the step cap truncated it), the
    /// number of steps taken, and the final score.
    fn run_episode(&mut self, episode: usize) -> Result<(Option<EpisodeOutcome>, u32, f32)> {
        let mut obs = self.env.reset();
        let mut steps = 0;

        let outcome = loop {
            if steps >= self.config.max_steps {
                break None;
            }

            let action = self.policy.select_action(obs, self.env.config());
            let step = self.env.step(action)?;
            steps += 1;
            debug!(
                episode,
                step = steps,
                action = ?action,
                landed = %step.observation.position,
                reward = step.reward,
                "transition"
            );

            if step.terminated {
                break self.env.state().outcome;
            }
            obs = step.observation;
        };

        Ok((outcome, steps, self.env.state().score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{GreedyPolicy, Observation, RandomPolicy};
    use crate::game::Action;

    struct Pinned(Action);

    impl Policy for Pinned {
        fn select_action(&mut self, _observation: Observation, _config: &GridConfig) -> Action {
            self.0
        }
    }

    #[test]
    fn test_greedy_rollout_summary() {
        let mut mode = AgentMode::new(
            GridConfig::default(),
            Box::new(GreedyPolicy),
            AgentConfig {
                episodes: 3,
                max_steps: 100,
            },
        )
        .unwrap();

        let summary = mode.run().unwrap();

        assert_eq!(summary.episodes, 3);
        assert_eq!(summary.escapes, 3);
        assert_eq!(summary.captures, 0);
        assert_eq!(summary.truncated, 0);
        assert_eq!(summary.total_steps, 36);
        assert!((summary.mean_score - 7.8).abs() < 1e-5);
    }

    #[test]
    fn test_seeded_rollouts_replay_exactly() {
        let run = || {
            let mut mode = AgentMode::new(
                GridConfig::default(),
                Box::new(RandomPolicy::seeded(1234)),
                AgentConfig {
                    episodes: 5,
                    max_steps: 200,
                },
            )
            .unwrap();
            mode.run().unwrap()
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_step_cap_truncates_stuck_policies() {
        // Pressing against the top wall never reaches a terminal cell
        let mut mode = AgentMode::new(
            GridConfig::default(),
            Box::new(Pinned(Action::Up)),
            AgentConfig {
                episodes: 2,
                max_steps: 25,
            },
        )
        .unwrap();

        let summary = mode.run().unwrap();

        assert_eq!(summary.truncated, 2);
        assert_eq!(summary.escapes, 0);
        assert_eq!(summary.captures, 0);
        assert_eq!(summary.total_steps, 50);
        assert!((summary.mean_score - 25.0 * -0.2).abs() < 1e-4);
    }

    #[test]
    fn test_zero_episode_run_is_empty() {
        let mut mode = AgentMode::new(
            GridConfig::default(),
            Box::new(GreedyPolicy),
            AgentConfig {
                episodes: 0,
                max_steps: 10,
            },
        )
        .unwrap();

        let summary = mode.run().unwrap();
        assert_eq!(summary.total_steps, 0);
        assert_eq!(summary.mean_score, 0.0);
    }
}
