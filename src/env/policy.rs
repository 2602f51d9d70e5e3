use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::observation::Observation;
use crate::game::{Action, GridConfig};

/// Chooses the next action from the latest observation.
///
/// Scripted policies and external learning agents drive the environment
/// through the same four-action interface, so the rollout driver does not
/// care which kind it is holding.
pub trait Policy {
    fn select_action(&mut self, observation: Observation, config: &GridConfig) -> Action;
}

/// Picks uniformly among the four actions
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded variant, so rollouts can be replayed exactly
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for RandomPolicy {
    fn select_action(&mut self, _observation: Observation, _config: &GridConfig) -> Action {
        Action::ALL[self.rng.gen_range(0..Action::COUNT)]
    }
}

/// Walks straight toward the goal, columns first, then rows. Blind to
/// hazards, so it only wins on layouts that leave its L-shaped route open.
#[derive(Default)]
pub struct GreedyPolicy;

impl Policy for GreedyPolicy {
    fn select_action(&mut self, observation: Observation, config: &GridConfig) -> Action {
        let pos = observation.position;
        let goal = config.goal;
        if pos.x < goal.x {
            Action::Right
        } else if pos.x > goal.x {
            Action::Left
        } else if pos.y < goal.y {
            Action::Down
        } else {
            // At or below the goal row; stepping up is the only way left
            Action::Up
        }
    }
}
