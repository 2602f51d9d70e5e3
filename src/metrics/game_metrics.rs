use std::time::{Duration, Instant};

use crate::game::EpisodeOutcome;

/// Session bookkeeping across episodes. Scores here are the per-episode
/// cumulative rewards; the best score can stay negative for a whole session.
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub episodes_played: u32,
    pub escapes: u32,
    pub captures: u32,
    pub best_score: Option<f32>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            episodes_played: 0,
            escapes: 0,
            captures: 0,
            best_score: None,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_episode_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_episode_end(&mut self, outcome: EpisodeOutcome, final_score: f32) {
        self.episodes_played += 1;
        match outcome {
            EpisodeOutcome::Escaped => self.escapes += 1,
            EpisodeOutcome::Captured => self.captures += 1,
        }
        if self.best_score.map_or(true, |best| final_score > best) {
            self.best_score = Some(final_score);
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
