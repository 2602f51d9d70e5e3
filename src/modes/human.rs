use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;

use crate::env::GridEnvironment;
use crate::game::{Action, EpisodeOutcome, GridConfig, LayoutError};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// How long the capture banner stays up before the next run starts
const CAPTURE_BANNER: Duration = Duration::from_millis(1500);

pub struct HumanMode {
    env: GridEnvironment,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    /// While set, the capture banner is showing and input is swallowed
    banner_until: Option<Instant>,
}

impl HumanMode {
    pub fn new(config: GridConfig) -> Result<Self, LayoutError> {
        Ok(Self {
            env: GridEnvironment::new(config)?,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            banner_until: None,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;
        self.env.close();

        result
    }

    /// The game advances one step per keypress; there is no logic tick. The
    /// render timer doubles as the clock that expires the capture banner.
    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    self.advance_banner();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.env.state(), self.env.config(), &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Move(action) => {
                    self.apply_move(action)?;
                }
                KeyAction::Restart => {
                    self.start_episode();
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    /// One keypress, one step. Moves are swallowed while an outcome banner
    /// is up so a buffered keypress cannot leak into the next run.
    fn apply_move(&mut self, action: Action) -> Result<()> {
        if self.env.state().is_terminal() {
            return Ok(());
        }

        let outcome = self.env.step(action)?;
        if outcome.terminated {
            if let Some(ended) = self.env.state().outcome {
                self.metrics.on_episode_end(ended, self.env.state().score);
                if ended == EpisodeOutcome::Captured {
                    // The capture banner clears on its own; an escape stays
                    // on screen until the player presses R.
                    self.banner_until = Some(Instant::now() + CAPTURE_BANNER);
                }
            }
        }

        Ok(())
    }

    fn advance_banner(&mut self) {
        if let Some(deadline) = self.banner_until {
            if Instant::now() >= deadline {
                self.start_episode();
            }
        }
    }

    fn start_episode(&mut self) {
        self.env.reset();
        self.metrics.on_episode_start();
        self.banner_until = None;
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Position;

    #[test]
    fn test_game_initialization() {
        let mode = HumanMode::new(GridConfig::default()).unwrap();
        assert!(!mode.env.state().is_terminal());
        assert_eq!(mode.env.state().score, 0.0);
        assert!(mode.banner_until.is_none());
    }

    #[test]
    fn test_moves_apply_immediately() {
        let mut mode = HumanMode::new(GridConfig::default()).unwrap();

        mode.apply_move(Action::Right).unwrap();

        assert_eq!(mode.env.state().steps, 1);
        assert_eq!(mode.env.state().position, Position::new(1, 0));
    }

    #[test]
    fn test_capture_schedules_the_return_banner() {
        let mut mode = HumanMode::new(GridConfig::default()).unwrap();

        mode.apply_move(Action::Right).unwrap();
        mode.apply_move(Action::Right).unwrap();
        mode.apply_move(Action::Down).unwrap();

        assert!(mode.banner_until.is_some());
        assert_eq!(mode.metrics.captures, 1);

        // Further moves are swallowed until the banner clears
        mode.apply_move(Action::Down).unwrap();
        assert_eq!(mode.env.state().steps, 3);
    }

    #[test]
    fn test_banner_expiry_starts_the_next_run() {
        let mut mode = HumanMode::new(GridConfig::default()).unwrap();
        mode.apply_move(Action::Right).unwrap();
        mode.apply_move(Action::Right).unwrap();
        mode.apply_move(Action::Down).unwrap();

        mode.banner_until = Some(Instant::now() - Duration::from_millis(1));
        mode.advance_banner();

        assert!(mode.banner_until.is_none());
        assert!(!mode.env.state().is_terminal());
        assert_eq!(mode.env.state().score, 0.0);
    }

    #[test]
    fn test_escape_waits_for_restart() {
        let mut mode = HumanMode::new(GridConfig::default()).unwrap();

        for _ in 0..6 {
            mode.apply_move(Action::Right).unwrap();
        }
        for _ in 0..6 {
            mode.apply_move(Action::Down).unwrap();
        }

        assert!(mode.env.state().is_terminal());
        assert!(mode.banner_until.is_none());
        assert_eq!(mode.metrics.escapes, 1);
    }

    #[test]
    fn test_restart_clears_the_episode() {
        let mut mode = HumanMode::new(GridConfig::default()).unwrap();
        mode.apply_move(Action::Right).unwrap();

        mode.start_episode();

        assert_eq!(mode.env.state().score, 0.0);
        assert_eq!(mode.env.state().steps, 0);
        assert!(mode.banner_until.is_none());
    }
}
