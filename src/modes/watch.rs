//! Watch mode for scripted policies
//!
//! TUI playback of a policy driving the environment, with the same renderer
//! the human mode uses. Finished episodes restart on their own after a short
//! banner.
//!
//! # Controls
//!
//! - Space: Pause/unpause
//! - R: Restart episode
//! - 1-4: Speed control (1=slow, 2=normal, 3=fast, 4=very fast)
//! - Q/Esc: Quit

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::{Duration, Instant};
use tokio::time::{interval, Interval};

use crate::env::{GridEnvironment, Policy};
use crate::game::{GridConfig, LayoutError};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// How long a finished episode stays on screen before the next one starts
const OUTCOME_BANNER: Duration = Duration::from_millis(1200);

/// Playback speed settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchSpeed {
    /// Slow: 2 Hz (500ms per step)
    Slow,
    /// Normal: 8 Hz (125ms per step)
    Normal,
    /// Fast: 20 Hz (50ms per step)
    Fast,
    /// Very Fast: 60 Hz (16ms per step)
    VeryFast,
}

impl WatchSpeed {
    /// Get the tick interval for this speed
    fn tick_interval(&self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(500),
            Self::Normal => Duration::from_millis(125),
            Self::Fast => Duration::from_millis(50),
            Self::VeryFast => Duration::from_millis(16),
        }
    }
}

/// Watch mode: a policy plays on screen
pub struct WatchMode {
    env: GridEnvironment,
    policy: Box<dyn Policy>,
    renderer: Renderer,
    metrics: GameMetrics,
    should_quit: bool,
    paused: bool,
    speed: WatchSpeed,
    banner_until: Option<Instant>,
}

impl WatchMode {
    pub fn new(config: GridConfig, policy: Box<dyn Policy>) -> Result<Self, LayoutError> {
        Ok(Self {
            env: GridEnvironment::new(config)?,
            policy,
            renderer: Renderer::new(),
            metrics: GameMetrics::new(),
            should_quit: false,
            paused: false,
            speed: WatchSpeed::Normal,
            banner_until: None,
        })
    }

    /// Run the watch loop
    ///
    /// Sets up the terminal, runs the main playback loop, and cleans up on
    /// exit.
    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run playback loop
        let result = self.run_watch_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;
        self.env.close();

        result
    }

    /// Main playback loop
    async fn run_watch_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Policy steps based on speed
        let mut tick_timer = interval(self.speed.tick_interval());

        // Render at 30 FPS
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        self.start_episode();

        loop {
            tokio::select! {
                // Handle keyboard input
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &mut tick_timer)?;
                    }
                }

                // Policy tick
                _ = tick_timer.tick() => {
                    if !self.paused {
                        self.advance()?;
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, self.env.state(), self.env.config(), &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Ctrl+C
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

    /// One policy step per tick. While the outcome banner is up the
    /// environment holds still; when it expires the next episode starts.
    fn advance(&mut self) -> Result<()> {
        if let Some(deadline) = self.banner_until {
            if Instant::now() >= deadline {
                self.start_episode();
            }
            return Ok(());
        }

        let obs = self.env.observation();
        let action = self.policy.select_action(obs, self.env.config());
        let step = self.env.step(action)?;

        if step.terminated {
            if let Some(ended) = self.env.state().outcome {
                self.metrics.on_episode_end(ended, self.env.state().score);
            }
            self.banner_until = Some(Instant::now() + OUTCOME_BANNER);
        }

        Ok(())
    }

    fn start_episode(&mut self) {
        self.env.reset();
        self.metrics.on_episode_start();
        self.banner_until = None;
    }

    /// Handle keyboard events
    fn handle_event(&mut self, event: Event, tick_timer: &mut Interval) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Char(' ') => {
                    self.paused = !self.paused;
                }
                KeyCode::Char('r') => {
                    self.start_episode();
                }
                KeyCode::Char('1') => {
                    self.change_speed(WatchSpeed::Slow, tick_timer);
                }
                KeyCode::Char('2') => {
                    self.change_speed(WatchSpeed::Normal, tick_timer);
                }
                KeyCode::Char('3') => {
                    self.change_speed(WatchSpeed::Fast, tick_timer);
                }
                KeyCode::Char('4') => {
                    self.change_speed(WatchSpeed::VeryFast, tick_timer);
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Change the playback speed. The interval is rebuilt so the new period
    /// sticks beyond the next tick.
    fn change_speed(&mut self, new_speed: WatchSpeed, tick_timer: &mut Interval) {
        self.speed = new_speed;
        *tick_timer = interval(self.speed.tick_interval());
    }

    /// Cleanup terminal state
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
