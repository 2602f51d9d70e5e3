//! Core game logic module for Grid Escape
//!
//! This module contains all the game logic without any I/O or rendering
//! dependencies. It can be used programmatically for both human play and
//! agent rollouts.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;

// Re-export commonly used types
pub use action::Action;
pub use config::{Cell, GridConfig, DEFAULT_GRID_SIZE};
pub use engine::{GridEngine, StepInfo, StepResult};
pub use error::{GameError, LayoutError};
pub use state::{EpisodeOutcome, GameState, Position};
