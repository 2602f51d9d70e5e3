//! Grid Escape - a small grid-world game with a reinforcement learning surface
//!
//! This library provides:
//! - Core game logic (game module)
//! - Episodic environment and scripted policies (env module)
//! - TUI rendering (render module) and key mapping (input module)
//! - Session metrics (metrics module)
//! - Multiple execution modes (human, agent, watch)

pub mod env;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
