//! Reinforcement learning surface for Grid Escape
//!
//! Provides:
//! - Cell-index observations with an optional one-hot widening
//! - An episodic reset/step/render/close environment over the engine
//! - A policy trait plus scripted random and greedy baselines

pub mod environment;
pub mod observation;
pub mod policy;

pub use environment::{GridEnvironment, StepOutcome};
pub use observation::{create_observation, observation_at, Observation};
pub use policy::{GreedyPolicy, Policy, RandomPolicy};
