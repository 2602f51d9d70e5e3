pub mod agent;
pub mod human;
pub mod watch;

pub use agent::{AgentConfig, AgentMode, RolloutSummary};
pub use human::HumanMode;
pub use watch::{WatchMode, WatchSpeed};
