use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use grid_escape::env::{GreedyPolicy, Policy, RandomPolicy};
use grid_escape::game::GridConfig;
use grid_escape::modes::{AgentConfig, AgentMode, HumanMode, WatchMode};

#[derive(Parser)]
#[command(name = "grid_escape")]
#[command(version, about = "Grid escape game playable by humans and RL agents")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// Grid side length, used with --random-layout
    #[arg(long, default_value = "7")]
    size: usize,

    /// Load the layout from a JSON file instead of the built-in one
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Generate a random layout instead of the built-in one
    #[arg(long)]
    random_layout: bool,

    /// Number of hazards for --random-layout
    #[arg(long, default_value = "4")]
    hazards: usize,

    /// Seed for --random-layout and the random policy
    #[arg(long)]
    seed: Option<u64>,

    /// Episodes to roll out in agent mode
    #[arg(long, default_value = "10")]
    episodes: usize,

    /// Per-episode step cap in agent mode
    #[arg(long, default_value = "500")]
    max_steps: u32,

    /// Policy driving agent and watch modes
    #[arg(long, default_value = "random")]
    policy: PolicyKind,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Play with keyboard controls
    Human,
    /// Roll out a policy headlessly and log a summary
    Agent,
    /// Watch a policy play in the TUI
    Watch,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyKind {
    /// Uniformly random moves
    Random,
    /// Straight toward the goal, columns first
    Greedy,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // TUI modes own the terminal, so default their logging down to warnings
    let default_filter = match cli.mode {
        Mode::Agent => "info",
        Mode::Human | Mode::Watch => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let config = load_config(&cli)?;

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config)?;
            human_mode.run().await?;
        }
        Mode::Agent => {
            let agent_config = AgentConfig {
                episodes: cli.episodes,
                max_steps: cli.max_steps,
            };
            let mut agent_mode = AgentMode::new(config, build_policy(&cli), agent_config)?;
            agent_mode.run()?;
        }
        Mode::Watch => {
            let mut watch_mode = WatchMode::new(config, build_policy(&cli))?;
            watch_mode.run().await?;
        }
    }

    Ok(())
}

/// Resolve the layout from CLI arguments: an explicit file, a seeded random
/// layout, or the built-in one.
fn load_config(cli: &Cli) -> Result<GridConfig> {
    if let Some(path) = &cli.layout {
        if cli.random_layout {
            bail!("--layout and --random-layout are mutually exclusive");
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout file {}", path.display()))?;
        let config: GridConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse layout file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Rejected layout file {}", path.display()))?;
        return Ok(config);
    }

    if cli.random_layout {
        // Log the seed so an interesting layout can be replayed later
        let seed = cli.seed.unwrap_or_else(rand::random);
        info!(seed, size = cli.size, hazards = cli.hazards, "generated random layout");
        return Ok(GridConfig::random_layout(cli.size, cli.hazards, seed)?);
    }

    let default_size = GridConfig::default().size;
    if cli.size != default_size {
        bail!("--size only applies with --random-layout; the built-in layout is {default_size}x{default_size}");
    }
    Ok(GridConfig::default())
}

fn build_policy(cli: &Cli) -> Box<dyn Policy> {
    match cli.policy {
        PolicyKind::Random => match cli.seed {
            Some(seed) => Box::new(RandomPolicy::seeded(seed)),
            None => Box::new(RandomPolicy::new()),
        },
        PolicyKind::Greedy => Box::new(GreedyPolicy),
    }
}
