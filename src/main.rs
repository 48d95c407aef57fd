use anyhow::Result;
use clap::{Parser, ValueEnum};
use snake_env::env::EnvConfig;
use snake_env::modes::{RolloutConfig, RolloutMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snake_env")]
#[command(version, about = "Grid-world snake simulation environment")]
struct Cli {
    /// Execution mode
    #[arg(long, default_value = "rollout")]
    mode: Mode,

    /// Grid width
    #[arg(long, default_value = "20")]
    width: usize,

    /// Grid height
    #[arg(long, default_value = "20")]
    height: usize,

    /// Number of episodes to run
    #[arg(long, default_value = "100")]
    episodes: usize,

    /// Step cap per episode
    #[arg(long, default_value = "1000")]
    max_steps: u32,

    /// RNG seed for prize placement and action sampling
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Reward for consuming the prize
    #[arg(long, default_value = "1.0")]
    prize_reward: f32,

    /// Print the observation grid after every step
    #[arg(long)]
    show_grid: bool,

    /// Write the final stats report as JSON to this path
    #[arg(long)]
    stats_out: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Drive the simulator with uniformly random actions
    Rollout,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_config = EnvConfig {
        prize_reward: cli.prize_reward,
        ..EnvConfig::new(cli.width, cli.height)
    };

    match cli.mode {
        Mode::Rollout => {
            let config = RolloutConfig {
                max_steps_per_episode: cli.max_steps,
                print_grids: cli.show_grid,
                stats_path: cli.stats_out,
                ..RolloutConfig::new(env_config, cli.episodes, cli.seed)
            };

            let mut rollout = RolloutMode::new(config)?;
            rollout.run()?;
        }
    }

    Ok(())
}
