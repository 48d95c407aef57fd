//! Random-action rollout mode
//!
//! Drives the simulator with uniformly random actions for a fixed number of
//! episodes, tracking episode statistics. Useful for exercising the
//! environment and sanity-checking reward shaping before plugging in a real
//! decision-making collaborator.

use anyhow::{Context, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::fs::File;
use std::path::PathBuf;

use crate::env::{Actor, Direction, EnvConfig, GridWorld, Observation, Position, ACTION_COUNT};
use crate::metrics::EpisodeStats;

/// How many recent episodes feed the rolling averages
const STATS_WINDOW: usize = 100;

/// Configuration for rollout mode
#[derive(Debug, Clone)]
pub struct RolloutConfig {
    /// Simulator configuration (grid size, reward shaping)
    pub env_config: EnvConfig,

    /// Number of episodes to run
    pub episodes: usize,

    /// Step cap per episode, so a lucky random walk still terminates
    pub max_steps_per_episode: u32,

    /// Seed for both prize placement and action sampling
    pub seed: u64,

    /// Initial actor length (laid out from the grid center)
    pub initial_length: usize,

    /// Print the observation grid after every step
    pub print_grids: bool,

    /// Where to write the stats report as JSON, if anywhere
    pub stats_path: Option<PathBuf>,
}

impl RolloutConfig {
    pub fn new(env_config: EnvConfig, episodes: usize, seed: u64) -> Self {
        Self {
            env_config,
            episodes,
            max_steps_per_episode: 1_000,
            seed,
            initial_length: 3,
            print_grids: false,
            stats_path: None,
        }
    }
}

/// Runs random-action episodes against the simulator
pub struct RolloutMode {
    world: GridWorld,
    stats: EpisodeStats,
    rng: StdRng,
    config: RolloutConfig,
}

impl RolloutMode {
    pub fn new(config: RolloutConfig) -> Result<Self> {
        let center = Position::new(
            (config.env_config.width / 2) as i32,
            (config.env_config.height / 2) as i32,
        );
        let actor = Actor::aligned(center, Direction::Right, config.initial_length);

        let world = GridWorld::new(config.env_config.clone(), actor.body, config.seed)
            .context("failed to construct the simulator")?;

        Ok(Self {
            world,
            stats: EpisodeStats::new(STATS_WINDOW),
            rng: StdRng::seed_from_u64(config.seed),
            config,
        })
    }

    /// Run all configured episodes and report statistics
    pub fn run(&mut self) -> Result<()> {
        for _ in 0..self.config.episodes {
            self.run_episode()?;
            self.world.reset();
        }

        println!("{}", self.stats.format_summary());

        if let Some(path) = &self.config.stats_path {
            let file = File::create(path)
                .with_context(|| format!("failed to create stats file {}", path.display()))?;
            serde_json::to_writer_pretty(file, &self.stats.report())
                .context("failed to write stats report")?;
        }

        Ok(())
    }

    /// Statistics collected so far
    pub fn stats(&self) -> &EpisodeStats {
        &self.stats
    }

    fn run_episode(&mut self) -> Result<()> {
        let mut total_reward = 0.0;
        let mut length = 0u32;

        while length < self.config.max_steps_per_episode {
            let action_idx = self.rng.gen_range(0..ACTION_COUNT);
            let outcome = self.world.step_index(action_idx)?;

            total_reward += outcome.reward;
            length += 1;

            if self.config.print_grids {
                if let Some(obs) = &outcome.observation {
                    print_grid(obs);
                }
            }

            if outcome.done {
                break;
            }
        }

        let score = self.world.state().score;
        self.stats.record_episode(total_reward, length, score);

        Ok(())
    }
}

/// Dump the numeric observation array, one grid row per line
fn print_grid(obs: &Observation) {
    for row in obs.rows() {
        let line: Vec<String> = row.iter().map(|v| format!("{v:>3.0}")).collect();
        println!("{}", line.join(" "));
    }
    println!();
}
