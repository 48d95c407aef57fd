//! Snake grid-world environment for RL experimentation
//!
//! This library provides:
//! - The grid-world simulator core: step/reset/observe over a rectangular
//!   grid with a single actor and prize (env module)
//! - Episode statistics with rolling averages (metrics module)
//! - A random-action rollout driver for exercising the simulator (modes
//!   module)

pub mod env;
pub mod metrics;
pub mod modes;

pub use env::{Direction, EnvConfig, EnvError, GridWorld, Observation, StepOutcome};
