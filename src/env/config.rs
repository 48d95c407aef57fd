use serde::{Deserialize, Serialize};

use super::error::EnvError;

/// Configuration for the grid-world simulator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Width of the grid in cells
    pub width: usize,
    /// Height of the grid in cells
    pub height: usize,

    // Reward shaping. The terminal (death) reward is fixed at -1 and is not
    // part of the shaping surface.
    /// Reward for consuming the prize
    pub prize_reward: f32,
    /// Reward for a safe step that consumed nothing
    pub step_reward: f32,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            prize_reward: 1.0,
            step_reward: 0.0,
        }
    }
}

impl EnvConfig {
    /// Create a configuration with a custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Check that the grid dimensions are positive
    pub fn validate(&self) -> Result<(), EnvError> {
        if self.width == 0 || self.height == 0 {
            return Err(EnvError::InvalidConfiguration(format!(
                "grid dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }

        Ok(())
    }
}
