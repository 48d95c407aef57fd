//! Episode statistics tracking
//!
//! Tracks per-episode metrics (reward, length, score) with rolling windows
//! for smoothed averages, plus lifetime totals and the high score.

use serde::Serialize;
use std::collections::VecDeque;

/// Episode statistics tracker with rolling averages
#[derive(Debug, Clone)]
pub struct EpisodeStats {
    /// Episode rewards (rolling window)
    rewards: VecDeque<f32>,

    /// Episode lengths in steps (rolling window)
    lengths: VecDeque<u32>,

    /// Episode scores, prizes consumed (rolling window)
    scores: VecDeque<u32>,

    /// Total number of episodes completed
    total_episodes: usize,

    /// Total number of simulator steps taken
    total_steps: u64,

    /// Best score seen across all episodes
    high_score: u32,

    /// Window size for rolling averages
    window_size: usize,
}

/// Serializable snapshot of the tracked statistics
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub episodes: usize,
    pub steps: u64,
    pub high_score: u32,
    pub mean_reward: f32,
    pub mean_length: f32,
    pub mean_score: f32,
}

impl EpisodeStats {
    /// Create a tracker keeping the last `window_size` episodes for averages
    pub fn new(window_size: usize) -> Self {
        Self {
            rewards: VecDeque::with_capacity(window_size),
            lengths: VecDeque::with_capacity(window_size),
            scores: VecDeque::with_capacity(window_size),
            total_episodes: 0,
            total_steps: 0,
            high_score: 0,
            window_size,
        }
    }

    /// Record the completion of an episode
    pub fn record_episode(&mut self, reward: f32, length: u32, score: u32) {
        push_windowed(&mut self.rewards, reward, self.window_size);
        push_windowed(&mut self.lengths, length, self.window_size);
        push_windowed(&mut self.scores, score, self.window_size);

        self.total_episodes += 1;
        self.total_steps += u64::from(length);

        if score > self.high_score {
            self.high_score = score;
        }
    }

    /// Mean reward over the window (0 when no episodes recorded)
    pub fn mean_reward(&self) -> f32 {
        mean(self.rewards.iter().copied())
    }

    /// Mean episode length over the window
    pub fn mean_length(&self) -> f32 {
        mean(self.lengths.iter().map(|&v| v as f32))
    }

    /// Mean score over the window
    pub fn mean_score(&self) -> f32 {
        mean(self.scores.iter().map(|&v| v as f32))
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Snapshot for export
    pub fn report(&self) -> StatsReport {
        StatsReport {
            episodes: self.total_episodes,
            steps: self.total_steps,
            high_score: self.high_score,
            mean_reward: self.mean_reward(),
            mean_length: self.mean_length(),
            mean_score: self.mean_score(),
        }
    }

    /// One-line human-readable summary
    pub fn format_summary(&self) -> String {
        format!(
            "episodes: {} | steps: {} | high score: {} | mean reward: {:.2} | mean length: {:.1} | mean score: {:.2}",
            self.total_episodes,
            self.total_steps,
            self.high_score,
            self.mean_reward(),
            self.mean_length(),
            self.mean_score(),
        )
    }
}

fn push_windowed<T>(window: &mut VecDeque<T>, value: T, capacity: usize) {
    if window.len() == capacity {
        window.pop_front();
    }
    window.push_back(value);
}

fn mean(values: impl Iterator<Item = f32>) -> f32 {
    let mut sum = 0.0;
    let mut count = 0usize;

    for v in values {
        sum += v;
        count += 1;
    }

    if count == 0 {
        0.0
    } else {
        sum / count as f32
    }
}
