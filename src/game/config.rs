use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::grid::Cell;

/// Configuration for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Cell the snake's head starts on, moving right
    pub spawn: Cell,

    // Speed progression
    /// Milliseconds between ticks at game start
    pub initial_interval_ms: u64,
    /// Lower bound on the tick interval
    pub min_interval_ms: u64,
    /// Milliseconds shaved off the interval per food eaten
    pub interval_step_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 24,
            initial_snake_length: 3,
            spawn: Cell::new(5, 10),
            initial_interval_ms: 160,
            min_interval_ms: 70,
            interval_step_ms: 6,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size. The spawn cell is
    /// derived from the grid so the initial snake always fits.
    pub fn new(width: usize, height: usize) -> Self {
        let defaults = Self::default();
        let head_x = (width as i32 / 4).max(defaults.initial_snake_length as i32 - 1);
        Self {
            grid_width: width,
            grid_height: height,
            spawn: Cell::new(head_x, height as i32 / 2),
            ..defaults
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Reject configurations the initial snake cannot fit in
    pub fn validate(&self) -> Result<()> {
        if self.grid_width == 0 || self.grid_height == 0 {
            bail!("grid must be at least 1x1");
        }
        if self.initial_snake_length < 3 {
            bail!("snake must start with at least 3 segments");
        }
        // The snake spawns heading right, so the body extends left of the head.
        let tail_x = self.spawn.x - (self.initial_snake_length as i32 - 1);
        if tail_x < 0
            || self.spawn.x >= self.grid_width as i32
            || self.spawn.y < 0
            || self.spawn.y >= self.grid_height as i32
        {
            bail!(
                "initial snake does not fit: head ({}, {}), length {}, grid {}x{}",
                self.spawn.x,
                self.spawn.y,
                self.initial_snake_length,
                self.grid_width,
                self.grid_height
            );
        }
        if self.min_interval_ms == 0 || self.initial_interval_ms < self.min_interval_ms {
            bail!(
                "interval bounds invalid: initial {} ms, minimum {} ms",
                self.initial_interval_ms,
                self.min_interval_ms
            );
        }
        Ok(())
    }
}
