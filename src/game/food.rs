use rand::Rng;

use super::grid::{Cell, Grid};
use super::snake::Snake;

/// Resample budget before falling back to the deterministic scan
const MAX_RANDOM_ATTEMPTS: usize = 1000;

/// Pick a uniformly random free cell for the next piece of food.
///
/// Resamples until it finds a cell the snake does not occupy, capped at
/// [`MAX_RANDOM_ATTEMPTS`]; past the cap it scans the grid in row-major
/// order and takes the first free cell. Returns `None` only when the snake
/// covers the whole board, which normal play never reaches.
pub fn spawn_food<R: Rng>(grid: Grid, snake: &Snake, rng: &mut R) -> Option<Cell> {
    for _ in 0..MAX_RANDOM_ATTEMPTS {
        let cell = Cell::new(
            rng.gen_range(0..grid.width) as i32,
            rng.gen_range(0..grid.height) as i32,
        );
        if !snake.occupies(cell) {
            return Some(cell);
        }
    }

    grid.cells().find(|cell| !snake.occupies(*cell))
}
