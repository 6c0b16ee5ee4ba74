use rand::Rng;
use tracing::debug;

use crate::error::EngineError;
use crate::grid::{CellState, Grid};
use crate::types::Position;

/// Places stones and food onto a [`Grid`]
#[derive(Debug, Clone, Copy)]
pub struct Spawner {
    /// Samples allowed per placement call before giving up
    pub max_attempts: usize,
}

impl Default for Spawner {
    fn default() -> Self {
        Self {
            max_attempts: 100_000,
        }
    }
}

impl Spawner {
    pub fn new(max_attempts: usize) -> Self {
        Self { max_attempts }
    }

    fn sample(grid: &Grid, rng: &mut impl Rng) -> Option<(Position, CellState)> {
        if grid.cells.is_empty() {
            return None;
        }
        let cell = grid.cells[rng.gen_range(0..grid.cells.len())];
        Some((Position::new(cell.col, cell.row), cell.state))
    }

    /// True when `pos` lies on the rows/columns kept clear for the starting
    /// corridor. The last term compares the column against `rows - 2`.
    pub fn in_start_corridor(grid: &Grid, pos: Position) -> bool {
        pos.col == 1 || pos.col == grid.cols - 2 || pos.row == 1 || pos.col == grid.rows - 2
    }

    /// True when a placed stone sits in an adjacent column or an adjacent row
    /// anywhere on the board
    pub fn crowds(stones: &[Position], pos: Position) -> bool {
        stones.iter().any(|s| {
            s.col == pos.col + 1 || s.row == pos.row + 1 || s.col == pos.col - 1 || s.row == pos.row - 1
        })
    }

    /// Place `count` stones and mark them [`CellState::Obstacle`]
    pub fn place_obstacles(
        &self,
        grid: &mut Grid,
        count: usize,
        rng: &mut impl Rng,
    ) -> Result<Vec<Position>, EngineError> {
        let mut stones: Vec<Position> = Vec::with_capacity(count);
        let mut attempts = 0;

        while stones.len() < count {
            if attempts >= self.max_attempts {
                return Err(EngineError::PlacementExhausted {
                    what: "obstacles",
                    placed: stones.len(),
                    requested: count,
                    attempts,
                });
            }
            attempts += 1;

            let Some((pos, state)) = Self::sample(grid, rng) else {
                continue;
            };
            if Self::in_start_corridor(grid, pos) || state != CellState::Empty {
                continue;
            }
            if Self::crowds(&stones, pos) {
                continue;
            }
            grid.set_state_at(pos, CellState::Obstacle);
            stones.push(pos);
        }

        debug!(count, attempts, "placed obstacles");
        Ok(stones)
    }

    /// Pick `count` distinct empty cells for food. The result replaces any
    /// previous food set; food never changes cell states.
    pub fn place_food(
        &self,
        grid: &Grid,
        count: usize,
        rng: &mut impl Rng,
    ) -> Result<Vec<Position>, EngineError> {
        let mut foods: Vec<Position> = Vec::with_capacity(count);
        let mut attempts = 0;

        while foods.len() < count {
            if attempts >= self.max_attempts {
                return Err(EngineError::PlacementExhausted {
                    what: "food",
                    placed: foods.len(),
                    requested: count,
                    attempts,
                });
            }
            attempts += 1;

            let Some((pos, state)) = Self::sample(grid, rng) else {
                continue;
            };
            if state != CellState::Empty || foods.contains(&pos) {
                continue;
            }
            foods.push(pos);
        }

        debug!(count, attempts, "placed food");
        Ok(foods)
    }
}
